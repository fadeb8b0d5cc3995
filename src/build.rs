//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── --file given ──► process_pages(only) / process_single()
//!     │                     (no generated pages)
//!     │
//!     └── full build
//!             ├── overview(Tags)   ──► public/tag/*.html
//!             ├── overview(Years)  ──► public/year/*.html
//!             ├── process_pages()  ──► public/**/*.html
//!             ├── front page       ──► public/index.html
//!             ├── sitemap          ──► public/sitemap.html
//!             └── redirects        ──► public/**/index.html
//!
//! then, on full builds or when asked for:
//!     ├── copy_static()
//!     └── install_plugin() per used plugin
//! ```
//!
//! Steps run strictly in this order; a failing document never stops the run.

use crate::{
    cli::Cli,
    compiler::{assets, pages, process_pages, process_single},
    generator::{
        front::generate_front_page,
        overview::{self, OverviewKind},
        redirect::generate_redirects,
        sitemap::generate_sitemap,
    },
    log,
    site::Site,
};
use anyhow::{Result, bail};
use std::path::Path;

/// What a build was asked to do beyond page conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions<'a> {
    /// Restrict the run to one file or directory below the source
    pub file: Option<&'a Path>,
    pub copy: bool,
    pub plugins: bool,
}

impl<'a> From<&'a Cli> for BuildOptions<'a> {
    fn from(cli: &'a Cli) -> Self {
        Self {
            file: cli.file.as_deref(),
            copy: cli.copy,
            plugins: cli.plugins,
        }
    }
}

/// Build the site. Returns the number of failed steps and documents.
///
/// Only errors of single-file mode and of an unusable `--file` argument are
/// returned; everything else is logged and counted.
pub fn build_site(site: &Site, options: &BuildOptions) -> Result<usize> {
    let build = &site.config.build;
    let (source, destination) = (build.source.as_path(), build.destination.as_path());
    let mut failed = 0;

    let (copy, plugins) = match options.file {
        Some(file) => {
            let target = pages::locate(source, file)?;
            if target.is_dir() {
                failed += process_pages(site, source, destination, Some(&target))?.failed;
            } else if target.is_file() {
                process_single(site, source, destination, &target)?;
            } else {
                bail!("unable to process file type of `{}`", file.display());
            }
            (options.copy, options.plugins)
        }
        None => {
            failed += full_build(site);
            (true, true)
        }
    };

    if copy {
        failed += counted("copy", assets::copy_static(site).map(drop));
    }
    if plugins {
        for name in site.plugin_names() {
            failed += counted("plugin", assets::install_plugin(site, name));
        }
    }

    Ok(failed)
}

/// Generated pages, all documents and redirects.
fn full_build(site: &Site) -> usize {
    let build = &site.config.build;
    let mut failed = 0;

    for kind in [OverviewKind::Tags, OverviewKind::Years] {
        match overview::generate(site, kind) {
            Ok(report) => failed += report.failed,
            Err(err) => failed += counted::<()>("overview", Err(err)),
        }
    }

    match process_pages(site, &build.source, &build.destination, None) {
        Ok(report) => {
            log!(
                "build";
                "{} written, {} up to date, {} ignored, {} failed",
                report.written,
                report.skipped,
                report.ignored,
                report.failed
            );
            failed += report.failed;
        }
        Err(err) => failed += counted::<()>("build", Err(err)),
    }

    failed += counted("front", generate_front_page(site).map(drop));
    failed += counted("sitemap", generate_sitemap(site).map(drop));
    generate_redirects(site);

    failed
}

/// Log a failed step; 1 if it failed, else 0.
fn counted<T>(step: &str, result: Result<T>) -> usize {
    match result {
        Ok(_) => 0,
        Err(err) => {
            log!("error"; "{}: {:#}", step, err);
            1
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::site::tests::site_in;
    use std::fs;
    use tempfile::TempDir;

    /// Decode prints a tree linking to `pages/a.html`; encode copies stdin.
    const FAKE_RENDERER: &str = r#"
if [ "$1" = "-t" ]; then
  grep -q broken "$3" && exit 4
  printf '%s' '{"blocks":[{"t":"Para","c":[{"t":"Link","c":[["",[],[]],[],["pages/a.html",""]]}]}]}'
  exit 0
fi
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
cat > "$out"
"#;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site(dir: &Path) -> Site {
        let script = dir.join("renderer.sh");
        fs::write(&script, FAKE_RENDERER).unwrap();
        write(
            &dir.join("pages/a.md"),
            "---\ntitle: A\ntags: [rust]\ndate: 2021-01-01 00:00\n---\n",
        );
        write(
            &dir.join("pages/notes/b.md"),
            "---\ntitle: B\ndate: 2020-01-01 00:00\nplugins: osm\n---\n",
        );
        write(&dir.join("pages/img/logo.png"), "png");
        let plugin = dir.join("share/plugins/osm");
        write(&plugin.join("plugin.toml"), "include = [\"osm.js\"]\ninstall = [\"osm.js\"]\n");
        write(&plugin.join("osm.js"), "js");

        site_in(dir, vec!["sh".into(), script.to_string_lossy().into_owned()], |c| {
            c.sitemap.enable = true;
        })
    }

    #[test]
    fn test_full_build() {
        let dir = TempDir::new().unwrap();
        let site = site(dir.path());
        let public = dir.path().join("public");

        assert_eq!(build_site(&site, &BuildOptions::default()).unwrap(), 0);
        for file in [
            "a.html",
            "notes/b.html",
            "tag/rust.html",
            "year/2021.html",
            "year/2020.html",
            "index.html",
            "sitemap.html",
            "img/logo.png",
            "plugins/osm/osm.js",
        ] {
            assert!(public.join(file).is_file(), "missing {file}");
        }
        // Redirects for directories without an index
        assert!(public.join("notes/index.html").is_file());
        assert!(public.join("tag/index.html").is_file());
    }

    #[test]
    fn test_single_file_mode() {
        let dir = TempDir::new().unwrap();
        let site = site(dir.path());
        let public = dir.path().join("public");
        let file = dir.path().join("pages/notes/b.md");
        let options = BuildOptions {
            file: Some(&file),
            ..BuildOptions::default()
        };

        assert_eq!(build_site(&site, &options).unwrap(), 0);
        assert!(public.join("notes/b.html").is_file());
        assert!(!public.join("a.html").exists());
        assert!(!public.join("index.html").exists());
        assert!(!public.join("img/logo.png").exists());
    }

    #[test]
    fn test_single_file_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let site = site(dir.path());
        let broken = dir.path().join("pages/broken.md");
        write(&broken, "broken\n");

        let options = BuildOptions {
            file: Some(&broken),
            ..BuildOptions::default()
        };
        assert!(build_site(&site, &options).is_err());

        let outside = BuildOptions {
            file: Some(dir.path()),
            ..BuildOptions::default()
        };
        assert!(build_site(&site, &outside).is_err());
    }

    #[test]
    fn test_full_build_counts_failures() {
        let dir = TempDir::new().unwrap();
        let site = site(dir.path());
        write(&dir.path().join("pages/broken.md"), "broken\n");

        assert_eq!(build_site(&site, &BuildOptions::default()).unwrap(), 1);
        assert!(dir.path().join("public/a.html").is_file());
    }
}
