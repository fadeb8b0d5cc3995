//! Page conversion.
//!
//! # Processing Flow
//!
//! ```text
//! process_pages(source_root, destination_root)
//!     │
//!     └── collect_all_files() ──► process_single() per file
//!                                      │
//!                                      ├── not processed type ──► ignore
//!                                      └── convert()
//!                                            ├── fresh ──► skip
//!                                            └── decode ► rewrite ► encode
//! ```
//!
//! A failing document is reported and counted; the batch goes on.

use super::{collect_all_files, convert_path, links::rewrite_links, needs_rebuild};
use crate::{log, site::Site, utils::ensure_parent};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Result of converting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Destination was up to date
    Skipped,
    Written,
}

/// Counters of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: usize,
    pub skipped: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &Result<Option<Conversion>>) {
        match outcome {
            Ok(Some(Conversion::Written)) => self.written += 1,
            Ok(Some(Conversion::Skipped)) => self.skipped += 1,
            Ok(None) => self.ignored += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Convert `source` to `destination` unless the destination is fresh.
///
/// `page_tags` is the rendered tag list of the document, empty for none.
pub fn convert(site: &Site, source: &Path, destination: &Path, page_tags: &str) -> Result<Conversion> {
    if !needs_rebuild(source, destination, &site.shared_assets()) {
        log!("skip"; "{}", destination.display());
        return Ok(Conversion::Skipped);
    }
    log!("convert"; "{} -> {}", source.display(), destination.display());

    let write = || -> Result<()> {
        ensure_parent(destination)?;
        let mut tree = site.renderer.decode(source)?;
        rewrite_links(&mut tree, &site.config.path_map, &site.config.site.url);
        let params = render_params(site, source, destination, page_tags)?;
        site.renderer.encode(&tree, destination, &params)
    };
    write().with_context(|| format!("unable to convert `{}`", destination.display()))?;

    Ok(Conversion::Written)
}

/// Full renderer argument list for encoding one page.
pub fn render_params(site: &Site, source: &Path, destination: &Path, page_tags: &str) -> Result<Vec<String>> {
    let config = &site.config;
    let theme = &site.theme;
    let path_str = |p: &Path| p.to_string_lossy().into_owned();
    let var = |name: &str, value: &str| format!("{name}={value}");

    let mut params: Vec<String> = vec![
        "-f".into(),
        "json".into(),
        "-t".into(),
        "html5".into(),
        "-o".into(),
        path_str(destination),
    ];
    if let Some(style) = theme.style() {
        params.extend(["-H".into(), path_str(style)]);
    }
    params.extend([
        "-M".into(),
        var("title-prefix", &config.site.title),
        "-V".into(),
        var("siteurl", &config.site.url),
        "-V".into(),
        var("sitetitle", &config.site.title),
        "--template".into(),
        path_str(theme.template()),
        "--standalone".into(),
        "--preserve-tabs".into(),
        "--toc".into(),
        "--toc-depth=2".into(),
        "--mathml".into(),
    ]);
    if let Some(footer) = theme.footer() {
        params.extend(["-A".into(), path_str(footer)]);
    }

    let mut variable = |name: &str, value: &str| {
        params.extend(["-V".into(), var(name, value)]);
    };
    if !config.site.subtitle.is_empty() {
        variable("sitesubtitle", &config.site.subtitle);
    }
    if config.tags.enable {
        variable("globaltags", site.tag_list());
    }
    if config.yearlist.enable {
        variable("globalyears", site.year_list());
    }
    if config.social.enable {
        variable("social", &config.social.content);
    }
    if config.menu.enable {
        variable("menu", &config.menu.content);
    }
    if config.tags.page_enable && !page_tags.is_empty() {
        variable("pagetags", page_tags);
    }
    if config.pagelist.enable && !site.page_list().is_empty() {
        variable("globalpagelist", site.page_list());
    }

    if let Some(doc) = site.index.get(source) {
        for name in &doc.plugins {
            let plugin = site.plugin(name)?;
            if let Some(style) = plugin.style() {
                params.extend(["-H".into(), path_str(&style)]);
            }
            let header = plugin.header(&config.site.plugin_url(name));
            params.extend(["-V".into(), var("header-string", &header)]);
        }
    }

    if !config.theme.site_title_background.is_empty() {
        params.extend([
            "-V".into(),
            var("sitetitle-background", &config.theme.site_title_background),
        ]);
    }
    if !config.theme.copyright.is_empty() {
        params.extend(["-V".into(), var("copyright", &config.theme.copyright)]);
    }

    Ok(params)
}

/// Convert one file below `source_root` into `destination_root`.
///
/// Returns `None` for files whose type is not processed.
pub fn process_single(
    site: &Site,
    source_root: &Path,
    destination_root: &Path,
    path: &Path,
) -> Result<Option<Conversion>> {
    let Some(destination) = convert_path(&site.config.build, source_root, destination_root, path) else {
        log!("ignore"; "{}", path.display());
        return Ok(None);
    };
    let page_tags = site.page_tag_list(path);
    convert(site, path, &destination, &page_tags).map(Some)
}

/// Path of an existing `path` as seen from `source_root`.
///
/// `path` may be given relative to the working directory or absolute; it has
/// to lie below the source directory.
pub fn locate(source_root: &Path, path: &Path) -> Result<PathBuf> {
    let root = source_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve `{}`", source_root.display()))?;
    let target = path
        .canonicalize()
        .with_context(|| format!("`{}` does not exist", path.display()))?;
    let Ok(relative) = target.strip_prefix(&root) else {
        bail!(
            "`{}` is not below the source directory `{}`",
            path.display(),
            source_root.display()
        );
    };
    Ok(source_root.join(relative))
}

/// Convert every file below `source_root`, or only those below `only`.
///
/// Failures are logged and counted, never fatal for the batch.
pub fn process_pages(
    site: &Site,
    source_root: &Path,
    destination_root: &Path,
    only: Option<&Path>,
) -> Result<BatchReport> {
    let files = match only {
        None => collect_all_files(source_root),
        Some(path) => {
            let start = locate(source_root, path)?;
            if start.is_dir() {
                collect_all_files(&start)
            } else {
                vec![start]
            }
        }
    };

    let mut report = BatchReport::default();
    for path in files {
        let outcome = process_single(site, source_root, destination_root, &path);
        if let Err(err) = &outcome {
            log!("error"; "{:#}", err);
        }
        report.record(&outcome);
    }
    Ok(report)
}

// ============================================================================
// Tests
// ============================================================================
