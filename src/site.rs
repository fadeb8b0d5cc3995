//! Per-run site context.
//!
//! Everything the pipeline stages share is resolved once up front:
//!
//! ```text
//! SiteConfig ──► Site::new()
//!                   ├── share dir, Theme
//!                   ├── Renderer
//!                   ├── SiteIndex::harvest(source)
//!                   ├── referenced plugins
//!                   └── tag, year and page summary lists
//! ```

use crate::{
    compiler::renderer::Renderer,
    config::SiteConfig,
    data::SiteIndex,
    generator::summary,
    log,
    plugin::Plugin,
    theme::Theme,
    utils,
};
use anyhow::{Result, anyhow};
use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub theme: Theme,
    pub renderer: Renderer,
    pub index: SiteIndex,
    plugins: BTreeMap<String, Plugin>,
    tag_list: String,
    year_list: String,
    page_list: String,
}

impl Site {
    /// Resolve theme and renderer, harvest the source tree and compute the
    /// summary lists.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let share = match &config.build.share {
            Some(dir) => dir.clone(),
            None => utils::default_share_dir()?,
        };
        let theme = Theme::resolve(&config, &share)?;
        let renderer = Renderer::new(config.renderer.command.clone())?;
        let index = SiteIndex::harvest(&config.build.source);
        Ok(Self::with_index(config, &share, theme, renderer, index))
    }

    /// Assemble a site from already resolved parts.
    pub fn with_index(
        config: SiteConfig,
        share: &Path,
        theme: Theme,
        renderer: Renderer,
        index: SiteIndex,
    ) -> Self {
        let mut plugins = BTreeMap::new();
        for name in index.plugins() {
            match Plugin::load(share, name) {
                Ok(plugin) => {
                    plugins.insert(name.clone(), plugin);
                }
                Err(err) => log!("warn"; "{:#}", err),
            }
        }

        let site_url = &config.site.url;
        let tag_list = summary::tag_list(index.tags().keys().map(String::as_str), site_url);
        let year_list = summary::year_list(index.years().keys().map(String::as_str), site_url);
        let page_list = summary::page_list(&config, &index);

        Self {
            config,
            theme,
            renderer,
            index,
            plugins,
            tag_list,
            year_list,
            page_list,
        }
    }

    /// A plugin referenced by some document.
    pub fn plugin(&self, name: &str) -> Result<&Plugin> {
        self.plugins
            .get(name)
            .ok_or_else(|| anyhow!("plugin `{name}` is not available"))
    }

    /// Plugin names referenced by any document.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.index.plugins().iter().map(String::as_str)
    }

    /// Files every rendered page depends on.
    pub fn shared_assets(&self) -> Vec<&Path> {
        let mut assets = vec![self.theme.template()];
        assets.extend(self.theme.style());
        assets.extend(self.theme.footer());
        assets.push(&self.config.config_path);
        assets
    }

    /// Parent directory of temporary workspaces.
    pub fn scratch_dir(&self) -> PathBuf {
        self.config.build.scratch.clone().unwrap_or_else(env::temp_dir)
    }

    pub fn tag_list(&self) -> &str {
        &self.tag_list
    }

    pub fn year_list(&self) -> &str {
        &self.year_list
    }

    pub fn page_list(&self) -> &str {
        &self.page_list
    }

    /// Tag list of a single harvested document, empty if it has no tags.
    pub fn page_tag_list(&self, path: &Path) -> String {
        self.index.get(path).map_or_else(String::new, |doc| {
            summary::tag_list(doc.tags.iter().map(String::as_str), &self.config.site.url)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A site rooted in `dir` with a minimal theme and no plugins.
    pub(crate) fn site_in(dir: &Path, renderer: Vec<String>, configure: impl FnOnce(&mut SiteConfig)) -> Site {
        let share = dir.join("share");
        let theme_dir = share.join("themes/default");
        fs::create_dir_all(&theme_dir).unwrap();
        fs::write(theme_dir.join("template.html"), "$body$").unwrap();

        let mut config = SiteConfig::default();
        config.build.source = dir.join("pages");
        config.build.destination = dir.join("public");
        config.build.share = Some(share);
        config.build.scratch = Some(dir.join("scratch"));
        config.site.url = "https://x/".into();
        configure(&mut config);
        fs::create_dir_all(&config.build.source).unwrap();
        if let Some(scratch) = &config.build.scratch {
            fs::create_dir_all(scratch).unwrap();
        }
        config.renderer.command = renderer;
        Site::new(config).unwrap()
    }

    #[test]
    fn test_new_computes_summaries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(
            dir.path().join("pages/a.md"),
            "---\ntitle: A\ntags: [rust]\ndate: 2021-02-03 04:05\n---\n",
        )
        .unwrap();

        let site = site_in(dir.path(), vec!["true".into()], |_| {});
        assert_eq!(site.index.len(), 1);
        assert!(site.tag_list().contains("https://x/tag/rust.html"));
        assert!(site.year_list().contains("https://x/year/2021.html"));
        assert!(site.page_tag_list(&dir.path().join("pages/a.md")).contains(">rust<"));
        assert_eq!(site.page_tag_list(Path::new("missing.md")), "");
    }

    #[test]
    fn test_missing_plugin_is_not_available() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/a.md"), "---\ntitle: A\nplugins: osm\n---\n").unwrap();

        let site = site_in(dir.path(), vec!["true".into()], |_| {});
        assert_eq!(site.plugin_names().collect::<Vec<_>>(), ["osm"]);
        let err = site.plugin("osm").unwrap_err();
        assert!(err.to_string().contains("plugin `osm` is not available"));
    }

    #[test]
    fn test_shared_assets_and_scratch() {
        let dir = TempDir::new().unwrap();
        let site = site_in(dir.path(), vec!["true".into()], |c| {
            c.config_path = PathBuf::from("mkweb.toml");
        });

        let assets = site.shared_assets();
        assert_eq!(assets.len(), 2);
        assert!(assets[0].ends_with("template.html"));
        assert_eq!(assets[1], Path::new("mkweb.toml"));
        assert_eq!(site.scratch_dir(), dir.path().join("scratch"));
    }
}
