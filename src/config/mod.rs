//! Site configuration management for `mkweb.toml`.
//!
//! # Sections
//!
//! | Section               | Purpose                                         |
//! |-----------------------|-------------------------------------------------|
//! | `[site]`              | Site metadata (title, url, author, language)    |
//! | `[build]`             | Source, destination, static and plugin paths    |
//! | `[renderer]`          | Renderer command line                           |
//! | `[theme]`             | Theme selection and theme variables             |
//! | `[[path_map]]`        | Link root rewriting                             |
//! | `[tags]`              | Global and per-page tag lists                   |
//! | `[social]`, `[menu]`  | HTML snippets passed to the template            |
//! | `[pagelist]`          | Global page list                                |
//! | `[yearlist]`          | Year overview links and ordering                |
//! | `[sitemap]`           | Sitemap page                                    |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! url = "https://example.com/"
//! author = "Alice"
//!
//! [build]
//! source = "pages"
//! destination = "public"
//!
//! [[path_map]]
//! base = "pages"
//! url = ""
//!
//! [social]
//! enable = true
//! content = "<a href='${site_url}about.html'>about</a>"
//! ```
//!
//! String values may reference `${site_url}`, `${site_title}`,
//! `${site_subtitle}`, `${author}` and `${language}`; unknown variables
//! expand to nothing.

mod build;
pub mod defaults;
mod error;
mod features;
mod site;
mod theme;

pub use build::{BuildConfig, RendererConfig};
pub use error::ConfigError;
pub use features::{PathMapEntry, SortDescriptor, SortDirection, SortKey};

use features::{ListConfig, PageListConfig, SnippetConfig, TagsConfig};
use site::BaseConfig;
use theme::ThemeConfig;

use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use educe::Educe;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

/// Pattern of a `${name}` reference
const VARIABLE_PATTERN: &str = r"\$\{([0-9A-Za-z_]+)\}";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing mkweb.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path of the config file (set after loading); a shared build input
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: BaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub renderer: RendererConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub path_map: Vec<PathMapEntry>,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub social: SnippetConfig,

    #[serde(default)]
    pub menu: SnippetConfig,

    #[serde(default)]
    pub pagelist: PageListConfig,

    #[serde(default)]
    pub yearlist: ListConfig,

    #[serde(default)]
    pub sitemap: ListConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("Failed to parse `{}`", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load, resolve and validate the configuration named on the command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = Self::from_path(&cli.config)?;
        config.update_with_cli(cli)?;
        config.resolve()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides.
    pub fn update_with_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(pandoc) = &cli.pandoc {
            if !pandoc.exists() {
                bail!(ConfigError::RendererNotFound(pandoc.clone()));
            }
            let program = pandoc.to_string_lossy().into_owned();
            match self.renderer.command.first_mut() {
                Some(first) => *first = program,
                None => self.renderer.command.push(program),
            }
        }
        Ok(())
    }

    /// Expand `~` in paths and substitute `${name}` variables in strings.
    pub fn resolve(&mut self) -> Result<()> {
        for path in [&mut self.build.source, &mut self.build.destination] {
            *path = expand_tilde(path);
        }
        for path in [
            &mut self.build.static_dir,
            &mut self.build.scratch,
            &mut self.build.share,
            &mut self.theme.dir,
        ]
        .into_iter()
        .flatten()
        {
            *path = expand_tilde(path);
        }

        let pattern = Regex::new(VARIABLE_PATTERN).context("Invalid variable pattern")?;
        let vars = self.variables();
        let substitute = |s: &mut String| {
            *s = pattern
                .replace_all(s, |caps: &Captures| {
                    vars.get(&caps[1]).cloned().unwrap_or_default()
                })
                .into_owned();
        };

        substitute(&mut self.site.subtitle);
        substitute(&mut self.site.plugin_url);
        substitute(&mut self.social.content);
        substitute(&mut self.menu.content);
        substitute(&mut self.theme.site_title_background);
        substitute(&mut self.theme.copyright);
        for entry in &mut self.path_map {
            substitute(&mut entry.url);
        }

        Ok(())
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<()> {
        let mut bases = BTreeSet::new();
        for entry in &self.path_map {
            if entry.base.is_empty() {
                bail!(ConfigError::Validation("[[path_map]] base must not be empty".into()));
            }
            if !bases.insert(entry.base.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "duplicate [[path_map]] base `{}`",
                    entry.base
                )));
            }
        }

        if self.build.process_filetypes.is_empty() {
            bail!(ConfigError::Validation(
                "[build.process_filetypes] must have at least one element".into()
            ));
        }

        Self::check_command_installed("[renderer.command]", &self.renderer.command)?;

        Ok(())
    }

    /// Values available to `${name}` substitution.
    fn variables(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("site_url", self.site.url.clone()),
            ("site_title", self.site.title.clone()),
            ("site_subtitle", self.site.subtitle.clone()),
            ("author", self.site.author.clone()),
            ("language", self.site.language.clone()),
        ])
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        let Some(cmd) = command.first() else {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        };

        which::which(cmd)
            .with_context(|| format!("`{cmd}` not found. Please install it first."))?;

        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn resolved(content: &str) -> SiteConfig {
        let mut config = SiteConfig::from_str(content).unwrap();
        config.resolve().unwrap();
        config
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[site\ntitle = \"x\"\n");
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        assert!(SiteConfig::from_str("[serve]\nport = 1\n").is_err());
    }

    #[test]
    fn test_from_path_missing() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/mkweb.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(..))
        ));
    }

    #[test]
    fn test_from_path_records_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mkweb.toml");
        fs::write(&path, "[site]\ntitle = \"T\"\n").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert_eq!(config.config_path, path);
        assert_eq!(config.site.title, "T");
    }

    #[test]
    fn test_variable_substitution() {
        let config = resolved(
            r#"
            [site]
            url = "https://x/"
            author = "Alice"
            [theme]
            copyright = "2024 ${author}, ${unknown}end"
            [social]
            content = "<a href='${site_url}me.html'>me</a>"
            [[path_map]]
            base = "pages"
            url = "${site_url}p/"
            absolute = true
        "#,
        );

        assert_eq!(config.theme.copyright, "2024 Alice, end");
        assert_eq!(config.social.content, "<a href='https://x/me.html'>me</a>");
        assert_eq!(config.path_map[0].url, "https://x/p/");
        assert_eq!(config.site.plugin_url, "https://x/plugins/");
    }

    #[test]
    fn test_duplicate_path_map_base() {
        let config = resolved(
            r#"
            [[path_map]]
            base = "pages"
            url = "a/"
            [[path_map]]
            base = "pages"
            url = "b/"
        "#,
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate [[path_map]] base `pages`"));
    }

    #[test]
    fn test_empty_renderer_command() {
        let config = resolved("[renderer]\ncommand = []\n");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[renderer.command]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_with_available_renderer() {
        let config = resolved("[renderer]\ncommand = [\"sh\"]\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pandoc_override() {
        let dir = TempDir::new().unwrap();
        let pandoc = dir.path().join("pandoc");
        fs::write(&pandoc, "").unwrap();

        let cli = Cli::parse_from(["mkweb", "--pandoc", pandoc.to_str().unwrap()]);
        let mut config = resolved("[renderer]\ncommand = [\"pandoc\", \"--quiet\"]\n");
        config.update_with_cli(&cli).unwrap();
        assert_eq!(config.renderer.command, [pandoc.to_str().unwrap(), "--quiet"]);

        let cli = Cli::parse_from(["mkweb", "--pandoc", "/nonexistent/pandoc"]);
        let err = config.update_with_cli(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::RendererNotFound(_))
        ));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = resolved("[build]\nsource = \"~/pages\"\n");
        assert!(!config.build.source.starts_with("~"));
        assert!(config.build.source.ends_with("pages"));
    }
}
