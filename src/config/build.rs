//! `[build]` and `[renderer]` section configuration.
//!
//! Paths are resolved against the working directory so that the leading
//! segment of a document path (e.g. `pages/`) can be matched by `[[path_map]]`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[build]` section in mkweb.toml - input and output locations.
///
/// # Example
/// ```toml
/// [build]
/// source = "pages"
/// destination = "public"
/// static = "static"            # copied as-is; omit to copy non-page source files
/// plugins = "plugins"          # below destination
/// process_filetypes = [".md"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory of annotated source documents.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Output directory.
    #[serde(default = "defaults::build::destination")]
    #[educe(Default = defaults::build::destination())]
    pub destination: PathBuf,

    /// Directory copied verbatim into the destination.
    #[serde(default, rename = "static")]
    pub static_dir: Option<PathBuf>,

    /// Install directory of plugin files, relative to the destination.
    #[serde(default = "defaults::build::plugins")]
    #[educe(Default = defaults::build::plugins())]
    pub plugins: PathBuf,

    /// Extensions (with dot) of source files rendered to HTML.
    #[serde(default = "defaults::build::process_filetypes")]
    #[educe(Default = defaults::build::process_filetypes())]
    pub process_filetypes: Vec<String>,

    /// Parent of temporary workspaces; the system temp dir when unset.
    #[serde(default)]
    pub scratch: Option<PathBuf>,

    /// Shared data directory holding `themes/` and `plugins/`.
    /// Defaults to `<binary>/../share/mkweb`.
    #[serde(default)]
    pub share: Option<PathBuf>,
}

impl BuildConfig {
    /// Whether `path` has one of the processed extensions.
    pub fn is_processed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.process_filetypes
                    .iter()
                    .any(|t| t.strip_prefix('.').unwrap_or(t) == ext)
            })
    }

    /// Destination directory of a plugin's installed files.
    pub fn plugin_dir(&self, plugin: &str) -> PathBuf {
        self.destination.join(&self.plugins).join(plugin)
    }
}

/// `[renderer]` section - the external document converter.
///
/// # Example
/// ```toml
/// [renderer]
/// command = ["pandoc", "--data-dir", "~/.pandoc"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    /// Program and leading arguments.
    #[serde(default = "defaults::renderer::command")]
    #[educe(Default = defaults::renderer::command())]
    pub command: Vec<String>,
}
