//! Plugin resolution.
//!
//! A plugin lives in `<share>/plugins/<name>/`:
//!
//! ```text
//! osm/
//! ├── plugin.toml     # include = ["osm.js"], install = ["osm.js", "icons"]
//! ├── style.html      # optional, included in <head> of using pages
//! └── osm.js
//! ```
//!
//! `include` lists scripts referenced from pages using the plugin,
//! `install` lists files or directories copied to the destination.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const MANIFEST: &str = "plugin.toml";
const STYLE: &str = "style.html";

/// Contents of `plugin.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginManifest {
    pub include: Vec<String>,
    pub install: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Plugin {
    name: String,
    dir: PathBuf,
    manifest: PluginManifest,
}

impl Plugin {
    /// Load the plugin `name` from `<share>/plugins`.
    pub fn load(share: &Path, name: &str) -> Result<Self> {
        let dir = share.join("plugins").join(name);
        let manifest_path = dir.join(MANIFEST);
        let content = fs::read_to_string(&manifest_path).with_context(|| {
            format!("unable to read configuration for plugin `{name}`: `{}`", manifest_path.display())
        })?;
        let manifest = toml::from_str(&content)
            .with_context(|| format!("invalid `{}`", manifest_path.display()))?;

        Ok(Self {
            name: name.to_owned(),
            dir,
            manifest,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub const fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Style snippet included in the head of using pages, if present.
    pub fn style(&self) -> Option<PathBuf> {
        Some(self.dir.join(STYLE)).filter(|p| p.is_file())
    }

    /// `<script>` tags for every included file, served from `base_url`.
    pub fn header(&self, base_url: &str) -> String {
        self.manifest
            .include
            .iter()
            .map(|file| {
                format!(r#"<script type="text/javascript" src="{base_url}{file}"></script>"#)
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
