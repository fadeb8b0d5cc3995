//! `[theme]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[theme]` section in mkweb.toml.
///
/// # Example
/// ```toml
/// [theme]
/// name = "default"
/// dir = "~/themes"                  # defaults to <share>/themes
/// site_title_background = "#334"
/// copyright = "2024 ${author}"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default = "defaults::theme::name")]
    #[educe(Default = defaults::theme::name())]
    pub name: String,

    /// Directory containing theme directories.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub site_title_background: String,

    #[serde(default)]
    pub copyright: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_theme_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.name, "default");
        assert!(config.theme.dir.is_none());
        assert!(config.theme.copyright.is_empty());
    }
}
