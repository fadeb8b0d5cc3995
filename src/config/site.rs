//! `[site]` section configuration.
//!
//! Site-wide metadata passed to every rendered page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in mkweb.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Blog"
/// subtitle = "notes and such"
/// url = "https://example.com/"
/// author = "Alice"
/// language = "en"
/// num_news = 8
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, also used as the page title prefix.
    #[serde(default = "defaults::site::title")]
    #[educe(Default = defaults::site::title())]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    /// Base URL; rewritten links and summary lists are prefixed with it.
    /// Expected to end with `/`.
    #[serde(default)]
    pub url: String,

    /// Author of generated pages (front page, overviews, sitemap).
    #[serde(default)]
    pub author: String,

    /// Language code, selects `<theme>.<language>` theme variants.
    #[serde(default)]
    pub language: String,

    /// Number of entries on the front page.
    #[serde(default = "defaults::site::num_news")]
    #[educe(Default = defaults::site::num_news())]
    pub num_news: usize,

    /// URL under which installed plugins are served.
    #[serde(default = "defaults::site::plugin_url")]
    #[educe(Default = defaults::site::plugin_url())]
    pub plugin_url: String,
}

impl BaseConfig {
    /// URL of a plugin's installed files, ending with `/`.
    pub fn plugin_url(&self, plugin: &str) -> String {
        format!("{}{plugin}/", self.plugin_url)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_config_full() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Notes"
            subtitle = "sub"
            url = "https://example.com/"
            author = "Alice"
            language = "en"
            num_news = 3
            plugin_url = "https://cdn.example.com/"
        "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.num_news, 3);
        assert_eq!(config.site.plugin_url("osm"), "https://cdn.example.com/osm/");
    }

    #[test]
    fn test_site_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]\n").unwrap();

        assert_eq!(config.site.title, "TITLE");
        assert_eq!(config.site.url, "");
        assert_eq!(config.site.num_news, 8);
        assert_eq!(config.site.plugin_url, "${site_url}plugins/");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str("[site]\ndescription = \"x\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
