//! Optional page features and link mapping.
//!
//! Covers `[tags]`, `[social]`, `[menu]`, `[pagelist]`, `[yearlist]`,
//! `[sitemap]` and the `[[path_map]]` table.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Date,
}

/// How a list of documents is ordered.
///
/// ```toml
/// sort = { direction = "descending", key = "date" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortDescriptor {
    pub direction: SortDirection,
    pub key: SortKey,
}

impl SortDescriptor {
    pub const fn new(direction: SortDirection, key: SortKey) -> Self {
        Self { direction, key }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// `[tags]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Pass the global tag list to every page.
    pub enable: bool,
    /// Pass each page its own tag list.
    pub page_enable: bool,
}

/// `[social]` and `[menu]` sections: raw HTML handed to the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnippetConfig {
    pub enable: bool,
    pub content: String,
}

/// `[pagelist]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageListConfig {
    pub enable: bool,
    /// Maximum number of entries, `0` for all.
    pub num_entries: usize,
    pub sort: SortDescriptor,
}

/// `[yearlist]` and `[sitemap]` sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    pub enable: bool,
    pub sort: SortDescriptor,
}

/// One `[[path_map]]` entry: links whose first segment is `base` are
/// redirected to `url`.
///
/// ```toml
/// [[path_map]]
/// base = "pages"
/// url = "p/"           # relative to [site] url unless absolute
/// absolute = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathMapEntry {
    pub base: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub absolute: bool,
}
