//! Site-wide summary lists handed to every page.
//!
//! | List       | Template variable | Content                                 |
//! |------------|-------------------|-----------------------------------------|
//! | tag list   | `globaltags`      | `<ul>` of tag overview links, sorted    |
//! | year list  | `globalyears`     | year overview links, newest first       |
//! | page list  | `globalpagelist`  | `<ul>` of page links, `[pagelist] sort` |
//!
//! The same tag list markup is used for a page's own tags (`pagetags`).

use crate::compiler::{HTML_EXTENSION, links::map_link, page_link};
use crate::config::{SiteConfig, SortDescriptor, SortDirection, SortKey};
use crate::data::{Document, SiteIndex};
use std::cmp::Ordering;

/// File name of the sitemap page
pub const SITEMAP_FILE: &str = "sitemap.html";

/// Order two documents by `sort`.
pub fn compare(a: &Document, b: &Document, sort: SortDescriptor) -> Ordering {
    let ordering = match sort.key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Date => a.date.cmp(&b.date),
    };
    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Documents sorted by `sort`; ties keep path order.
pub fn sorted<'a>(docs: impl IntoIterator<Item = &'a Document>, sort: SortDescriptor) -> Vec<&'a Document> {
    let mut docs: Vec<_> = docs.into_iter().collect();
    docs.sort_by(|a, b| compare(a, b, sort));
    docs
}

/// `<ul>` of links to tag overview pages, sorted by name.
///
/// Returns an empty string for no tags.
pub fn tag_list<'a>(tags: impl IntoIterator<Item = &'a str>, site_url: &str) -> String {
    let mut tags: Vec<_> = tags.into_iter().collect();
    if tags.is_empty() {
        return String::new();
    }
    tags.sort_unstable();

    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li><a href="{site_url}tag/{tag}.{HTML_EXTENSION}">{tag}</a></li>"#))
        .collect();
    format!("<ul>{items}</ul>")
}

/// Links to year overview pages, newest year first.
pub fn year_list<'a>(years: impl IntoIterator<Item = &'a str>, site_url: &str) -> String {
    let mut years: Vec<_> = years.into_iter().collect();
    years.sort_unstable_by(|a, b| b.cmp(a));

    let links: String = years
        .iter()
        .map(|year| format!(r#"<a href="{site_url}year/{year}.{HTML_EXTENSION}">{year}</a> "#))
        .collect();
    format!("<br>{links}")
}

/// `<ul>` of page links ordered by `[pagelist] sort`.
///
/// At most `num_entries` entries are listed (`0` for all); a truncated list
/// links to the sitemap when the sitemap is enabled.
pub fn page_list(config: &SiteConfig, index: &SiteIndex) -> String {
    let site_url = &config.site.url;
    let limit = config.pagelist.num_entries;

    let pages: Vec<_> = sorted(index.documents(), config.pagelist.sort)
        .into_iter()
        .filter_map(|doc| page_link(&config.build, &doc.path).map(|link| (doc, link)))
        .collect();

    let items: String = pages
        .iter()
        .take(if limit == 0 { usize::MAX } else { limit })
        .map(|(doc, link)| {
            let url = map_link(link, &config.path_map, site_url);
            format!(r#"<li><a href="{url}">{}</a></li>"#, doc.title)
        })
        .collect();

    let mut list = format!("<ul>{items}</ul>");
    if config.sitemap.enable && limit != 0 && pages.len() > limit {
        list.push_str(&format!(
            r#"<div id="morelink"><a href="{site_url}{SITEMAP_FILE}">...</a></div>"#
        ));
    }
    list
}

// ============================================================================
// Tests
// ============================================================================
