//! Front page (`index.html`) listing the newest documents.

use crate::{
    compiler::{Conversion, convert, page_link},
    data::meta::DAY_FORMAT,
    log,
    site::Site,
    theme::{MetaHeader, fill_header},
};
use anyhow::{Context, Result};
use chrono::Local;
use std::{fmt::Write as _, fs};

const FRONT_SOURCE: &str = "index.md";
const FRONT_PAGE: &str = "index.html";

/// Markdown source of the front page.
pub fn front_page_source(site: &Site) -> Result<String> {
    let config = &site.config;
    let date = Local::now().format(DAY_FORMAT).to_string();
    let header = site.theme.meta_header(MetaHeader::Contents)?;

    let mut page = fill_header(&header, "", &config.site.author, &date);
    page.push_str(site.theme.title_newest_entries()?.trim_end());
    page.push_str("\n\n");

    let entries = site
        .index
        .newest()
        .filter_map(|doc| page_link(&config.build, &doc.path).map(|link| (doc, link)))
        .take(config.site.num_news);
    for (doc, link) in entries {
        let _ = writeln!(page, "  - `{}` : [{}]({link})", doc.day(), doc.title);
        if !doc.summary.is_empty() {
            let _ = writeln!(page, "\n    {}", doc.summary);
        }
        page.push('\n');
    }
    Ok(page)
}

/// Write and convert the front page into the destination root.
pub fn generate_front_page(site: &Site) -> Result<Conversion> {
    let workspace = super::workspace(site)?;

    let source = workspace.path().join(FRONT_SOURCE);
    fs::write(&source, front_page_source(site)?)
        .with_context(|| format!("Failed to write `{}`", source.display()))?;

    log!("front"; "{} entries", site.index.len().min(site.config.site.num_news));
    convert(site, &source, &site.config.build.destination.join(FRONT_PAGE), "")
}

// ============================================================================
// Tests
// ============================================================================
