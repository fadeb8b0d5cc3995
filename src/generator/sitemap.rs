//! Sitemap page listing every document.
//!
//! # Output
//!
//! ```text
//! ---
//! title: Sitemap
//! ---
//!  - `2021-03-04` [Hello](pages/hello.html)
//!  - `2020-01-02` [World](pages/world.html)
//! ```
//!
//! Entries follow `[sitemap] sort`; links are mapped when the page is rendered.

use super::{summary, summary::SITEMAP_FILE, workspace};
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

const SITEMAP_SOURCE: &str = "sitemap.md";

/// Markdown source of the sitemap page.
pub fn sitemap_source(site: &Site) -> Result<String> {
    let config = &site.config;
    let date = Local::now().format(DAY_FORMAT).to_string();
    let header = site.theme.meta_header(MetaHeader::Sitemap)?;

    let mut page = fill_header(&header, "", &config.site.author, &date);
    for doc in summary::sorted(site.index.documents(), config.sitemap.sort) {
        if let Some(link) = page_link(&config.build, &doc.path) {
            let _ = writeln!(page, " - `{}` [{}]({link})", doc.day(), doc.title);
        }
    }
    Ok(page)
}

/// Write and convert the sitemap, if enabled.
pub fn generate_sitemap(site: &Site) -> Result<Option<Conversion>> {
    if !site.config.sitemap.enable {
        return Ok(None);
    }

    let workspace = workspace(site)?;
    let source = workspace.path().join(SITEMAP_SOURCE);
    fs::write(&source, sitemap_source(site)?)
        .with_context(|| format!("Failed to write `{}`", source.display()))?;

    log!("sitemap"; "{} entries", site.index.len());
    let destination = site.config.build.destination.join(SITEMAP_FILE);
    convert(site, &source, &destination, "").map(Some)
}

// ============================================================================
// Tests
// ============================================================================
