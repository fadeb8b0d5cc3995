//! Generated pages.
//!
//! - **summary**: Tag, year and page lists passed to every page
//! - **overview**: One page per tag and per year
//! - **front**: `index.html` with the newest entries
//! - **sitemap**: `sitemap.html` with all entries
//! - **redirect**: Meta refresh pages for directories without an index
//!
//! Generated sources are written to a temporary workspace below the scratch
//! directory and converted with the regular page pipeline.

pub mod front;
pub mod overview;
pub mod redirect;
pub mod sitemap;
pub mod summary;

use crate::site::Site;
use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary directory for generated sources, removed on drop.
fn workspace(site: &Site) -> Result<TempDir> {
    let scratch = site.scratch_dir();
    tempfile::Builder::new()
        .prefix("mkwebtmp-")
        .tempdir_in(&scratch)
        .with_context(|| format!("Failed to create workspace in `{}`", scratch.display()))
}
