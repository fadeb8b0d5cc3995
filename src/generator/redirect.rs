//! Redirect pages for directories without an index.
//!
//! Browsing to `public/tag/` would otherwise list the directory or fail; a
//! meta refresh to the site URL is written as its `index.html`.

use crate::{log, site::Site};
use std::{fs, path::Path};
use walkdir::WalkDir;

const INDEX_FILE: &str = "index.html";

/// Meta refresh page pointing at `url`.
pub fn redirect_page(url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta http-equiv=\"refresh\" content=\"0;url={url}\"></head><body></body></html>\n"
    )
}

/// Write a redirect into every directory below `root` lacking an index.
///
/// `root` itself is left alone. Returns the number of pages written; write
/// failures are logged and skipped.
pub fn write_redirects(root: &Path, url: &str) -> usize {
    let page = redirect_page(url);
    let dirs = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir());

    let mut written = 0;
    for dir in dirs {
        let index = dir.path().join(INDEX_FILE);
        if index.exists() {
            continue;
        }
        match fs::write(&index, &page) {
            Ok(()) => written += 1,
            Err(err) => log!("warn"; "unable to write `{}`: {}", index.display(), err),
        }
    }
    written
}

/// Redirect pages for the whole destination tree.
pub fn generate_redirects(site: &Site) -> usize {
    let written = write_redirects(&site.config.build.destination, &site.config.site.url);
    log!("redirect"; "{} directories", written);
    written
}

// ============================================================================
// Tests
// ============================================================================
