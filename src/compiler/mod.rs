//! Document conversion pipeline.
//!
//! - **links**: Rewrite link targets in the renderer's document tree
//! - **renderer**: Decode sources to a tree and encode trees to HTML
//! - **pages**: Per-document conversion and batch processing
//! - **assets**: Static file copy and plugin installation
//!
//! # Conversion Flow
//!
//! ```text
//! needs_rebuild() ──► decode() ──► rewrite_links() ──► encode()
//!       │               │                │                │
//!       ▼               ▼                ▼                ▼
//!  skip if fresh    renderer -t json   path map      renderer -f json
//! ```

pub mod assets;
pub mod links;
pub mod pages;
pub mod renderer;

use crate::config::BuildConfig;
use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

pub use pages::{Conversion, convert, process_pages, process_single};

/// Extension of rendered documents
pub const HTML_EXTENSION: &str = "html";

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively, sorted by path.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Decide whether `destination` has to be regenerated.
///
/// True if the destination is missing, or if the source or any non-empty
/// shared asset was modified after it. Unreadable timestamps never count
/// as newer.
pub fn needs_rebuild(source: &Path, destination: &Path, shared_assets: &[&Path]) -> bool {
    let Some(dst_time) = modified(destination) else {
        return true;
    };

    let newer = |path: &Path| {
        !path.as_os_str().is_empty() && modified(path).is_some_and(|t| t > dst_time)
    };

    newer(source) || shared_assets.iter().any(|asset| newer(asset))
}

fn modified(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Output path of a source file below `source_root`, or `None` if the file
/// type is not processed.
///
/// `pages/sub/a.md` with destination `public` becomes `public/sub/a.html`.
pub fn convert_path(
    build: &BuildConfig,
    source_root: &Path,
    destination_root: &Path,
    path: &Path,
) -> Option<PathBuf> {
    if !build.is_processed(path) {
        return None;
    }
    let relative = path.strip_prefix(source_root).ok()?;
    Some(destination_root.join(relative).with_extension(HTML_EXTENSION))
}

/// Link to the rendered page of a source path, written against the source
/// layout (`pages/a.md` becomes `pages/a.html`).
pub fn page_link(build: &BuildConfig, path: &Path) -> Option<String> {
    build
        .is_processed(path)
        .then(|| crate::utils::link_str(&path.with_extension(HTML_EXTENSION)))
}

// ============================================================================
// Tests
// ============================================================================
