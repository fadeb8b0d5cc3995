//! Cross-referencing indices over all harvested documents.
//!
//! # Indices
//!
//! | Index     | Key                 | Value                           |
//! |-----------|---------------------|---------------------------------|
//! | documents | source path         | [`Document`]                    |
//! | tags      | tag name            | paths, in traversal order       |
//! | years     | four-digit year     | paths, in traversal order       |
//! | dates     | publish date (desc) | paths, in traversal order       |
//! | plugins   | plugin name         | -                               |
//!
//! Indices are rebuilt from scratch on every run and never persisted.

use super::meta::{Document, MetaError};
use crate::{debug, log};
use chrono::NaiveDateTime;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    io::ErrorKind,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Outcome of harvesting one file.
#[derive(Debug)]
pub enum Harvested {
    Document(Document),
    Skipped(MetaError),
}

/// Harvest the front matter of a single file.
pub fn harvest_file(path: &Path) -> Harvested {
    match Document::from_path(path) {
        Ok(doc) => Harvested::Document(doc),
        Err(err) => Harvested::Skipped(err),
    }
}

/// Group name to member paths.
pub type Groups = BTreeMap<String, Vec<PathBuf>>;

/// All documents of a site and the indices derived from them.
#[derive(Debug, Default)]
pub struct SiteIndex {
    documents: BTreeMap<PathBuf, Document>,
    tags: Groups,
    years: Groups,
    dates: BTreeMap<Reverse<NaiveDateTime>, Vec<PathBuf>>,
    plugins: BTreeSet<String>,
}

impl SiteIndex {
    /// Walk `root` and index every file with usable front matter.
    ///
    /// Files are visited sorted by name. A missing root yields an empty index.
    pub fn harvest(root: &Path) -> Self {
        let mut index = Self::default();
        if !root.is_dir() {
            return index;
        }

        let files = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file());

        for entry in files {
            match harvest_file(entry.path()) {
                Harvested::Document(doc) => index.insert(doc),
                // Non-text files are expected below the source root.
                Harvested::Skipped(MetaError::Io(path, err))
                    if err.kind() != ErrorKind::InvalidData =>
                {
                    log!("warn"; "cannot read `{}`: {}", path.display(), err);
                }
                Harvested::Skipped(reason) => {
                    debug!("harvest"; "skip {}: {}", entry.path().display(), reason);
                }
            }
        }

        log!(
            "harvest";
            "{} documents, {} tags, {} years",
            index.documents.len(),
            index.tags.len(),
            index.years.len()
        );
        index
    }

    /// Register a document and fan it into all indices.
    pub fn insert(&mut self, doc: Document) {
        let path = doc.path.clone();

        for tag in &doc.tags {
            push_unique(self.tags.entry(tag.clone()).or_default(), &path);
        }
        push_unique(self.years.entry(doc.year()).or_default(), &path);
        push_unique(self.dates.entry(Reverse(doc.date)).or_default(), &path);
        self.plugins.extend(doc.plugins.iter().cloned());

        self.documents.insert(path, doc);
    }

    pub fn get(&self, path: &Path) -> Option<&Document> {
        self.documents.get(path)
    }

    /// All documents, ordered by path.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub const fn tags(&self) -> &Groups {
        &self.tags
    }

    pub const fn years(&self) -> &Groups {
        &self.years
    }

    pub const fn plugins(&self) -> &BTreeSet<String> {
        &self.plugins
    }

    /// Documents newest first; equal dates keep traversal order.
    pub fn newest(&self) -> impl Iterator<Item = &Document> {
        self.dates
            .values()
            .flatten()
            .filter_map(|path| self.documents.get(path))
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, path: &Path) {
    if !paths.iter().any(|p| p == path) {
        paths.push(path.to_path_buf());
    }
}

// ============================================================================
// Tests
// ============================================================================
