//! Document metadata read from YAML front matter.
//!
//! # Format
//!
//! ```text
//! ---
//! title: Hello            # required, scalar or list (first entry wins)
//! author: [Alice, Bob]    # scalar or list
//! tags: rust              # scalar or list
//! plugins: [osm]          # scalar or list
//! language: en
//! summary: One line shown on the front page
//! date: 2021-03-04 10:00  # YYYY-MM-DD HH:MM, defaults to 2000-01-01 00:00
//! ---
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde_yaml::Value;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Front matter delimiter line
const DELIMITER: &str = "---";

/// Format of the `date` key
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format used when only the day is shown
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Reasons a file contributes no document.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid front matter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`, expected YYYY-MM-DD HH:MM")]
    InvalidDate(String),
}

/// Metadata of one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Source path, unique key of the document
    pub path: PathBuf,
    pub date: NaiveDateTime,
    pub title: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub language: String,
    pub summary: String,
    pub plugins: Vec<String>,
}

impl Document {
    /// Read and parse the front matter of the file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, MetaError> {
        let file = File::open(path).map_err(|err| MetaError::Io(path.to_path_buf(), err))?;
        let yaml = extract_front_matter(BufReader::new(file))
            .map_err(|err| MetaError::Io(path.to_path_buf(), err))?;
        Self::from_front_matter(path.to_path_buf(), &yaml)
    }

    /// Build a document from the YAML text of a front matter block.
    pub fn from_front_matter(path: PathBuf, yaml: &str) -> Result<Self, MetaError> {
        let doc: Value = serde_yaml::from_str(yaml)?;

        let title = doc
            .get("title")
            .and_then(first_scalar)
            .ok_or(MetaError::MissingField("title"))?;

        let date = match doc.get("date").and_then(scalar) {
            Some(s) => NaiveDateTime::parse_from_str(&s, DATE_FORMAT)
                .map_err(|_| MetaError::InvalidDate(s))?,
            None => default_date(),
        };

        Ok(Self {
            path,
            date,
            title,
            authors: list(doc.get("author")),
            tags: list(doc.get("tags")),
            language: doc.get("language").and_then(scalar).unwrap_or_default(),
            summary: doc.get("summary").and_then(scalar).unwrap_or_default(),
            plugins: list(doc.get("plugins")),
        })
    }

    /// Four-digit year key, e.g. `"2021"`.
    pub fn year(&self) -> String {
        format!("{:04}", self.date.year())
    }

    /// Publish day, e.g. `"2021-03-04"`.
    pub fn day(&self) -> String {
        self.date.format(DAY_FORMAT).to_string()
    }
}

/// Publish date of documents without a `date` key.
pub fn default_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Collect the lines between the first two `---` lines.
///
/// Lines before the opening delimiter are skipped. Without a closing
/// delimiter everything after the opening one is returned.
pub fn extract_front_matter<R: BufRead>(reader: R) -> io::Result<String> {
    let mut lines = reader.lines();
    let mut block = String::new();

    for line in lines.by_ref() {
        if is_delimiter(&line?) {
            break;
        }
    }
    for line in lines {
        let line = line?;
        if is_delimiter(&line) {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }

    Ok(block)
}

/// Exactly `---`; a bare `\r` left by `lines()` is tolerated.
fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar value, or the first value of a sequence.
fn first_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Sequence(items) => items.first().and_then(scalar),
        other => scalar(other),
    }
}

/// Scalar-or-sequence as an ordered list.
fn list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(other).into_iter().collect(),
        None => Vec::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
