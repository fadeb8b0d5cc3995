//! Theme resolution.
//!
//! A theme is a directory below `<share>/themes` (or `[theme] dir`):
//!
//! ```text
//! default.en/                 # preferred when [site] language = "en"
//! default/
//! ├── template.html           # renderer template (required)
//! ├── style.html              # included in <head>
//! ├── footer.html             # appended after the body
//! ├── meta-tags.txt           # front matter of tag overview pages
//! ├── meta-year.txt           # front matter of year overview pages
//! ├── meta-contents.txt       # front matter of the front page
//! ├── meta-sitemap.txt        # front matter of the sitemap page
//! └── title_newest_entries.txt
//! ```
//!
//! Meta header files may use the placeholders `{id}`, `{author}` and `{date}`.
//! Missing optional files fall back to built-in defaults.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

const TEMPLATE: &str = "template.html";
const STYLE: &str = "style.html";
const FOOTER: &str = "footer.html";
const TITLE_NEWEST_ENTRIES: &str = "title_newest_entries.txt";

const DEFAULT_TITLE_NEWEST_ENTRIES: &str = "Newest Entries:";

/// Front matter header of a generated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaHeader {
    Tags,
    Years,
    Contents,
    Sitemap,
}

impl MetaHeader {
    const fn file_name(self) -> &'static str {
        match self {
            Self::Tags => "meta-tags.txt",
            Self::Years => "meta-year.txt",
            Self::Contents => "meta-contents.txt",
            Self::Sitemap => "meta-sitemap.txt",
        }
    }

    const fn default_text(self) -> &'static str {
        match self {
            Self::Tags => {
                "---\ntitle: \"Tag Overview: {id}\"\nauthor: {author}\ndate: {date}\nlanguage: en\n---\n"
            }
            Self::Years => {
                "---\ntitle: \"Year Overview: {id}\"\nauthor: {author}\ndate: {date}\nlanguage: en\n---\n"
            }
            Self::Contents => {
                "---\ntitle: Contents\nauthor: {author}\ndate: {date}\nlanguage: en\n---\n"
            }
            Self::Sitemap => {
                "---\ntitle: Sitemap\nauthor: {author}\ndate: {date}\nlanguage: en\n---\n"
            }
        }
    }
}

/// Resolved theme files.
#[derive(Debug, Clone)]
pub struct Theme {
    dir: PathBuf,
    template: PathBuf,
    style: Option<PathBuf>,
    footer: Option<PathBuf>,
}

impl Theme {
    /// Locate the configured theme below `share`.
    pub fn resolve(config: &SiteConfig, share: &Path) -> Result<Self> {
        let themes = config
            .theme
            .dir
            .clone()
            .unwrap_or_else(|| share.join("themes"));
        let name = &config.theme.name;
        let language = &config.site.language;

        let localized = themes.join(format!("{name}.{language}"));
        let dir = if !language.is_empty() && localized.is_dir() {
            localized
        } else {
            themes.join(name)
        };

        Self::from_dir(dir)
    }

    /// Use `dir` as theme directory.
    pub fn from_dir(dir: PathBuf) -> Result<Self> {
        let template = dir.join(TEMPLATE);
        if !template.is_file() {
            bail!("theme template not found: `{}`", template.display());
        }
        let existing = |name: &str| Some(dir.join(name)).filter(|p| p.is_file());

        Ok(Self {
            style: existing(STYLE),
            footer: existing(FOOTER),
            template,
            dir,
        })
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn style(&self) -> Option<&Path> {
        self.style.as_deref()
    }

    pub fn footer(&self) -> Option<&Path> {
        self.footer.as_deref()
    }

    /// Front matter template for a generated page.
    pub fn meta_header(&self, kind: MetaHeader) -> Result<String> {
        self.read_or(kind.file_name(), kind.default_text())
    }

    /// Heading above the front page entries.
    pub fn title_newest_entries(&self) -> Result<String> {
        self.read_or(TITLE_NEWEST_ENTRIES, DEFAULT_TITLE_NEWEST_ENTRIES)
    }

    fn read_or(&self, name: &str, default: &str) -> Result<String> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(default.to_owned());
        }
        fs::read_to_string(&path).with_context(|| format!("Failed to read `{}`", path.display()))
    }
}

/// Fill `{id}`, `{author}` and `{date}` placeholders of a meta header.
pub fn fill_header(template: &str, id: &str, author: &str, date: &str) -> String {
    template
        .replace("{id}", id)
        .replace("{author}", author)
        .replace("{date}", date)
}

// ============================================================================
// Tests
// ============================================================================
