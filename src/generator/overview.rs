//! Tag and year overview pages.
//!
//! Every group becomes a generated markdown page in a temporary workspace,
//! which is then converted like any other source tree:
//!
//! ```text
//! tags["rust"] = [a.md, b.md]
//!
//! <scratch>/mkwebtmp-XXXX/rust.md            public/tag/rust.html
//! ---                                        ▲
//! title: "Tag Overview: rust"                │ process_pages()
//! ---                                        │
//! - [A](pages/a.html)  ──────────────────────┘
//! - [B](pages/b.html)
//! ```

use super::{summary, workspace};
use crate::{
    compiler::{page_link, pages::BatchReport, process_pages},
    config::{SortDescriptor, SortDirection, SortKey},
    data::{Document, Groups, meta::DAY_FORMAT},
    log,
    site::Site,
    theme::{MetaHeader, fill_header},
};
use anyhow::{Context, Result};
use chrono::Local;
use std::{fmt::Write as _, fs, path::Path};

/// Which index an overview is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewKind {
    Tags,
    Years,
}

impl OverviewKind {
    pub const fn header(self) -> MetaHeader {
        match self {
            Self::Tags => MetaHeader::Tags,
            Self::Years => MetaHeader::Years,
        }
    }

    /// Output directory below the destination.
    pub const fn subdirectory(self) -> &'static str {
        match self {
            Self::Tags => "tag",
            Self::Years => "year",
        }
    }

    fn sort(self, site: &Site) -> SortDescriptor {
        match self {
            Self::Tags => SortDescriptor::new(SortDirection::Ascending, SortKey::Title),
            Self::Years => site.config.yearlist.sort,
        }
    }

    fn decoration(self, doc: &Document) -> String {
        match self {
            Self::Tags => String::new(),
            Self::Years => format!("`{}` ", doc.day()),
        }
    }
}

/// Generate one overview page per group into `output_subdirectory`.
pub fn generate_overview(
    site: &Site,
    groups: &Groups,
    kind: OverviewKind,
    meta_template: &str,
    output_subdirectory: &Path,
) -> Result<BatchReport> {
    let workspace = workspace(site)?;

    let date = Local::now().format(DAY_FORMAT).to_string();
    let author = &site.config.site.author;

    for (group, paths) in groups {
        let mut page = fill_header(meta_template, group, author, &date);
        let members = summary::sorted(paths.iter().filter_map(|p| site.index.get(p)), kind.sort(site));
        for doc in members {
            let Some(link) = page_link(&site.config.build, &doc.path) else {
                continue;
            };
            let _ = writeln!(page, "- {}[{}]({link})", kind.decoration(doc), doc.title);
        }

        let file = workspace.path().join(format!("{group}.md"));
        fs::write(&file, page)
            .with_context(|| format!("unable to write overview for `{group}`"))?;
    }

    log!("overview"; "{} {} pages", groups.len(), kind.subdirectory());
    process_pages(site, workspace.path(), output_subdirectory, None)
}

/// Generate the overview of `kind` with the theme's header into its
/// default subdirectory of the destination.
pub fn generate(site: &Site, kind: OverviewKind) -> Result<BatchReport> {
    let groups = match kind {
        OverviewKind::Tags => site.index.tags(),
        OverviewKind::Years => site.index.years(),
    };
    let template = site.theme.meta_header(kind.header())?;
    let output = site.config.build.destination.join(kind.subdirectory());
    generate_overview(site, groups, kind, &template, &output)
}

// ============================================================================
// Tests
// ============================================================================
