//! Site data: document metadata, indices and the renderer's document tree.
//!
//! # Architecture
//!
//! ```text
//! source tree ──► harvest_file() ──► Document ──► SiteIndex
//!                      │                              │
//!                      └── Skipped(reason)            ├── tags
//!                                                     ├── years
//!                                                     ├── dates (newest first)
//!                                                     └── plugins
//! ```

pub mod index;
pub mod meta;
pub mod tree;

pub use index::{Groups, SiteIndex};
pub use meta::Document;
pub use tree::Node;
