//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn title() -> String {
        "TITLE".into()
    }

    pub fn num_news() -> usize {
        8
    }

    pub fn plugin_url() -> String {
        "${site_url}plugins/".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn source() -> PathBuf {
        "pages".into()
    }

    pub fn destination() -> PathBuf {
        "public".into()
    }

    pub fn plugins() -> PathBuf {
        "plugins".into()
    }

    pub fn process_filetypes() -> Vec<String> {
        vec![".md".into()]
    }
}

// ============================================================================
// [renderer] Section Defaults
// ============================================================================

pub mod renderer {
    pub fn command() -> Vec<String> {
        vec!["pandoc".into()]
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub fn name() -> String {
        "default".into()
    }
}
