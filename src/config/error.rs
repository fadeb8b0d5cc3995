//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run before any document is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not readable: `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("renderer executable not found: `{0}`")]
    RendererNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("mkweb.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("not readable"));
        assert!(display.contains("mkweb.toml"));

        let validation_err = ConfigError::Validation("duplicate path_map base `pages`".into());
        assert!(format!("{validation_err}").contains("duplicate path_map base"));

        let missing = ConfigError::RendererNotFound(PathBuf::from("/opt/pandoc"));
        assert!(format!("{missing}").contains("/opt/pandoc"));
    }
}
