//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// mkweb - static website generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read config from the specified file
    #[arg(short, long, default_value = "mkweb.toml")]
    pub config: PathBuf,

    /// Renderer (pandoc) binary to use
    #[arg(long)]
    pub pandoc: Option<PathBuf>,

    /// Process only this file or directory; it must be part of the
    /// configured source directory
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Copy static files to the destination
    #[arg(long)]
    pub copy: bool,

    /// Install plugin files to the destination
    #[arg(long)]
    pub plugins: bool,

    /// Show binary and shared data paths
    #[arg(long)]
    pub info: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mkweb"]);
        assert_eq!(cli.config, PathBuf::from("mkweb.toml"));
        assert!(cli.pandoc.is_none());
        assert!(cli.file.is_none());
        assert!(!cli.copy && !cli.plugins && !cli.info);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "mkweb", "-c", "site.toml", "--pandoc", "/opt/pandoc", "--file", "pages/a.md",
            "--copy", "--plugins",
        ]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.pandoc, Some(PathBuf::from("/opt/pandoc")));
        assert_eq!(cli.file, Some(PathBuf::from("pages/a.md")));
        assert!(cli.copy && cli.plugins);
    }
}
