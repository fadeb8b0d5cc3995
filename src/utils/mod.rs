//! Utility modules and filesystem helpers.

pub mod exec;

use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

/// Name of the per-installation data directory below `share/`
const SHARE_NAME: &str = "mkweb";

/// Directory containing the running binary.
pub fn binary_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running binary")?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

/// Shared data directory of the installation: `<binary>/../share/mkweb`.
pub fn default_share_dir() -> Result<PathBuf> {
    Ok(binary_dir()?.join("..").join("share").join(SHARE_NAME))
}

/// Create the parent directory of `path` if missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
    }
    Ok(())
}

/// Render a path as a link target, always with `/` separators.
pub fn link_str(path: &Path) -> String {
    let mut link = String::new();
    for component in path.components() {
        if !link.is_empty() && !link.ends_with('/') {
            link.push('/');
        }
        match component {
            Component::RootDir => link.push('/'),
            other => link.push_str(&other.as_os_str().to_string_lossy()),
        }
    }
    link
}
