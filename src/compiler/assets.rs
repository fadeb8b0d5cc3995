//! Static file copy and plugin installation.

use super::{collect_all_files, needs_rebuild};
use crate::{log, plugin::Plugin, site::Site, utils::ensure_parent};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Copy static files into the destination, only where the copy is stale.
///
/// With `[build] static` set that directory is copied; otherwise every
/// source file whose type is not processed. Returns the number of copies.
pub fn copy_static(site: &Site) -> Result<usize> {
    let build = &site.config.build;
    let (root, skip_processed) = match &build.static_dir {
        Some(dir) => (dir.as_path(), false),
        None => (build.source.as_path(), true),
    };

    let mut copied = 0;
    for path in collect_all_files(root) {
        if skip_processed && build.is_processed(&path) {
            continue;
        }
        let relative = path.strip_prefix(root)?;
        if copy_if_newer(&path, &build.destination.join(relative))? {
            copied += 1;
        }
    }

    log!("copy"; "{} files", copied);
    Ok(copied)
}

/// Install the files of plugin `name` below `<destination>/<plugins>/<name>`.
pub fn install_plugin(site: &Site, name: &str) -> Result<()> {
    let plugin = site.plugin(name)?;
    let target = site.config.build.plugin_dir(name);
    install(plugin, &target).with_context(|| format!("failed to install plugin `{name}`"))
}

fn install(plugin: &Plugin, target: &Path) -> Result<()> {
    for entry in &plugin.manifest().install {
        let source = plugin.dir().join(entry);
        if source.is_dir() {
            for file in collect_all_files(&source) {
                let relative = file.strip_prefix(plugin.dir())?;
                copy_if_newer(&file, &target.join(relative))?;
            }
        } else if source.is_file() {
            copy_if_newer(&source, &target.join(entry))?;
        } else {
            bail!("`{}` listed in install does not exist", source.display());
        }
    }
    log!("plugin"; "{} -> {}", plugin.name(), target.display());
    Ok(())
}

fn copy_if_newer(source: &Path, destination: &Path) -> Result<bool> {
    if !needs_rebuild(source, destination, &[]) {
        return Ok(false);
    }
    ensure_parent(destination)?;
    fs::copy(source, destination).with_context(|| {
        format!("Failed to copy `{}` to `{}`", source.display(), destination.display())
    })?;
    Ok(true)
}

// ============================================================================
// Tests
// ============================================================================
