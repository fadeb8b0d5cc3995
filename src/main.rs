//! mkweb - incremental static website generator driving pandoc.

mod build;
mod cli;
mod compiler;
mod config;
mod data;
mod generator;
mod logger;
mod plugin;
mod site;
mod theme;
mod utils;

use anyhow::{Result, bail};
use build::{BuildOptions, build_site};
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use site::Site;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.info {
        return print_info(&cli);
    }

    let config = SiteConfig::load(&cli)?;
    let site = Site::new(config)?;

    let failed = build_site(&site, &BuildOptions::from(&cli))?;
    if failed > 0 {
        bail!("{failed} step(s) failed, see the errors above");
    }
    Ok(())
}

/// Print the resolved installation paths.
fn print_info(cli: &Cli) -> Result<()> {
    let share = SiteConfig::from_path(&cli.config)
        .ok()
        .and_then(|config| config.build.share);
    println!("path to binary: {}", utils::binary_dir()?.display());
    println!(
        "path to shared: {}",
        share.map_or_else(utils::default_share_dir, Ok)?.display()
    );
    Ok(())
}
