//! Inspect and scaffold configuration

use crate::config::{ConfigLoader, PlugcalcConfig};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show merged configuration and the plugin directory it resolves to
    Show,
    /// Show configuration file paths
    Path,
    /// Write a project config with default values
    Init {
        /// Replace an existing project config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
        ConfigCommands::Init { force } => init_config(&ConfigLoader::project_config_path(), force),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", toml::to_string_pretty(&config)?);
    println!(
        "# plugin directory: {}",
        config.host_config(None).resolved_plugin_dir()?.display()
    );
    Ok(())
}

fn show_paths() -> Result<()> {
    for (label, path) in [
        ("User config:   ", ConfigLoader::user_config_path()),
        ("Project config:", ConfigLoader::project_config_path()),
    ] {
        let marker = if path.exists() { "" } else { " (missing)" };
        println!("{} {}{}", label, path.display(), marker);
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    ConfigLoader::save_to_path(&PlugcalcConfig::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
