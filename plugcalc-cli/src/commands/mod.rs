pub mod config;
pub mod list;
pub mod run;

use anyhow::Result;
use plugcalc_core::PluginRegistry;
use std::path::PathBuf;

use crate::config::{ConfigLoader, PlugcalcConfig};

/// Load config and initialize a registry from it
pub(crate) fn init_registry(
    plugin_dir: Option<PathBuf>,
) -> Result<(PlugcalcConfig, PluginRegistry)> {
    let config = ConfigLoader::load()?;
    let registry = PluginRegistry::new(config.host_config(plugin_dir));

    let report = registry.initialize()?;
    for failure in &report.failures {
        eprintln!("warning: skipped {}: {}", failure.origin, failure.error);
    }

    Ok((config, registry))
}
