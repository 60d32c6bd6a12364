//! List loaded plugins

use anyhow::Result;
use std::path::PathBuf;

pub fn run(plugin_dir: Option<PathBuf>) -> Result<()> {
    let (_, registry) = super::init_registry(plugin_dir)?;
    let plugins = registry.current();

    if plugins.is_empty() {
        println!("No plugins installed");
        println!();
        println!(
            "Plugin directory: {}",
            registry.config().resolved_plugin_dir()?.display()
        );
        println!();
        println!("To install a plugin:");
        println!("  1. Build it: cargo build --release -p plugcalc-add");
        println!("  2. Copy the library: cp target/release/libplugcalc_add.so Plugins/");
        return Ok(());
    }

    for plugin in plugins.iter() {
        let description = if plugin.description().is_empty() {
            "No description"
        } else {
            plugin.description()
        };

        println!(
            "{}  {:<12} {}    ({})",
            plugin.symbol(),
            plugin.type_name(),
            description,
            plugin.origin()
        );
    }

    Ok(())
}
