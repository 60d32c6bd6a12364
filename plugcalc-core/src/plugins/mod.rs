//! Plugin system for plugcalc
//!
//! This module provides the infrastructure for discovering and hosting
//! calculator plugins:
//!
//! - [`PluginRegistry`]: Scans the plugin directory, loads modules and publishes a [`PluginSet`]
//! - [`CalculatorHost`]: Binds one loaded calculator to a pair of operands
//! - [`PluginHostError`]: Error types for plugin operations
//!
//! # Plugin Discovery
//!
//! Plugins are dynamic libraries placed directly in `<cwd>/Plugins`
//! (`.so`, `.dylib` or `.dll` depending on the platform). Each library exports
//! a manifest through `plugcalc_plugin_api::export_module!`. Only types that
//! declare the calculator capability *and* carry a descriptor are loaded.
//!
//! # Example
//!
//! ```no_run
//! use plugcalc_core::plugins::{PluginHostConfig, PluginRegistry};
//!
//! let registry = PluginRegistry::new(PluginHostConfig::default());
//! registry.initialize()?;
//!
//! let plugins = registry.current();
//! for mut host in plugins.hosts() {
//!     host.set_x(8);
//!     host.set_y(2);
//!     println!("{}", host.display()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod host;
mod loader;
mod registry;

#[cfg(test)]
mod fixtures;

pub use error::PluginHostError;
pub use host::CalculatorHost;
pub use loader::{LoadedCalculator, PluginOrigin};
pub use registry::{
    LoadPolicy, ModuleFailure, PluginHostConfig, PluginRegistry, PluginSet, ReloadReport,
};
