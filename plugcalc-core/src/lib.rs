//! plugcalc-core: Core library for the plugcalc plugin host
//!
//! Discovers calculator plugins in a directory of dynamic libraries,
//! instantiates the eligible types and exposes each one through a
//! [`CalculatorHost`] that pairs it with two operands.
//!
//! See [`plugins`] for the discovery rules and an example.

pub mod plugins;

// Re-export key types for convenience
pub use plugins::{
    CalculatorHost, LoadPolicy, LoadedCalculator, PluginHostConfig, PluginHostError,
    PluginOrigin, PluginRegistry, PluginSet, ReloadReport,
};
pub use plugcalc_plugin_api::CalculationError;
