use plugcalc_core::{LoadPolicy, PluginHostConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPlugcalcConfig {
    #[serde(default)]
    pub plugins: RawPluginsConfig,

    #[serde(default)]
    pub operands: RawOperandsConfig,
}

/// Plugin config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPluginsConfig {
    /// Directory scanned for plugin libraries
    pub dir: Option<PathBuf>,

    /// What to do when a plugin module fails to load
    pub on_error: Option<LoadPolicy>,
}

/// Operands as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOperandsConfig {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlugcalcConfig {
    #[serde(default)]
    pub plugins: PluginsConfig,

    #[serde(default)]
    pub operands: OperandsConfig,
}

impl PlugcalcConfig {
    /// Registry configuration, with an optional directory override from the command line
    pub fn host_config(&self, plugin_dir: Option<PathBuf>) -> PluginHostConfig {
        let defaults = PluginHostConfig::default();
        PluginHostConfig {
            plugin_dir: plugin_dir
                .or_else(|| self.plugins.dir.clone())
                .unwrap_or(defaults.plugin_dir),
            policy: self.plugins.on_error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PluginsConfig {
    /// Directory scanned for plugin libraries (default: ./Plugins)
    pub dir: Option<PathBuf>,

    /// What to do when a plugin module fails to load
    #[serde(default)]
    pub on_error: LoadPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperandsConfig {
    pub x: i32,
    pub y: i32,
}

impl Default for OperandsConfig {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
        }
    }
}

/// Default left operand
pub const DEFAULT_X: i32 = 8;

/// Default right operand
pub const DEFAULT_Y: i32 = 2;
