use super::types::{
    OperandsConfig, PlugcalcConfig, PluginsConfig, RawOperandsConfig, RawPlugcalcConfig,
    RawPluginsConfig,
};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<PlugcalcConfig> {
        Self::load_layers(&[Self::user_config_path(), Self::project_config_path()])
    }

    /// Load and merge config files in order; later files override earlier ones.
    /// Missing files are skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<PlugcalcConfig> {
        let mut raw = RawPlugcalcConfig::default();

        for path in paths {
            if let Some(layer) = Self::read_raw(path)? {
                tracing::debug!(path = %path.display(), "Loaded config layer");
                raw = Self::merge_raw(raw, layer);
            }
        }

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<Option<RawPlugcalcConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Some(toml::from_str(&contents)?))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/plugcalc/config.toml`)
    pub fn user_config_path() -> PathBuf {
        plugcalc_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with PLUGCALC_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("PLUGCALC_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".plugcalc/config.toml")
        }
    }

    /// Save config to a specific path
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to_path(config: &PlugcalcConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        std::fs::write(path, toml)?;

        Ok(())
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawPlugcalcConfig, overlay: RawPlugcalcConfig) -> RawPlugcalcConfig {
        RawPlugcalcConfig {
            plugins: RawPluginsConfig {
                dir: overlay.plugins.dir.or(base.plugins.dir),
                on_error: overlay.plugins.on_error.or(base.plugins.on_error),
            },
            operands: RawOperandsConfig {
                x: overlay.operands.x.or(base.operands.x),
                y: overlay.operands.y.or(base.operands.y),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawPlugcalcConfig) -> PlugcalcConfig {
        let operands = OperandsConfig::default();
        PlugcalcConfig {
            plugins: PluginsConfig {
                dir: raw.plugins.dir,
                on_error: raw.plugins.on_error.unwrap_or_default(),
            },
            operands: OperandsConfig {
                x: raw.operands.x.unwrap_or(operands.x),
                y: raw.operands.y.unwrap_or(operands.y),
            },
        }
    }
}
