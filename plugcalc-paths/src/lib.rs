//! Directory paths for plugcalc.
//!
//! Plugins live next to the process (`<cwd>/Plugins`). Config follows XDG
//! so the CLI behaves like other command line tools.

use std::io;
use std::path::{Path, PathBuf};

/// Name of the plugin directory under the working directory.
pub const PLUGIN_DIR_NAME: &str = "Plugins";

/// Get the plugin directory.
///
/// Returns `<current working directory>/Plugins`. The directory is not
/// required to exist.
///
/// # Examples
///
/// ```no_run
/// let dir = plugcalc_paths::plugin_dir()?;
/// assert!(dir.ends_with("Plugins"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn plugin_dir() -> io::Result<PathBuf> {
    resolve(Path::new(PLUGIN_DIR_NAME))
}

/// Anchor a relative path at the current working directory.
///
/// Absolute paths are returned unchanged. The working directory is read on
/// every call, so a relative path follows later `chdir`s.
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Get the plugcalc config directory.
///
/// Returns `$XDG_CONFIG_HOME/plugcalc` if set, otherwise `~/.config/plugcalc`.
///
/// # Examples
///
/// ```
/// use plugcalc_paths::config_dir;
///
/// let config = config_dir();
/// let config_file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("plugcalc")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/plugcalc")
    } else {
        PathBuf::from(".config/plugcalc")
    }
}
