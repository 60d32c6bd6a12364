//! Plugin host error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and instantiating plugins
#[derive(Error, Debug)]
pub enum PluginHostError {
    /// Failed to open a dynamic library
    #[error("Failed to load plugin library {path}: {source}")]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// Library does not export the module entry point
    #[error("Plugin library {path} has no module entry point: {source}")]
    MissingEntryPoint {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// Entry point returned no manifest
    #[error("Plugin library {path} returned no module exports")]
    NullExports { path: PathBuf },

    /// An eligible type could not be instantiated
    #[error("Failed to instantiate '{type_name}' from {module}: {reason}")]
    InstantiationFailed {
        module: String,
        type_name: String,
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
