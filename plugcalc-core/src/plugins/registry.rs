//! PluginRegistry - discovers, loads and publishes calculator plugins

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use plugcalc_plugin_api::ExportsFn;

use super::error::PluginHostError;
use super::host::CalculatorHost;
use super::loader::{LoadedCalculator, PluginModule, PluginOrigin, discover_modules};

/// What a reload does when a single module fails to load or instantiate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Log the failure, skip the module and publish everything else
    #[default]
    #[serde(alias = "skip")]
    SkipFailed,
    /// Fail the whole reload and keep the previously published set
    Abort,
}

/// Configuration for PluginRegistry
#[derive(Debug, Clone)]
pub struct PluginHostConfig {
    /// Directory scanned for plugin libraries. A relative path is anchored at
    /// the working directory at reload time (default `Plugins`).
    pub plugin_dir: PathBuf,
    /// Failure handling per module
    pub policy: LoadPolicy,
}

impl Default for PluginHostConfig {
    fn default() -> Self {
        Self {
            plugin_dir: PathBuf::from(plugcalc_paths::PLUGIN_DIR_NAME),
            policy: LoadPolicy::default(),
        }
    }
}

impl PluginHostConfig {
    /// Absolute plugin directory for the current working directory
    pub fn resolved_plugin_dir(&self) -> Result<PathBuf, PluginHostError> {
        Ok(plugcalc_paths::resolve(&self.plugin_dir)?)
    }
}

/// A module that failed during a reload and was skipped
#[derive(Debug, Clone)]
pub struct ModuleFailure {
    pub origin: PluginOrigin,
    pub error: String,
}

/// Outcome of a completed reload
#[derive(Debug, Clone, Default)]
pub struct ReloadReport {
    /// Modules attempted (builtin and library)
    pub modules: usize,
    /// Calculators published
    pub loaded: usize,
    /// Modules skipped under [`LoadPolicy::SkipFailed`]
    pub failures: Vec<ModuleFailure>,
}

/// The calculators published by one reload, in discovery order.
///
/// Builtin modules come first in registration order, then libraries sorted by
/// file name, then types in manifest order within each module.
#[derive(Debug, Default)]
pub struct PluginSet {
    generation: u64,
    calculators: Vec<LoadedCalculator>,
}

impl PluginSet {
    /// Number of reloads completed when this set was published (0 = none)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LoadedCalculator> {
        self.calculators.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedCalculator> {
        self.calculators.iter()
    }

    /// A fresh host for every calculator, operands zeroed
    pub fn hosts(&self) -> Vec<CalculatorHost<'_>> {
        self.calculators.iter().map(CalculatorHost::new).collect()
    }
}

impl<'a> IntoIterator for &'a PluginSet {
    type Item = &'a LoadedCalculator;
    type IntoIter = std::slice::Iter<'a, LoadedCalculator>;

    fn into_iter(self) -> Self::IntoIter {
        self.calculators.iter()
    }
}

struct BuiltinModule {
    name: String,
    exports: ExportsFn,
}

/// Owns plugin discovery and the currently published [`PluginSet`].
///
/// A reload builds the new set completely before swapping it in, so readers
/// holding a snapshot from [`current`](Self::current) never observe a partial
/// set, and a failed reload leaves the previous set published.
pub struct PluginRegistry {
    config: PluginHostConfig,
    builtins: Vec<BuiltinModule>,
    current: RwLock<Arc<PluginSet>>,
    generation: AtomicU64,
}

impl PluginRegistry {
    /// Create an uninitialized registry with an empty published set
    pub fn new(config: PluginHostConfig) -> Self {
        Self {
            config,
            builtins: Vec::new(),
            current: RwLock::new(Arc::new(PluginSet::default())),
            generation: AtomicU64::new(0),
        }
    }

    /// Register an in-process module, builder style
    pub fn with_builtin(mut self, name: impl Into<String>, exports: ExportsFn) -> Self {
        self.register_builtin(name, exports);
        self
    }

    /// Register an in-process module.
    ///
    /// Builtin manifests go through the same filtering and instantiation as
    /// libraries on every reload. Takes effect on the next reload.
    pub fn register_builtin(&mut self, name: impl Into<String>, exports: ExportsFn) {
        self.builtins.push(BuiltinModule {
            name: name.into(),
            exports,
        });
    }

    pub fn config(&self) -> &PluginHostConfig {
        &self.config
    }

    /// Perform the first reload
    pub fn initialize(&self) -> Result<ReloadReport, PluginHostError> {
        if self.is_initialized() {
            tracing::debug!("Plugin registry already initialized, reloading");
        }
        self.reload()
    }

    /// Whether at least one reload has completed
    pub fn is_initialized(&self) -> bool {
        self.generation.load(Ordering::Acquire) > 0
    }

    /// Rescan builtins and the plugin directory and publish the result.
    ///
    /// Nothing is published if the reload fails.
    pub fn reload(&self) -> Result<ReloadReport, PluginHostError> {
        let mut report = ReloadReport::default();
        let mut calculators = Vec::new();

        for builtin in &self.builtins {
            let module = PluginModule::builtin(&builtin.name, (builtin.exports)());
            let origin = module.origin().clone();
            self.collect(origin, module.instantiate(), &mut calculators, &mut report)?;
        }

        let plugin_dir = self.config.resolved_plugin_dir()?;
        for path in discover_modules(&plugin_dir)? {
            let result = PluginModule::load(&path).and_then(|module| module.instantiate());
            self.collect(
                PluginOrigin::Library(path),
                result,
                &mut calculators,
                &mut report,
            )?;
        }

        report.loaded = calculators.len();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let set = Arc::new(PluginSet {
            generation,
            calculators,
        });
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = set;

        tracing::info!(
            dir = %plugin_dir.display(),
            modules = report.modules,
            loaded = report.loaded,
            failed = report.failures.len(),
            generation,
            "Plugins reloaded"
        );

        Ok(report)
    }

    fn collect(
        &self,
        origin: PluginOrigin,
        result: Result<Vec<LoadedCalculator>, PluginHostError>,
        calculators: &mut Vec<LoadedCalculator>,
        report: &mut ReloadReport,
    ) -> Result<(), PluginHostError> {
        report.modules += 1;

        match result {
            Ok(loaded) => {
                for calc in &loaded {
                    tracing::info!(
                        plugin = %calc.type_name(),
                        symbol = %calc.symbol(),
                        module = %origin,
                        "Plugin loaded"
                    );
                }
                calculators.extend(loaded);
                Ok(())
            }
            Err(e) => match self.config.policy {
                LoadPolicy::Abort => {
                    tracing::error!(module = %origin, error = %e, "Failed to load plugin module");
                    Err(e)
                }
                LoadPolicy::SkipFailed => {
                    tracing::warn!(module = %origin, error = %e, "Skipping plugin module");
                    report.failures.push(ModuleFailure {
                        origin,
                        error: e.to_string(),
                    });
                    Ok(())
                }
            },
        }
    }

    /// Snapshot of the set published by the last completed reload
    pub fn current(&self) -> Arc<PluginSet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
