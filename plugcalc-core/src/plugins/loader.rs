//! Module discovery, library loading and instantiation of exported types

use libloading::Library;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plugcalc_plugin_api::{Calculator, EXPORTS_SYMBOL, ExportedType, ModuleExports};

use super::error::PluginHostError;

/// Where a plugin module came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOrigin {
    /// Dynamic library found in the plugin directory
    Library(PathBuf),
    /// Module registered in-process by the host
    Builtin(String),
}

impl fmt::Display for PluginOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(path) => write!(f, "{}", path.display()),
            Self::Builtin(name) => write!(f, "builtin:{}", name),
        }
    }
}

/// A calculator instantiated from a plugin module
pub struct LoadedCalculator {
    type_name: String,
    description: String,
    origin: PluginOrigin,
    /// The plugin instance. Declared before `_library` so it is dropped first.
    instance: Box<dyn Calculator>,
    /// Keep the library loaded
    _library: Option<Arc<Library>>,
}

impl LoadedCalculator {
    pub(crate) fn new(
        exported: &ExportedType,
        origin: PluginOrigin,
        instance: Box<dyn Calculator>,
        library: Option<Arc<Library>>,
    ) -> Self {
        Self {
            type_name: exported.type_name.to_string(),
            description: exported
                .descriptor
                .map(|d| d.description.to_string())
                .unwrap_or_default(),
            origin,
            instance,
            _library: library,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Text of the descriptive marker the type was exported with
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn origin(&self) -> &PluginOrigin {
        &self.origin
    }

    pub fn symbol(&self) -> char {
        self.instance.symbol()
    }

    pub fn calculator(&self) -> &dyn Calculator {
        self.instance.as_ref()
    }
}

impl fmt::Debug for LoadedCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedCalculator")
            .field("type_name", &self.type_name)
            .field("symbol", &self.symbol())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// A module whose manifest has been read but whose types are not yet instantiated
pub(crate) struct PluginModule {
    /// Must drop before `library`: the manifest may point into it.
    exports: ModuleExports,
    origin: PluginOrigin,
    library: Option<Arc<Library>>,
}

impl PluginModule {
    pub(crate) fn builtin(name: &str, exports: ModuleExports) -> Self {
        Self {
            exports,
            origin: PluginOrigin::Builtin(name.to_string()),
            library: None,
        }
    }

    /// Open a dynamic library and take ownership of its manifest
    pub(crate) fn load(path: &Path) -> Result<Self, PluginHostError> {
        // SAFETY: Loading a library runs its initializers. Anything placed in
        // the plugin directory is trusted to follow the plugin API contract.
        let library = unsafe { Library::new(path) }.map_err(|source| {
            PluginHostError::LibraryLoad {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let exports = {
            // SAFETY: The symbol is generated by `export_module!` with this signature.
            let exports_fn: libloading::Symbol<extern "C" fn() -> *mut ModuleExports> =
                unsafe { library.get(EXPORTS_SYMBOL) }.map_err(|source| {
                    PluginHostError::MissingEntryPoint {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;

            let raw = exports_fn();
            if raw.is_null() {
                return Err(PluginHostError::NullExports {
                    path: path.to_path_buf(),
                });
            }
            // SAFETY: `export_module!` hands over a pointer from `Box::into_raw`.
            *unsafe { Box::from_raw(raw) }
        };

        Ok(Self {
            exports,
            origin: PluginOrigin::Library(path.to_path_buf()),
            library: Some(Arc::new(library)),
        })
    }

    pub(crate) fn origin(&self) -> &PluginOrigin {
        &self.origin
    }

    /// Filter the manifest to eligible types and construct one instance of each.
    ///
    /// Fails as a whole if any eligible type cannot be instantiated.
    pub(crate) fn instantiate(&self) -> Result<Vec<LoadedCalculator>, PluginHostError> {
        let mut loaded = Vec::new();

        for exported in &self.exports.types {
            if !exported.is_eligible() {
                tracing::debug!(
                    module = %self.origin,
                    type_name = exported.type_name,
                    has_descriptor = exported.has_descriptor(),
                    "Exported type is not a described calculator, skipping"
                );
                continue;
            }

            let instance = self.construct(exported)?;
            tracing::debug!(
                module = %self.origin,
                type_name = exported.type_name,
                symbol = %instance.symbol(),
                "Instantiated plugin type"
            );
            loaded.push(LoadedCalculator::new(
                exported,
                self.origin.clone(),
                instance,
                self.library.clone(),
            ));
        }

        Ok(loaded)
    }

    fn construct(&self, exported: &ExportedType) -> Result<Box<dyn Calculator>, PluginHostError> {
        let failed = |reason: &str| PluginHostError::InstantiationFailed {
            module: self.origin.to_string(),
            type_name: exported.type_name.to_string(),
            reason: reason.to_string(),
        };

        let constructor = exported
            .constructor
            .ok_or_else(|| failed("no zero-argument constructor"))?;

        std::panic::catch_unwind(AssertUnwindSafe(constructor))
            .map_err(|_| failed("constructor panicked"))
    }
}

/// List loadable module files directly inside `dir`, sorted by file name.
///
/// A missing directory, or a path that is not a directory, yields an empty list.
pub(crate) fn discover_modules(dir: &Path) -> Result<Vec<PathBuf>, PluginHostError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
            ) =>
        {
            tracing::debug!(dir = %dir.display(), error = %e, "No plugin directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut found = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_library(&path) {
            found.push(path);
        }
    }
    found.sort();

    Ok(found)
}

fn is_library(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(std::env::consts::DLL_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::fixtures::{self, Adder};
    use tempfile::TempDir;

    fn library_name(stem: &str) -> String {
        format!("{}.{}", stem, std::env::consts::DLL_EXTENSION)
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let found = discover_modules(&dir.path().join("Plugins")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_file_instead_of_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Plugins");
        std::fs::write(&path, b"").unwrap();
        assert!(discover_modules(&path).unwrap().is_empty());
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(library_name("libadd")), b"").unwrap();
        std::fs::write(dir.path().join("README.txt"), b"").unwrap();
        std::fs::write(dir.path().join("libadd"), b"").unwrap();

        let found = discover_modules(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join(library_name("libadd"))]);
    }

    #[test]
    fn test_discover_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join(library_name("libdeep")), b"").unwrap();
        std::fs::create_dir(dir.path().join(library_name("looks-like-a-lib"))).unwrap();

        assert!(discover_modules(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_is_sorted() {
        let dir = TempDir::new().unwrap();
        for stem in ["libc", "liba", "libb"] {
            std::fs::write(dir.path().join(library_name(stem)), b"").unwrap();
        }

        let names: Vec<String> = discover_modules(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["liba", "libb", "libc"]);
    }

    #[test]
    fn test_load_garbage_library_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(library_name("libgarbage"));
        std::fs::write(&path, b"definitely not a shared object").unwrap();

        let result = PluginModule::load(&path);
        assert!(matches!(result, Err(PluginHostError::LibraryLoad { .. })));
    }

    #[test]
    fn test_instantiate_keeps_only_eligible_types() {
        let module = PluginModule::builtin("mixed", fixtures::mixed_exports());
        let loaded = module.instantiate().unwrap();

        let names: Vec<&str> = loaded.iter().map(|c| c.type_name()).collect();
        assert_eq!(names, vec!["Adder", "Divider"]);
        assert_eq!(loaded[0].description(), "Sums two numbers");
        assert_eq!(loaded[0].origin(), &PluginOrigin::Builtin("mixed".into()));
    }

    #[test]
    fn test_instantiate_without_constructor_fails() {
        let exports = ModuleExports::new().with(
            ExportedType::calculator::<Adder>()
                .described("Sums two numbers")
                .without_constructor(),
        );
        let module = PluginModule::builtin("broken", exports);

        let err = module.instantiate().unwrap_err();
        assert!(matches!(
            err,
            PluginHostError::InstantiationFailed { ref type_name, .. } if type_name == "Adder"
        ));
    }

    #[test]
    fn test_instantiate_panicking_constructor_fails() {
        let module = PluginModule::builtin("panicky", fixtures::panicking_exports());
        let err = module.instantiate().unwrap_err();
        assert!(err.to_string().contains("constructor panicked"));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(
            PluginOrigin::Builtin("arith".into()).to_string(),
            "builtin:arith"
        );
        assert_eq!(
            PluginOrigin::Library(PathBuf::from("/p/libadd.so")).to_string(),
            "/p/libadd.so"
        );
    }
}
