//! plugcalc-plugin-api - Plugin API for the plugcalc host
//!
//! This crate provides the traits and types needed to write calculator plugins.
//! Plugins are native Rust dynamic libraries dropped into the host's `Plugins`
//! directory. Each library exports a manifest listing its types; the host keeps
//! the types that declare [`Capability::CALCULATOR`] *and* carry a
//! [`PluginDescriptor`], then instantiates them.
//!
//! # Example
//!
//! ```ignore
//! use plugcalc_plugin_api::{
//!     export_module, CalculationError, Calculator, ExportedType, ModuleExports,
//! };
//!
//! #[derive(Default)]
//! pub struct Multiplier;
//!
//! impl Calculator for Multiplier {
//!     fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
//!         a.checked_mul(b).ok_or(CalculationError::Overflow)
//!     }
//!
//!     fn symbol(&self) -> char {
//!         '*'
//!     }
//! }
//!
//! pub fn exports() -> ModuleExports {
//!     ModuleExports::new()
//!         .with(ExportedType::calculator::<Multiplier>().described("Multiplies two numbers"))
//! }
//!
//! export_module!(exports);
//! ```

pub mod error;
pub mod types;

pub use error::CalculationError;
pub use types::*;

/// Name of the entry point generated by [`export_module!`].
pub const EXPORTS_SYMBOL: &[u8] = b"_plugcalc_module_exports";

/// The capability every plugin type must satisfy: a two-operand integer
/// operation plus the character used to display it.
pub trait Calculator: Send + Sync {
    /// Apply the operation to `a` and `b`.
    fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError>;

    /// Display symbol, e.g. `+`
    fn symbol(&self) -> char;
}

/// Export a module manifest for dynamic loading.
///
/// Takes a function returning [`ModuleExports`] and generates the C ABI entry
/// point the host resolves after opening the library.
///
/// # Usage
///
/// ```ignore
/// plugcalc_plugin_api::export_module!(exports);
/// ```
///
/// # Generated Functions
///
/// - `_plugcalc_module_exports()`: Builds the manifest and hands ownership to the host
#[macro_export]
macro_rules! export_module {
    ($exports_fn:path) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn _plugcalc_module_exports() -> *mut $crate::ModuleExports {
            let exports: $crate::ExportsFn = $exports_fn;
            Box::into_raw(Box::new(exports()))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Max;

    impl Calculator for Max {
        fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
            Ok(a.max(b))
        }

        fn symbol(&self) -> char {
            '^'
        }
    }

    fn exports() -> ModuleExports {
        ModuleExports::new().with(ExportedType::calculator::<Max>().described("Larger of two"))
    }

    export_module!(exports);

    #[test]
    fn test_calculator_trait_is_object_safe() {
        // This compiles only if Calculator is object-safe
        fn _takes_boxed_calculator(_: Box<dyn Calculator>) {}
    }

    #[test]
    fn test_exports_symbol_matches_generated_fn() {
        assert_eq!(EXPORTS_SYMBOL, b"_plugcalc_module_exports");
    }

    #[test]
    fn test_export_module_hands_out_owned_manifest() {
        let raw = _plugcalc_module_exports();
        assert!(!raw.is_null());
        let exports = unsafe { Box::from_raw(raw) };
        assert_eq!(exports.types.len(), 1);
        assert_eq!(exports.types[0].type_name, "Max");

        let calc = (exports.types[0].constructor.unwrap())();
        assert_eq!(calc.calculate(3, 9), Ok(9));
        assert_eq!(calc.symbol(), '^');
    }
}
