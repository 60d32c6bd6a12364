//! Add Plugin - sums two numbers
//!
//! ## Building
//!
//! ```bash
//! cargo build --release -p plugcalc-add
//! ```
//!
//! ## Installing
//!
//! ```bash
//! mkdir -p Plugins
//! cp target/release/libplugcalc_add.so Plugins/
//! ```

use plugcalc_plugin_api::{CalculationError, Calculator, ExportedType, ModuleExports, export_module};

/// Sums two numbers. Overflow is reported rather than wrapped.
#[derive(Debug, Default)]
pub struct Adder;

impl Calculator for Adder {
    fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
        a.checked_add(b).ok_or(CalculationError::Overflow)
    }

    fn symbol(&self) -> char {
        '+'
    }
}

/// Manifest of everything this module exports.
pub fn exports() -> ModuleExports {
    ModuleExports::new().with(
        ExportedType::calculator::<Adder>().described("This plug-in will sum two numbers"),
    )
}

export_module!(exports);
