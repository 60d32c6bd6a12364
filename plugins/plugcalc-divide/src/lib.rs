//! Divide Plugin - integer division of two numbers
//!
//! Besides the divider this module exports two helper types that the host is
//! expected to ignore: one carries no descriptor, the other is not a calculator.
//!
//! ## Installing
//!
//! ```bash
//! cargo build --release -p plugcalc-divide
//! cp target/release/libplugcalc_divide.so Plugins/
//! ```

use plugcalc_plugin_api::{CalculationError, Calculator, ExportedType, ModuleExports, export_module};

/// Divides two numbers, truncating toward zero.
#[derive(Debug, Default)]
pub struct Divider;

impl Calculator for Divider {
    fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
        if b == 0 {
            return Err(CalculationError::DivideByZero);
        }
        // i32::MIN / -1
        a.checked_div(b).ok_or(CalculationError::Overflow)
    }

    fn symbol(&self) -> char {
        '/'
    }
}

/// Remainder of a division. Exported without a descriptor, so never loaded.
#[derive(Debug, Default)]
pub struct Remainder;

impl Calculator for Remainder {
    fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
        if b == 0 {
            return Err(CalculationError::DivideByZero);
        }
        a.checked_rem(b).ok_or(CalculationError::Overflow)
    }

    fn symbol(&self) -> char {
        '%'
    }
}

/// Manifest of everything this module exports.
pub fn exports() -> ModuleExports {
    ModuleExports::new()
        .with(
            ExportedType::opaque("DivisionFormatter").described("Formats quotients for display"),
        )
        .with(
            ExportedType::calculator::<Divider>()
                .described("This plug-in will divide two numbers"),
        )
        .with(ExportedType::calculator::<Remainder>())
}

export_module!(exports);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divides_with_truncation() {
        assert_eq!(Divider.calculate(8, 2), Ok(4));
        assert_eq!(Divider.calculate(7, 2), Ok(3));
        assert_eq!(Divider.calculate(-7, 2), Ok(-3));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(Divider.calculate(8, 0), Err(CalculationError::DivideByZero));
    }

    #[test]
    fn test_min_by_negative_one_overflows() {
        assert_eq!(
            Divider.calculate(i32::MIN, -1),
            Err(CalculationError::Overflow)
        );
    }

    #[test]
    fn test_only_divider_is_eligible() {
        let exports = exports();
        assert_eq!(exports.types.len(), 3);
        let names: Vec<_> = exports.eligible().map(|t| t.type_name).collect();
        assert_eq!(names, vec!["Divider"]);
    }
}
