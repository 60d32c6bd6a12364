//! In-process calculator modules used by the plugin tests

use plugcalc_plugin_api::{
    CalculationError, Calculator, Capability, ExportedType, ModuleExports,
};

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

#[derive(Debug, Default)]
pub struct Divider;

impl Calculator for Divider {
    fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
        if b == 0 {
            return Err(CalculationError::DivideByZero);
        }
        a.checked_div(b).ok_or(CalculationError::Overflow)
    }

    fn symbol(&self) -> char {
        '/'
    }
}

#[derive(Debug)]
pub struct Exploding;

impl Default for Exploding {
    fn default() -> Self {
        panic!("Exploding::default");
    }
}

impl Calculator for Exploding {
    fn calculate(&self, _a: i32, _b: i32) -> Result<i32, CalculationError> {
        Ok(0)
    }

    fn symbol(&self) -> char {
        '!'
    }
}

pub fn add_exports() -> ModuleExports {
    ModuleExports::new().with(ExportedType::calculator::<Adder>().described("Sums two numbers"))
}

pub fn divide_exports() -> ModuleExports {
    ModuleExports::new()
        .with(ExportedType::calculator::<Divider>().described("Divides two numbers"))
}

/// Two eligible types between types missing the marker or the capability.
pub fn mixed_exports() -> ModuleExports {
    ModuleExports::new()
        .with(ExportedType::calculator::<Adder>().described("Sums two numbers"))
        .with(ExportedType::calculator::<Divider>())
        .with(ExportedType::opaque("Formatter").described("Formats results"))
        .with(
            ExportedType::opaque("Rounder")
                .described("Declares a different capability")
                .with_capability(Capability("plugcalc.formatter")),
        )
        .with(ExportedType::calculator::<Divider>().described("Divides two numbers"))
}

pub fn panicking_exports() -> ModuleExports {
    ModuleExports::new()
        .with(ExportedType::calculator::<Exploding>().described("Panics when constructed"))
}
