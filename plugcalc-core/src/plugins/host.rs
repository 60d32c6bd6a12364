//! CalculatorHost - binds a loaded calculator to a pair of operands

use plugcalc_plugin_api::CalculationError;

use super::loader::LoadedCalculator;

/// A loaded calculator paired with the operands it is applied to.
///
/// The host borrows the calculator from a [`PluginSet`](super::PluginSet)
/// snapshot and owns only its operands. Results are computed on demand, so
/// changing an operand is reflected by the next `calculate` or `display`.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorHost<'a> {
    plugin: &'a LoadedCalculator,
    x: i32,
    y: i32,
}

impl<'a> CalculatorHost<'a> {
    /// Bind a calculator with both operands set to zero
    pub fn new(plugin: &'a LoadedCalculator) -> Self {
        Self { plugin, x: 0, y: 0 }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    /// The calculator this host is bound to
    pub fn plugin(&self) -> &'a LoadedCalculator {
        self.plugin
    }

    pub fn symbol(&self) -> char {
        self.plugin.symbol()
    }

    /// Description from the plugin's descriptor
    pub fn description(&self) -> &'a str {
        self.plugin.description()
    }

    pub fn type_name(&self) -> &'a str {
        self.plugin.type_name()
    }

    /// Apply the calculator to the current operands.
    ///
    /// Faults raised by the calculator are returned unchanged.
    pub fn calculate(&self) -> Result<i32, CalculationError> {
        self.plugin.calculator().calculate(self.x, self.y)
    }

    /// Render `"{x} {symbol} {y} = {result}"`, recomputing the result.
    pub fn display(&self) -> Result<String, CalculationError> {
        let result = self.calculate()?;
        Ok(format!(
            "{} {} {} = {}",
            self.x,
            self.symbol(),
            self.y,
            result
        ))
    }
}
