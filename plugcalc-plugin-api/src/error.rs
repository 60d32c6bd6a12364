//! Error types for plugin authors

use thiserror::Error;

/// Faults a calculator can raise while computing a result.
///
/// These are returned to the caller of `calculate` unchanged; the host never
/// swallows or rewrites them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// Right-hand operand was zero for a division-like operation
    #[error("Attempted to divide by zero")]
    DivideByZero,

    /// Result does not fit in the operand type
    #[error("Arithmetic overflow")]
    Overflow,

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl CalculationError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
