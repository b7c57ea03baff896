//! Error types surfaced to the scripting boundary
//!
//! None of these are recoverable inside the core. They propagate to the caller
//! (usually the script sandbox) and are reported there as script errors.

use thiserror::Error;

/// Errors raised by the math values and the transform stack
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Row, column, or component selector out of range
    #[error("Index {index} out of range, expected 1 to {max}")]
    InvalidIndex {
        /// The 1-based index that was requested
        index: usize,
        /// Largest valid 1-based index
        max: usize,
    },

    /// Malformed or length-mismatched swizzle key
    #[error("Invalid swizzle: {0}")]
    InvalidSwizzle(String),

    /// Pop attempted while only the base frame remains
    #[error("Attempt to pop the base frame of a transform stack")]
    EmptyStack,

    /// Scalar division or reduction of a vector by zero
    #[error("Attempt to divide vector by 0")]
    DivideByZero,
}

/// Result alias used throughout the core
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Build an [`CoreError::InvalidIndex`] for a 1-based selector
    pub fn index(index: usize, max: usize) -> Self {
        Self::InvalidIndex { index, max }
    }

    /// Build an [`CoreError::InvalidSwizzle`] with a formatted reason
    pub fn swizzle(reason: impl Into<String>) -> Self {
        Self::InvalidSwizzle(reason.into())
    }
}
