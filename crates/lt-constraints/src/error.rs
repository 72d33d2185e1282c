//! Error types for constraint construction and lookup.

use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur when constructing or resolving constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    /// Discrete set constraint declared with no admissible values.
    #[error("Discrete set is empty: at least one admissible value is required")]
    EmptySet,

    /// Range constraint declared with min above max.
    #[error("Inverted range: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },

    /// Range bound is NaN or infinite.
    #[error("Non-finite bound for {what}")]
    NonFiniteBound { what: &'static str },

    /// No constraint registered under the requested channel name.
    ///
    /// There is no default pass-through constraint; callers must treat this
    /// as fatal for the operation in progress.
    #[error("No constraint registered for channel '{name}'")]
    NotFound { name: String },
}
