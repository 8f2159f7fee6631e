//! Error types for the solver crate.

use qss_hal::HalError;
use qss_ir::IrError;
use thiserror::Error;

/// Errors raised while validating, building or decoding a subset-sum instance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// No input values were given.
    #[error("Input values must not be empty")]
    EmptyValues,

    /// The value sum fixes the sum-register width and must be positive.
    #[error("Sum of input values must be positive, got {0}")]
    NonPositiveValueSum(i128),

    /// `sum(values) + target` is the normalization constant and must be non-zero.
    #[error(
        "Normalization is undefined: sum of values ({value_sum}) plus target ({target}) is zero"
    )]
    DegenerateNormalization {
        /// Sum of the input values.
        value_sum: i128,
        /// Requested target.
        target: i64,
    },

    /// The target does not fit in the sum register.
    #[error("Target {target} exceeds the sum register range (|target| <= {max})")]
    TargetOutOfRange {
        /// Requested target.
        target: i64,
        /// Largest representable magnitude.
        max: u128,
    },

    /// Too many values to enumerate subsets classically.
    #[error("Cannot enumerate subsets of {got} values (limit {max})")]
    EnumerationTooLarge {
        /// Number of values.
        got: usize,
        /// Largest supported count.
        max: usize,
    },

    /// Solver configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Backend error, passed through unchanged.
    #[error(transparent)]
    Hal(#[from] HalError),
}

/// Result type for solver operations.
pub type CoreResult<T> = Result<T, CoreError>;
