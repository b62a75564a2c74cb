//! Error taxonomy for the risk engine.
//!
//! Three failure families must stay distinguishable so the surrounding
//! application can react differently:
//!
//! - [`EngineError::InsufficientData`]: not enough trade history to
//!   aggregate metrics (show "no metrics available").
//! - [`EngineError::ConstraintViolation`]: caller misuse, e.g. sizing a
//!   trade that was never approved (log as a bug).
//! - [`EngineError::DataUnavailable`]: the record store failed (surface as
//!   an infrastructure issue; retry policy belongs to the adapter).
//!
//! Constraint *rejections* (daily/weekly loss limit, exposure, drawdown)
//! are not errors at all; they are [`Verdict`](crate::risk::Verdict)
//! values returned by the constraint validator as normal control flow.

use thiserror::Error;

use crate::risk::sizing::SizingError;
use crate::store::StoreError;

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

/// A record or configuration field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the field that failed validation.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The metrics window contained fewer trades than required.
    #[error("insufficient trade history: required {required}, available {available}")]
    InsufficientData {
        /// Minimum number of trades the aggregation needs.
        required: usize,
        /// Number of trades actually present in the window.
        available: usize,
    },

    /// A component was invoked with its precondition unmet (caller bug).
    #[error("precondition violated: {0}")]
    ConstraintViolation(String),

    /// The record store failed to produce records.
    #[error("record store unavailable: {0}")]
    DataUnavailable(#[from] StoreError),

    /// A record or configuration value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Position sizing failed on its own inputs.
    #[error("sizing failed: {0}")]
    Sizing(#[from] SizingError),
}
