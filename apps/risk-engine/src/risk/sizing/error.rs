//! Error types for position sizing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error during a position sizing calculation.
///
/// These are failures of the sizing inputs themselves, distinct from
/// constraint rejections (verdict values) and from the precondition error
/// raised when sizing is attempted without an approved verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Invalid input (non-positive price, out-of-range score).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The adjusted notional buys less than one unit at the entry price.
    #[error("adjusted notional {notional} rounds to zero at unit cost {unit_cost}")]
    RoundsToZero {
        /// Adjusted notional available for the position.
        notional: Decimal,
        /// Cost of one share or contract.
        unit_cost: Decimal,
    },
}
