//! Position sizing for approved trades.
//!
//! Implements deterministic fixed-fractional sizing: the account risks a
//! configured fraction per trade, the stop-loss percent converts that risk
//! into a notional, and a chain of multiplicative adjustments (scaling,
//! correlation, volatility, risk-score damping) reduces the size when
//! conditions warrant caution.
//!
//! Sizing requires a prior [`Verdict::Allowed`](crate::risk::Verdict) from
//! the constraint validator; calling the sizer with a rejection is caller
//! misuse and fails with
//! [`EngineError::ConstraintViolation`](crate::error::EngineError).

mod adjustments;
mod error;
mod sizer;
mod types;

pub use adjustments::{apply_adjustments, risk_score_damping};
pub use error::SizingError;
pub use sizer::PositionSizer;
pub use types::{AdjustmentKind, AppliedAdjustment, SizeRecommendation, TradeProposal};
