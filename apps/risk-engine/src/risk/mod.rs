//! Risk scoring, constraint validation, and position sizing.
//!
//! The three policy stages of the evaluation pipeline:
//!
//! - [`RiskScorer`] combines behavioral and market inputs into a 0-100
//!   score.
//! - [`ConstraintValidator`] checks a proposed trade against account
//!   limits, first breach wins.
//! - [`sizing::PositionSizer`] turns an approved proposal into a concrete
//!   size, stop, and target.

pub mod constraints;
pub mod scoring;
pub mod sizing;

pub use constraints::{AccountSnapshot, ConstraintValidator, RejectReason, Verdict};
pub use scoring::{RiskScorer, ScoringConfig};
pub use sizing::{PositionSizer, SizeRecommendation, SizingError, TradeProposal};
