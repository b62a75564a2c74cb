// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Risk Engine - Rust Core Library
//!
//! Deterministic risk core for the Stonk trading journal.
//!
//! # Pipeline
//!
//! One evaluation flows through four pure stages, each feeding the next:
//!
//! 1. **Metrics** ([`metrics::MetricsAggregator`]) - rolling win rate,
//!    average R-multiple, drawdown, and daily/weekly P&L over recorded
//!    trades.
//! 2. **Scoring** ([`risk::RiskScorer`]) - behavioral self-assessment plus
//!    market stress combined into a 0-100 score.
//! 3. **Validation** ([`risk::ConstraintValidator`]) - ordered loss-limit,
//!    exposure, and drawdown checks; first breach wins.
//! 4. **Sizing** ([`risk::PositionSizer`]) - fixed-fractional size with
//!    adaptive adjustments, stop, and target for approved trades.
//!
//! [`RiskEngine`](engine::RiskEngine) orchestrates the pipeline;
//! [`store::RecordStore`] is the boundary through which callers supply
//! records. The engine performs no I/O, keeps no state between calls, and
//! never mutates its inputs, so independent evaluations parallelize
//! freely.
//!
//! # Example
//!
//! ```rust,ignore
//! use risk_engine::{EngineConfig, RiskEngine};
//!
//! let engine = RiskEngine::new(EngineConfig::default())?;
//! let evaluation = engine.evaluate(&input)?;
//! match evaluation.sizing {
//!     Some(rec) => println!("size {} @ stop {}", rec.quantity, rec.stop_price),
//!     None => println!("rejected: {:?}", evaluation.verdict),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod risk;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use engine::{EvaluationInput, RiskEngine, TradeEvaluation};
pub use error::{EngineError, Result, ValidationError};
pub use metrics::{Lookback, MetricsAggregator, TradeMetrics};
pub use models::{
    AssessmentDraft, ClosedTrade, Direction, InstrumentKind, PositionSettings, RiskAssessment,
    StockRating, Trade,
};
pub use risk::{
    AccountSnapshot, ConstraintValidator, PositionSizer, RejectReason, RiskScorer, ScoringConfig,
    SizeRecommendation, TradeProposal, Verdict,
};
pub use store::{InMemoryRecordStore, RecordStore, StoreError};
