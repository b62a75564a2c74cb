//! Core domain records for the risk engine.
//!
//! These types mirror the journal's document shapes. All records are
//! immutable value objects owned by the caller; the engine never mutates
//! them, only produces new derived outputs (assessments, recommendations).

mod assessment;
mod rating;
mod settings;
mod trade;

pub use assessment::{AssessmentDraft, RiskAssessment};
pub use rating::{
    MARKET_SYMBOL, SECTOR_SYMBOL, StockRating, latest_market_rating, latest_sector_rating,
    latest_symbol_rating,
};
pub use settings::PositionSettings;
pub use trade::{ClosedTrade, Direction, InstrumentKind, Trade};
