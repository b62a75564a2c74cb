//! Stock, sector, and market ratings from the journal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sentinel symbol for market-wide ratings.
pub const MARKET_SYMBOL: &str = "MARKET";

/// Sentinel symbol for sector-wide ratings (the sector lives in `sector`).
pub const SECTOR_SYMBOL: &str = "SECTOR";

/// A dated rating of a stock, a sector, or the whole market.
///
/// Ratings are independent per date; no cross-record invariant exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRating {
    /// Unique rating identifier.
    pub id: String,
    /// Rating date.
    pub date: DateTime<Utc>,
    /// Ticker symbol, or [`MARKET_SYMBOL`] / [`SECTOR_SYMBOL`].
    pub symbol: String,
    /// Sector classification.
    pub sector: String,
    /// Sentiment score, 0-10.
    pub stock_sentiment: Decimal,
    /// Analyst-style price target.
    pub price_target: Decimal,
    /// Confidence in the rating, 0-10.
    pub confidence: Decimal,
    /// Enthusiasm score, 0-10.
    pub enthusiasm: Decimal,
    /// Chart-pattern tag (journal free text).
    pub chart_pattern: String,
    /// Free-form notes.
    pub notes: String,
}

/// Most recent market-wide rating, if any were recorded.
#[must_use]
pub fn latest_market_rating(ratings: &[StockRating]) -> Option<&StockRating> {
    ratings
        .iter()
        .filter(|r| r.symbol == MARKET_SYMBOL)
        .max_by_key(|r| r.date)
}

/// Most recent rating for a sector, if any were recorded.
///
/// Sector ratings carry the [`SECTOR_SYMBOL`] sentinel and name the sector
/// in their `sector` field.
pub fn latest_sector_rating<'a>(
    ratings: &'a [StockRating],
    sector: &str,
) -> Result<Option<&'a StockRating>, ValidationError> {
    if sector.trim().is_empty() {
        return Err(ValidationError::new("sector", "must not be empty"));
    }
    Ok(ratings
        .iter()
        .filter(|r| r.symbol == SECTOR_SYMBOL && r.sector == sector)
        .max_by_key(|r| r.date))
}

/// Most recent rating for a stock symbol, if any were recorded.
pub fn latest_symbol_rating<'a>(
    ratings: &'a [StockRating],
    symbol: &str,
) -> Result<Option<&'a StockRating>, ValidationError> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::new("symbol", "must not be empty"));
    }
    Ok(ratings
        .iter()
        .filter(|r| r.symbol == symbol)
        .max_by_key(|r| r.date))
}
