//! Core types for position sizing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Direction, InstrumentKind};

/// A proposed trade to size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeProposal {
    /// Ticker symbol.
    pub symbol: String,
    /// Intended entry price per unit.
    pub entry_price: Decimal,
    /// Intended direction.
    pub direction: Direction,
    /// Instrument kind (drives the contract multiplier).
    pub kind: InstrumentKind,
    /// Whether correlated exposure is already open (triggers the
    /// correlation adjustment).
    pub correlated_exposure_open: bool,
    /// Whether volatility is elevated (triggers the volatility
    /// adjustment).
    pub elevated_volatility: bool,
}

/// Which adjustment reduced the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentKind {
    /// Blanket position scaling from settings.
    Scaling,
    /// Correlated exposure already open.
    Correlation,
    /// Elevated volatility.
    Volatility,
    /// High overall risk score.
    RiskScore,
}

/// One applied sizing adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAdjustment {
    /// The adjustment that fired.
    pub kind: AdjustmentKind,
    /// Multiplicative factor it contributed.
    pub factor: Decimal,
}

/// A position-size recommendation for an approved trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendation {
    /// Recommended quantity in shares or contracts.
    pub quantity: u64,
    /// Notional value of the recommended position.
    pub notional: Decimal,
    /// Account-currency amount at risk if the stop is hit.
    pub risk_amount: Decimal,
    /// Recommended stop price.
    pub stop_price: Decimal,
    /// Recommended target price.
    pub target_price: Decimal,
    /// Adjustments that reduced the size, in application order.
    pub adjustments: Vec<AppliedAdjustment>,
}
