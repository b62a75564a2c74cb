//! Trade records from the journal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Instrument kind for a recorded trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    /// Common stock.
    Equity,
    /// Listed option contract.
    Option,
}

impl InstrumentKind {
    /// Contract multiplier used to convert quantity to notional.
    #[must_use]
    pub const fn contract_multiplier(self) -> u32 {
        match self {
            Self::Equity => 1,
            Self::Option => 100,
        }
    }
}

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Long position (stop below entry).
    Long,
    /// Short position (stop above entry).
    Short,
}

/// A trade as recorded in the journal.
///
/// Immutable once recorded. Realized outcomes live on [`ClosedTrade`], not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Unique trade identifier.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Sector classification.
    pub sector: String,
    /// Strategy tag (journal free text, e.g. "put credit spread").
    pub strategy: String,
    /// Instrument kind.
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    /// Week index within the journal year.
    pub week: u32,
    /// Entry timestamp.
    pub entry_date: DateTime<Utc>,
    /// Expiration timestamp (options only).
    pub expiration_date: Option<DateTime<Utc>>,
    /// Entry price per unit.
    pub entry_price: Decimal,
    /// Stop price per unit.
    pub stop: Decimal,
    /// Target price per unit.
    pub target: Decimal,
    /// Leg number within a multi-leg structure.
    pub leg_number: u32,
    /// Whether the trade is part of a multi-leg structure.
    pub is_multi_leg: bool,
    /// Expiration tag of the short leg (multi-leg options).
    pub short_leg_exp: Option<String>,
    /// Chart timeframe the setup was taken from.
    pub timeframe: Option<String>,
    /// Free-form notes.
    pub notes: String,
}

impl Trade {
    /// Direction implied by the stop placement.
    ///
    /// A stop below entry protects a long; a stop above protects a short.
    /// Validation rejects `stop == entry_price`, so the mapping is total
    /// for validated trades.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.stop < self.entry_price {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    /// Per-unit risk between entry and stop.
    #[must_use]
    pub fn risk_per_unit(&self) -> Decimal {
        (self.entry_price - self.stop).abs()
    }

    /// Validate the record before the engine consumes it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::new("trade.symbol", "must not be empty"));
        }
        if self.sector.trim().is_empty() {
            return Err(ValidationError::new("trade.sector", "must not be empty"));
        }
        if self.strategy.trim().is_empty() {
            return Err(ValidationError::new("trade.strategy", "must not be empty"));
        }
        if self.entry_price <= Decimal::ZERO {
            return Err(ValidationError::new(
                "trade.entryPrice",
                "must be positive",
            ));
        }
        if self.stop < Decimal::ZERO {
            return Err(ValidationError::new("trade.stop", "must not be negative"));
        }
        if self.stop == self.entry_price {
            return Err(ValidationError::new(
                "trade.stop",
                "must differ from entry price",
            ));
        }
        if self.leg_number == 0 {
            return Err(ValidationError::new("trade.legNumber", "must be >= 1"));
        }
        Ok(())
    }
}

/// A trade together with its realized outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTrade {
    /// The originating journal record.
    pub trade: Trade,
    /// Exit timestamp.
    pub exit_date: DateTime<Utc>,
    /// Exit price per unit.
    pub exit_price: Decimal,
    /// Realized profit or loss in account currency.
    pub realized_pnl: Decimal,
}

impl ClosedTrade {
    /// Whether the trade closed profitably.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.realized_pnl > Decimal::ZERO
    }

    /// Trade outcome expressed as a multiple of initial risk.
    ///
    /// The signed move from entry to exit divided by the entry-to-stop
    /// distance. Returns `None` when the stop sits on the entry (zero
    /// risk), which validated trades cannot have.
    #[must_use]
    pub fn r_multiple(&self) -> Option<Decimal> {
        let risk = self.trade.risk_per_unit();
        if risk == Decimal::ZERO {
            return None;
        }
        let signed_move = match self.trade.direction() {
            Direction::Long => self.exit_price - self.trade.entry_price,
            Direction::Short => self.trade.entry_price - self.exit_price,
        };
        Some(signed_move / risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_trade() -> Trade {
        Trade {
            id: "t-1".to_string(),
            symbol: "AAPL".to_string(),
            sector: "Technology".to_string(),
            strategy: "breakout".to_string(),
            kind: InstrumentKind::Equity,
            week: 12,
            entry_date: Utc.with_ymd_and_hms(2025, 3, 17, 14, 30, 0).unwrap(),
            expiration_date: None,
            entry_price: dec!(100),
            stop: dec!(95),
            target: dec!(110),
            leg_number: 1,
            is_multi_leg: false,
            short_leg_exp: None,
            timeframe: Some("1D".to_string()),
            notes: String::new(),
        }
    }

    #[test]
    fn test_direction_from_stop_placement() {
        let long = sample_trade();
        assert_eq!(long.direction(), Direction::Long);

        let mut short = sample_trade();
        short.stop = dec!(105);
        assert_eq!(short.direction(), Direction::Short);
    }

    #[test]
    fn test_risk_per_unit() {
        assert_eq!(sample_trade().risk_per_unit(), dec!(5));
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_trade().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_symbol() {
        let mut trade = sample_trade();
        trade.symbol = "  ".to_string();
        let err = trade.validate().unwrap_err();
        assert_eq!(err.field, "trade.symbol");
    }

    #[test]
    fn test_validate_rejects_stop_on_entry() {
        let mut trade = sample_trade();
        trade.stop = trade.entry_price;
        let err = trade.validate().unwrap_err();
        assert_eq!(err.field, "trade.stop");
    }

    #[test]
    fn test_option_contract_multiplier() {
        assert_eq!(InstrumentKind::Option.contract_multiplier(), 100);
        assert_eq!(InstrumentKind::Equity.contract_multiplier(), 1);
    }

    #[test]
    fn test_r_multiple_long_winner() {
        // Entry 100, stop 95, exit 110: +10 move over 5 risk = 2R
        let closed = ClosedTrade {
            trade: sample_trade(),
            exit_date: Utc.with_ymd_and_hms(2025, 3, 21, 20, 0, 0).unwrap(),
            exit_price: dec!(110),
            realized_pnl: dec!(1000),
        };
        assert_eq!(closed.r_multiple(), Some(dec!(2)));
        assert!(closed.is_winner());
    }

    #[test]
    fn test_r_multiple_short_loser() {
        // Short from 100 with stop 105; exit 103 is a -0.6R loss
        let mut trade = sample_trade();
        trade.stop = dec!(105);
        let closed = ClosedTrade {
            trade,
            exit_date: Utc.with_ymd_and_hms(2025, 3, 21, 20, 0, 0).unwrap(),
            exit_price: dec!(103),
            realized_pnl: dec!(-300),
        };
        assert_eq!(closed.r_multiple(), Some(dec!(-0.6)));
        assert!(!closed.is_winner());
    }

    #[test]
    fn test_serde_round_trip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }

    #[test]
    fn test_serde_uses_journal_field_names() {
        let json = serde_json::to_value(sample_trade()).unwrap();
        assert!(json.get("entryPrice").is_some());
        assert!(json.get("isMultiLeg").is_some());
        assert_eq!(json.get("type").unwrap(), "EQUITY");
    }
}
