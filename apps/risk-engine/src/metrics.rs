//! Rolling performance metrics over recorded trades.
//!
//! Aggregates a window of closed trades into the statistics the risk
//! scorer and constraint validator consume: win rate, average R-multiple,
//! current drawdown, daily/weekly realized P&L, and the trailing loss
//! streak.
//!
//! An empty window is an [`EngineError::InsufficientData`] failure, never a
//! zero-valued snapshot: "no metrics" and "flat metrics" mean different
//! things to every downstream consumer.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::ClosedTrade;

/// Window over the trade history to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lookback {
    /// The most recent `n` trades (a cap, not a minimum).
    LastN(usize),
    /// All trades entered at or after the given instant.
    Since(DateTime<Utc>),
}

impl Default for Lookback {
    fn default() -> Self {
        Self::LastN(default_lookback_trades())
    }
}

pub(crate) const fn default_lookback_trades() -> usize {
    50
}

/// Aggregated statistics over a window of closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    /// Fraction of trades in the window that closed profitably, 0-1.
    pub win_rate: Decimal,
    /// Mean R-multiple across the window.
    pub avg_r_multiple: Decimal,
    /// Current peak-to-trough decline of equity within the window, as a
    /// fraction of peak equity.
    pub current_drawdown: Decimal,
    /// Realized P&L of trades entered on the evaluation day.
    pub daily_pnl: Decimal,
    /// Realized P&L of trades entered in the evaluation ISO week.
    pub weekly_pnl: Decimal,
    /// Trailing run of consecutive losing trades.
    pub loss_streak: u64,
    /// Number of trades in the window.
    pub trade_count: usize,
}

/// Computes [`TradeMetrics`] over a configured lookback window.
///
/// Trades are weighted equally; the input sequence is expected in entry
/// order, oldest first, the way the journal stores it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator {
    lookback: Lookback,
}

impl MetricsAggregator {
    /// Create an aggregator with the given lookback window.
    #[must_use]
    pub const fn new(lookback: Lookback) -> Self {
        Self { lookback }
    }

    /// Aggregate metrics as of `as_of`, with `starting_equity` as the
    /// equity baseline before the first trade in the window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientData`] when the window contains
    /// no trades.
    pub fn aggregate(
        &self,
        trades: &[ClosedTrade],
        starting_equity: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<TradeMetrics, EngineError> {
        let window = self.window(trades);
        if window.is_empty() {
            return Err(EngineError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        let (winners, r_sum, r_count) = trade_stats(window);
        let trade_count = window.len();

        let win_rate = Decimal::from(winners) / Decimal::from(trade_count as u64);
        let avg_r_multiple = if r_count > 0 {
            r_sum / Decimal::from(r_count)
        } else {
            Decimal::ZERO
        };

        Ok(TradeMetrics {
            win_rate,
            avg_r_multiple,
            current_drawdown: current_drawdown(window, starting_equity),
            daily_pnl: bucket_pnl(window, |t| {
                t.trade.entry_date.date_naive() == as_of.date_naive()
            }),
            weekly_pnl: bucket_pnl(window, |t| {
                let week = t.trade.entry_date.iso_week();
                let ref_week = as_of.iso_week();
                week.year() == ref_week.year() && week.week() == ref_week.week()
            }),
            loss_streak: trailing_loss_streak(window),
            trade_count,
        })
    }

    fn window<'a>(&self, trades: &'a [ClosedTrade]) -> &'a [ClosedTrade] {
        match self.lookback {
            Lookback::LastN(n) => {
                let start = trades.len().saturating_sub(n);
                &trades[start..]
            }
            Lookback::Since(cutoff) => {
                // Entry order is oldest-first, so the window is the suffix
                // starting at the first trade on or after the cutoff.
                let start = trades
                    .iter()
                    .position(|t| t.trade.entry_date >= cutoff)
                    .unwrap_or(trades.len());
                &trades[start..]
            }
        }
    }
}

fn trade_stats(window: &[ClosedTrade]) -> (u64, Decimal, u64) {
    let mut winners = 0u64;
    let mut r_sum = Decimal::ZERO;
    let mut r_count = 0u64;

    for trade in window {
        if trade.is_winner() {
            winners += 1;
        }
        if let Some(r) = trade.r_multiple() {
            r_sum += r;
            r_count += 1;
        }
    }

    (winners, r_sum, r_count)
}

/// Current drawdown of the equity curve implied by cumulative realized P&L.
fn current_drawdown(window: &[ClosedTrade], starting_equity: Decimal) -> Decimal {
    let mut equity = starting_equity;
    let mut peak = starting_equity;

    for trade in window {
        equity += trade.realized_pnl;
        if equity > peak {
            peak = equity;
        }
    }

    if peak > Decimal::ZERO && equity < peak {
        (peak - equity) / peak
    } else {
        Decimal::ZERO
    }
}

fn bucket_pnl(window: &[ClosedTrade], in_bucket: impl Fn(&ClosedTrade) -> bool) -> Decimal {
    window
        .iter()
        .filter(|t| in_bucket(t))
        .map(|t| t.realized_pnl)
        .sum()
}

fn trailing_loss_streak(window: &[ClosedTrade]) -> u64 {
    window
        .iter()
        .rev()
        .take_while(|t| t.realized_pnl < Decimal::ZERO)
        .count() as u64
}
