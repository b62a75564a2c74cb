//! Constraint validation for proposed trades.
//!
//! Deterministic, ordered checks against account-level limits. The checks
//! run in a fixed order and the first breach wins, so simultaneous
//! breaches always report the same reason:
//!
//! 1. daily loss limit
//! 2. weekly loss limit
//! 3. portfolio exposure cap
//! 4. drawdown tolerance
//!
//! A rejection is a [`Verdict`] value, not an error: hitting a loss limit
//! is expected behavior the application surfaces as a warning, distinct
//! from caller bugs and store failures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metrics::TradeMetrics;
use crate::models::PositionSettings;

/// Account state a proposed trade is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    /// Realized P&L for the evaluation day.
    pub day_pnl: Decimal,
    /// Realized P&L for the evaluation ISO week.
    pub week_pnl: Decimal,
    /// Account-currency amount already at risk across open positions.
    pub open_exposure: Decimal,
    /// Current drawdown as a fraction of peak equity.
    pub current_drawdown: Decimal,
}

impl AccountSnapshot {
    /// Build a snapshot from aggregated metrics plus the caller-tracked
    /// open exposure (open positions are not part of the closed-trade
    /// history the aggregator sees).
    #[must_use]
    pub const fn from_metrics(metrics: &TradeMetrics, open_exposure: Decimal) -> Self {
        Self {
            day_pnl: metrics.daily_pnl,
            week_pnl: metrics.weekly_pnl,
            open_exposure,
            current_drawdown: metrics.current_drawdown,
        }
    }
}

/// Why a proposed trade was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum RejectReason {
    /// The day's realized loss has reached the daily limit.
    DailyLimitExceeded {
        /// Realized P&L observed for the day.
        observed: Decimal,
        /// Configured daily loss limit.
        limit: Decimal,
    },
    /// The week's realized loss has reached the weekly limit.
    WeeklyLimitExceeded {
        /// Realized P&L observed for the week.
        observed: Decimal,
        /// Configured weekly loss limit.
        limit: Decimal,
    },
    /// Open exposure plus the proposed risk exceeds the portfolio cap.
    ExposureExceeded {
        /// Risk amount the proposed trade would add.
        proposed: Decimal,
        /// Exposure already open.
        open: Decimal,
        /// Account-currency exposure cap.
        cap: Decimal,
    },
    /// Current drawdown exceeds the configured tolerance.
    DrawdownExceeded {
        /// Observed drawdown fraction.
        observed: Decimal,
        /// Configured drawdown tolerance.
        limit: Decimal,
    },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DailyLimitExceeded { observed, limit } => {
                write!(f, "daily loss limit reached: P&L {observed}, limit {limit}")
            }
            Self::WeeklyLimitExceeded { observed, limit } => {
                write!(f, "weekly loss limit reached: P&L {observed}, limit {limit}")
            }
            Self::ExposureExceeded {
                proposed,
                open,
                cap,
            } => {
                write!(
                    f,
                    "exposure cap exceeded: open {open} + proposed {proposed} > cap {cap}"
                )
            }
            Self::DrawdownExceeded { observed, limit } => {
                write!(f, "drawdown tolerance exceeded: {observed} > {limit}")
            }
        }
    }
}

/// Outcome of constraint validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The proposed trade may be sized.
    Allowed,
    /// The proposed trade is rejected.
    Rejected(RejectReason),
}

impl Verdict {
    /// Whether sizing may proceed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Validates proposed trades against account-level constraints.
///
/// Pure validation; no side effects.
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    settings: PositionSettings,
}

impl ConstraintValidator {
    /// Create a validator over the given settings.
    #[must_use]
    pub const fn new(settings: PositionSettings) -> Self {
        Self { settings }
    }

    /// Validate a proposed trade risk amount against the snapshot.
    ///
    /// Checks short-circuit in documented order; the first breach wins.
    /// Loss limits compare realized P&L only; the proposed risk counts
    /// toward the exposure check. A zero loss limit disables that check.
    #[must_use]
    pub fn validate(&self, proposed_risk: Decimal, snapshot: &AccountSnapshot) -> Verdict {
        let settings = &self.settings;

        if settings.daily_loss_limit > Decimal::ZERO
            && snapshot.day_pnl <= -settings.daily_loss_limit
        {
            return self.reject(RejectReason::DailyLimitExceeded {
                observed: snapshot.day_pnl,
                limit: settings.daily_loss_limit,
            });
        }

        if settings.weekly_loss_limit > Decimal::ZERO
            && snapshot.week_pnl <= -settings.weekly_loss_limit
        {
            return self.reject(RejectReason::WeeklyLimitExceeded {
                observed: snapshot.week_pnl,
                limit: settings.weekly_loss_limit,
            });
        }

        let cap = settings.exposure_cap();
        if snapshot.open_exposure + proposed_risk > cap {
            return self.reject(RejectReason::ExposureExceeded {
                proposed: proposed_risk,
                open: snapshot.open_exposure,
                cap,
            });
        }

        if snapshot.current_drawdown > settings.max_drawdown_tolerance {
            return self.reject(RejectReason::DrawdownExceeded {
                observed: snapshot.current_drawdown,
                limit: settings.max_drawdown_tolerance,
            });
        }

        Verdict::Allowed
    }

    fn reject(&self, reason: RejectReason) -> Verdict {
        tracing::warn!(%reason, "proposed trade rejected");
        Verdict::Rejected(reason)
    }
}
