//! Adaptive sizing adjustments.
//!
//! All adjustments are multiplicative factors in (0, 1] applied to the
//! base notional. Settings-driven factors (scaling, correlation,
//! volatility) come from [`PositionSettings`]; the risk-score damping
//! ladder reduces size as the overall risk score climbs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::PositionSettings;

use super::types::{AdjustmentKind, AppliedAdjustment, TradeProposal};

/// Damping factor for the overall risk score.
///
/// - score >= 75: halve the position (trade smaller when most at risk)
/// - score >= 50: take 25% off
/// - otherwise: no reduction
#[must_use]
pub fn risk_score_damping(score: Decimal) -> Decimal {
    if score >= dec!(75) {
        dec!(0.5)
    } else if score >= dec!(50) {
        dec!(0.75)
    } else {
        Decimal::ONE
    }
}

/// Apply the full adjustment chain to a base notional.
///
/// Returns the adjusted notional and the trail of factors that actually
/// reduced it (factors of exactly 1 are not recorded).
#[must_use]
pub fn apply_adjustments(
    base_notional: Decimal,
    settings: &PositionSettings,
    proposal: &TradeProposal,
    risk_score: Decimal,
) -> (Decimal, Vec<AppliedAdjustment>) {
    let mut notional = base_notional;
    let mut trail = Vec::new();

    let mut apply = |kind: AdjustmentKind, factor: Decimal| {
        if factor < Decimal::ONE {
            notional *= factor;
            trail.push(AppliedAdjustment { kind, factor });
        }
    };

    apply(AdjustmentKind::Scaling, settings.position_scaling);
    if proposal.correlated_exposure_open {
        apply(AdjustmentKind::Correlation, settings.correlation_adjustment);
    }
    if proposal.elevated_volatility {
        apply(AdjustmentKind::Volatility, settings.volatility_multiplier);
    }
    apply(AdjustmentKind::RiskScore, risk_score_damping(risk_score));

    (notional, trail)
}
