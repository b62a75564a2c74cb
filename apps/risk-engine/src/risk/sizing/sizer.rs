//! Core position sizing logic.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::error::EngineError;
use crate::models::{Direction, PositionSettings};
use crate::risk::constraints::Verdict;

use super::adjustments::apply_adjustments;
use super::error::SizingError;
use super::types::{SizeRecommendation, TradeProposal};

const SCORE_CEILING: Decimal = dec!(100);

/// Position sizer implementing fixed-fractional sizing with adaptive
/// adjustments.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    settings: PositionSettings,
}

impl PositionSizer {
    /// Create a sizer over the given settings.
    #[must_use]
    pub const fn new(settings: PositionSettings) -> Self {
        Self { settings }
    }

    /// Base notional before adjustments: the per-trade risk amount divided
    /// by the stop-loss fraction.
    #[must_use]
    pub fn base_notional(&self) -> Decimal {
        self.settings.risk_amount_per_trade() / self.settings.stop_loss_percent
    }

    /// Produce a size recommendation for an approved proposal.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConstraintViolation`] when `verdict` is not
    ///   [`Verdict::Allowed`]: sizing an unapproved trade is caller
    ///   misuse, not a rejection to surface to the user.
    /// - [`EngineError::Sizing`] when the proposal itself is unusable
    ///   (non-positive entry price, out-of-range score, size rounds to
    ///   zero).
    pub fn recommend(
        &self,
        proposal: &TradeProposal,
        risk_score: Decimal,
        verdict: &Verdict,
    ) -> Result<SizeRecommendation, EngineError> {
        if !verdict.is_allowed() {
            return Err(EngineError::ConstraintViolation(format!(
                "position sizer requires an allowed verdict, got {verdict:?}"
            )));
        }
        self.validate_inputs(proposal, risk_score)?;

        let (adjusted, adjustments) =
            apply_adjustments(self.base_notional(), &self.settings, proposal, risk_score);

        let multiplier = Decimal::from(proposal.kind.contract_multiplier());
        let unit_cost = proposal.entry_price * multiplier;
        let quantity = (adjusted / unit_cost).floor().to_u64().unwrap_or(0);
        if quantity == 0 {
            return Err(EngineError::Sizing(SizingError::RoundsToZero {
                notional: adjusted,
                unit_cost,
            }));
        }

        let notional = Decimal::from(quantity) * unit_cost;
        let (stop_price, target_price) = self.stop_and_target(proposal);

        tracing::debug!(
            symbol = %proposal.symbol,
            quantity,
            %notional,
            "position size recommended"
        );

        Ok(SizeRecommendation {
            quantity,
            notional,
            risk_amount: notional * self.settings.stop_loss_percent,
            stop_price,
            target_price,
            adjustments,
        })
    }

    fn validate_inputs(
        &self,
        proposal: &TradeProposal,
        risk_score: Decimal,
    ) -> Result<(), SizingError> {
        if proposal.entry_price <= Decimal::ZERO {
            return Err(SizingError::InvalidInput(
                "entry price must be positive".to_string(),
            ));
        }
        if risk_score < Decimal::ZERO || risk_score > SCORE_CEILING {
            return Err(SizingError::InvalidInput(format!(
                "risk score must be in [0, 100], got {risk_score}"
            )));
        }
        Ok(())
    }

    /// Stop from the configured stop-loss fraction; target at the
    /// configured multiple of the stop distance.
    fn stop_and_target(&self, proposal: &TradeProposal) -> (Decimal, Decimal) {
        let entry = proposal.entry_price;
        let stop_distance = entry * self.settings.stop_loss_percent;
        let target_distance = stop_distance * self.settings.risk_reward_ratio;

        match proposal.direction {
            Direction::Long => (entry - stop_distance, entry + target_distance),
            Direction::Short => (entry + stop_distance, entry - target_distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstrumentKind;
    use crate::risk::constraints::RejectReason;

    fn proposal() -> TradeProposal {
        TradeProposal {
            symbol: "AAPL".to_string(),
            entry_price: dec!(100),
            direction: Direction::Long,
            kind: InstrumentKind::Equity,
            correlated_exposure_open: false,
            elevated_volatility: false,
        }
    }

    fn sizer() -> PositionSizer {
        // Defaults: 100k account, 1% risk, 5% stop, 2:1 reward.
        PositionSizer::new(PositionSettings::default())
    }

    #[test]
    fn test_base_notional_worked_example() {
        // 100000 * 0.01 / 0.05 = 20000
        assert_eq!(sizer().base_notional(), dec!(20000));
    }

    #[test]
    fn test_recommend_equity_long() {
        let rec = sizer()
            .recommend(&proposal(), dec!(42), &Verdict::Allowed)
            .unwrap();
        assert_eq!(rec.quantity, 200);
        assert_eq!(rec.notional, dec!(20000));
        assert_eq!(rec.risk_amount, dec!(1000));
        assert_eq!(rec.stop_price, dec!(95.00));
        assert_eq!(rec.target_price, dec!(110.00));
        assert!(rec.adjustments.is_empty());
    }

    #[test]
    fn test_stop_distance_matches_stop_loss_percent() {
        let rec = sizer()
            .recommend(&proposal(), dec!(10), &Verdict::Allowed)
            .unwrap();
        let distance = (proposal().entry_price - rec.stop_price) / proposal().entry_price;
        assert_eq!(distance, PositionSettings::default().stop_loss_percent);
    }

    #[test]
    fn test_recommend_short_flips_stop_and_target() {
        let mut p = proposal();
        p.direction = Direction::Short;
        let rec = sizer().recommend(&p, dec!(10), &Verdict::Allowed).unwrap();
        assert_eq!(rec.stop_price, dec!(105.00));
        assert_eq!(rec.target_price, dec!(90.00));
    }

    #[test]
    fn test_recommend_option_uses_contract_multiplier() {
        let mut p = proposal();
        p.kind = InstrumentKind::Option;
        p.entry_price = dec!(3);
        // 20000 / (3 * 100) = 66 contracts
        let rec = sizer().recommend(&p, dec!(10), &Verdict::Allowed).unwrap();
        assert_eq!(rec.quantity, 66);
        assert_eq!(rec.notional, dec!(19800));
    }

    #[test]
    fn test_high_risk_score_halves_quantity() {
        let rec = sizer()
            .recommend(&proposal(), dec!(80), &Verdict::Allowed)
            .unwrap();
        assert_eq!(rec.quantity, 100);
    }

    #[test]
    fn test_rejected_verdict_is_precondition_violation() {
        let verdict = Verdict::Rejected(RejectReason::DrawdownExceeded {
            observed: dec!(0.2),
            limit: dec!(0.15),
        });
        let err = sizer()
            .recommend(&proposal(), dec!(10), &verdict)
            .unwrap_err();
        assert!(matches!(err, EngineError::ConstraintViolation(_)));
    }

    #[test]
    fn test_zero_entry_price_is_sizing_error() {
        let mut p = proposal();
        p.entry_price = Decimal::ZERO;
        let err = sizer()
            .recommend(&p, dec!(10), &Verdict::Allowed)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Sizing(SizingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_score_is_sizing_error() {
        let err = sizer()
            .recommend(&proposal(), dec!(101), &Verdict::Allowed)
            .unwrap_err();
        assert!(matches!(err, EngineError::Sizing(_)));
    }

    #[test]
    fn test_unaffordable_entry_rounds_to_zero() {
        let mut p = proposal();
        p.entry_price = dec!(25000);
        let err = sizer()
            .recommend(&p, dec!(10), &Verdict::Allowed)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Sizing(SizingError::RoundsToZero { .. })
        ));
    }
}
