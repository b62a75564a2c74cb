//! Risk scoring (behavioral + market stress).
//!
//! Combines the trader's behavioral self-assessment with market stress
//! derived from recent performance into a single 0-100 score. The split
//! between the two components is configuration, not hardcoded policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ValidationError};
use crate::metrics::TradeMetrics;
use crate::models::{AssessmentDraft, RiskAssessment};

const SCORE_CEILING: Decimal = dec!(100);
const BEHAVIORAL_TOTAL_SCALE: Decimal = dec!(30);

/// Weighting configuration for the risk scorer.
///
/// Weights are points that must sum to 100, so each component reads
/// directly as its share of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Points allotted to the behavioral component.
    pub behavioral_weight: Decimal,
    /// Points allotted to the market-stress component.
    pub market_weight: Decimal,
    /// Drawdown at which the drawdown stress term saturates.
    pub drawdown_full_scale: Decimal,
    /// Loss streak at which the streak stress term saturates.
    pub loss_streak_full_scale: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            behavioral_weight: dec!(60),
            market_weight: dec!(40),
            drawdown_full_scale: dec!(0.25),
            loss_streak_full_scale: 5,
        }
    }
}

impl ScoringConfig {
    /// Validate weight and full-scale ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.behavioral_weight < Decimal::ZERO || self.market_weight < Decimal::ZERO {
            return Err(ValidationError::new(
                "scoring.weights",
                "weights must not be negative",
            ));
        }
        if self.behavioral_weight + self.market_weight != SCORE_CEILING {
            return Err(ValidationError::new(
                "scoring.weights",
                format!(
                    "behavioralWeight + marketWeight must sum to 100, got {}",
                    self.behavioral_weight + self.market_weight
                ),
            ));
        }
        if self.drawdown_full_scale <= Decimal::ZERO {
            return Err(ValidationError::new(
                "scoring.drawdownFullScale",
                "must be positive",
            ));
        }
        if self.loss_streak_full_scale == 0 {
            return Err(ValidationError::new(
                "scoring.lossStreakFullScale",
                "must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Deterministic risk scorer.
///
/// Pure: the same draft and metrics always yield the same score.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    /// Create a scorer with the given weighting configuration.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Compute the overall risk score, clamped to [0, 100].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when a behavioral score falls
    /// outside [0, 10].
    pub fn score(
        &self,
        draft: &AssessmentDraft,
        metrics: &TradeMetrics,
    ) -> Result<Decimal, EngineError> {
        draft.validate()?;

        let behavioral =
            self.config.behavioral_weight * draft.behavioral_total() / BEHAVIORAL_TOTAL_SCALE;
        let market = self.config.market_weight * self.market_stress(metrics);

        Ok((behavioral + market).clamp(Decimal::ZERO, SCORE_CEILING))
    }

    /// Finalize a draft into a [`RiskAssessment`] with the overall score
    /// populated.
    pub fn finalize(
        &self,
        draft: &AssessmentDraft,
        metrics: &TradeMetrics,
    ) -> Result<RiskAssessment, EngineError> {
        let overall_score = self.score(draft, metrics)?;
        tracing::debug!(%overall_score, "finalized risk assessment");

        Ok(RiskAssessment {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            emotional_score: draft.emotional_score,
            fomo_score: draft.fomo_score,
            bias_score: draft.bias_score,
            overall_score,
            notes: draft.notes.clone(),
        })
    }

    /// Market stress in [0, 1]: mean of a drawdown term and a loss-streak
    /// term, each saturating at its configured full scale.
    fn market_stress(&self, metrics: &TradeMetrics) -> Decimal {
        // Guard against division by zero on unvalidated configs
        let drawdown_term = if self.config.drawdown_full_scale > Decimal::ZERO {
            (metrics.current_drawdown / self.config.drawdown_full_scale).min(Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        let streak_scale = Decimal::from(self.config.loss_streak_full_scale.max(1));
        let streak_term = (Decimal::from(metrics.loss_streak) / streak_scale).min(Decimal::ONE);

        (drawdown_term + streak_term) / dec!(2)
    }
}
