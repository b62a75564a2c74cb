//! Behavioral risk assessments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// Upper bound of each behavioral score
const BEHAVIORAL_SCALE: Decimal = dec!(10);

/// Behavioral self-assessment before scoring.
///
/// The caller records how the trader feels; the risk scorer combines these
/// with market metrics into a finalized [`RiskAssessment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    /// Assessment date.
    pub date: DateTime<Utc>,
    /// Emotional state score, 0-10 (10 = most compromised).
    pub emotional_score: Decimal,
    /// Fear-of-missing-out score, 0-10.
    pub fomo_score: Decimal,
    /// Bias score, 0-10.
    pub bias_score: Decimal,
    /// Free-form notes.
    pub notes: String,
}

impl AssessmentDraft {
    /// Validate that every behavioral score sits in [0, 10].
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_score(self.emotional_score, "assessment.emotionalScore")?;
        check_score(self.fomo_score, "assessment.fomoScore")?;
        check_score(self.bias_score, "assessment.biasScore")?;
        Ok(())
    }

    /// Sum of the three behavioral scores (0-30).
    #[must_use]
    pub fn behavioral_total(&self) -> Decimal {
        self.emotional_score + self.fomo_score + self.bias_score
    }
}

fn check_score(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > BEHAVIORAL_SCALE {
        return Err(ValidationError::new(
            field,
            format!("must be in [0, 10], got {value}"),
        ));
    }
    Ok(())
}

/// A finalized risk assessment.
///
/// Invariant: `overall_score` equals the risk scorer's weighted combination
/// of the behavioral fields and the market metrics it was finalized
/// against. Assessments are finalized by
/// [`RiskScorer::finalize`](crate::risk::RiskScorer::finalize), which is
/// the only path that fills `overall_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Unique assessment identifier.
    pub id: String,
    /// Assessment date.
    pub date: DateTime<Utc>,
    /// Emotional state score, 0-10.
    pub emotional_score: Decimal,
    /// Fear-of-missing-out score, 0-10.
    pub fomo_score: Decimal,
    /// Bias score, 0-10.
    pub bias_score: Decimal,
    /// Combined risk score, 0-100.
    pub overall_score: Decimal,
    /// Free-form notes.
    pub notes: String,
}
