//! Evaluation pipeline orchestration.
//!
//! One evaluation runs metrics → score → validate → size for a single
//! account context. The stages are pure and sequenced only by data
//! dependency, so independent contexts evaluate in parallel with no
//! shared state ([`RiskEngine::evaluate_batch`]).

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::metrics::{Lookback, MetricsAggregator, TradeMetrics};
use crate::models::{AssessmentDraft, ClosedTrade, PositionSettings, RiskAssessment};
use crate::risk::sizing::{SizeRecommendation, TradeProposal};
use crate::risk::{AccountSnapshot, ConstraintValidator, PositionSizer, RiskScorer, Verdict};
use crate::store::RecordStore;

/// Everything one evaluation consumes.
///
/// Borrowed views over caller-owned records; the engine mutates nothing.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    /// Closed trades in entry order, oldest first.
    pub trades: &'a [ClosedTrade],
    /// Account settings to size and validate against.
    pub settings: &'a PositionSettings,
    /// Behavioral self-assessment to finalize.
    pub draft: &'a AssessmentDraft,
    /// The trade being considered.
    pub proposal: &'a TradeProposal,
    /// Account-currency amount already at risk across open positions.
    pub open_exposure: Decimal,
    /// Evaluation instant (drives daily/weekly buckets).
    pub as_of: DateTime<Utc>,
}

/// Result of evaluating one proposed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvaluation {
    /// Unique evaluation identifier.
    pub id: String,
    /// Evaluation instant.
    pub as_of: DateTime<Utc>,
    /// Aggregated metrics the decision was based on.
    pub metrics: TradeMetrics,
    /// Finalized risk assessment.
    pub assessment: RiskAssessment,
    /// Constraint verdict.
    pub verdict: Verdict,
    /// Size recommendation; `None` when the verdict rejected the trade.
    pub sizing: Option<SizeRecommendation>,
}

/// The risk engine: stateless pipeline over caller-supplied records.
#[derive(Debug, Clone, Copy)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    /// Create an engine from validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one proposed trade.
    ///
    /// A rejected verdict is a successful evaluation with `sizing: None`;
    /// errors are reserved for missing history, invalid records, and
    /// caller misuse.
    pub fn evaluate(&self, input: &EvaluationInput<'_>) -> Result<TradeEvaluation> {
        input.settings.validate()?;

        let metrics = MetricsAggregator::new(Lookback::LastN(self.config.lookback_trades))
            .aggregate(input.trades, input.settings.account_value, input.as_of)?;

        let assessment = RiskScorer::new(self.config.scoring).finalize(input.draft, &metrics)?;

        let snapshot = AccountSnapshot::from_metrics(&metrics, input.open_exposure);
        let proposed_risk = input.settings.risk_amount_per_trade();
        let validator = ConstraintValidator::new(input.settings.clone());
        let verdict = validator.validate(proposed_risk, &snapshot);

        let sizing = if verdict.is_allowed() {
            let sizer = PositionSizer::new(input.settings.clone());
            Some(sizer.recommend(input.proposal, assessment.overall_score, &verdict)?)
        } else {
            None
        };

        tracing::info!(
            symbol = %input.proposal.symbol,
            overall_score = %assessment.overall_score,
            allowed = verdict.is_allowed(),
            "trade evaluated"
        );

        Ok(TradeEvaluation {
            id: Uuid::new_v4().to_string(),
            as_of: input.as_of,
            metrics,
            assessment,
            verdict,
            sizing,
        })
    }

    /// Evaluate a proposed trade against records pulled from a store.
    ///
    /// Store failures propagate as [`EngineError::DataUnavailable`]; no
    /// retries happen here.
    pub fn evaluate_from_store(
        &self,
        store: &dyn RecordStore,
        draft: &AssessmentDraft,
        proposal: &TradeProposal,
        open_exposure: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<TradeEvaluation> {
        let trades = store.closed_trades()?;
        let settings = store.position_settings()?;

        self.evaluate(&EvaluationInput {
            trades: &trades,
            settings: &settings,
            draft,
            proposal,
            open_exposure,
            as_of,
        })
    }

    /// Evaluate independent account contexts in parallel.
    ///
    /// Each input is a separate account context; results come back in
    /// input order.
    pub fn evaluate_batch(
        &self,
        inputs: &[EvaluationInput<'_>],
    ) -> Vec<Result<TradeEvaluation>> {
        inputs.par_iter().map(|input| self.evaluate(input)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{Direction, InstrumentKind, Trade};
    use crate::risk::RejectReason;
    use crate::store::InMemoryRecordStore;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn closed(day: u32, pnl: Decimal) -> ClosedTrade {
        let entry_date = Utc.with_ymd_and_hms(2025, 6, day, 15, 0, 0).unwrap();
        ClosedTrade {
            trade: Trade {
                id: format!("t-{day}"),
                symbol: "SPY".to_string(),
                sector: "Index".to_string(),
                strategy: "swing".to_string(),
                kind: InstrumentKind::Equity,
                week: 23,
                entry_date,
                expiration_date: None,
                entry_price: dec!(100),
                stop: dec!(95),
                target: dec!(110),
                leg_number: 1,
                is_multi_leg: false,
                short_leg_exp: None,
                timeframe: None,
                notes: String::new(),
            },
            exit_date: entry_date + chrono::Duration::days(1),
            exit_price: if pnl > Decimal::ZERO { dec!(110) } else { dec!(95) },
            realized_pnl: pnl,
        }
    }

    fn draft() -> AssessmentDraft {
        AssessmentDraft {
            date: Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap(),
            emotional_score: dec!(8),
            fomo_score: dec!(6),
            bias_score: dec!(7),
            notes: String::new(),
        }
    }

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

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 20, 0, 0).unwrap()
    }

    fn engine() -> RiskEngine {
        RiskEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_full_pipeline_allows_and_sizes() {
        // Winners only, entered a week before the evaluation date.
        let trades = vec![closed(2, dec!(500)), closed(3, dec!(500))];
        let settings = PositionSettings::default();
        let evaluation = engine()
            .evaluate(&EvaluationInput {
                trades: &trades,
                settings: &settings,
                draft: &draft(),
                proposal: &proposal(),
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            })
            .unwrap();

        // Zero drawdown and no streak: behavioral component only.
        assert_eq!(evaluation.assessment.overall_score, dec!(42));
        assert!(evaluation.verdict.is_allowed());
        let sizing = evaluation.sizing.unwrap();
        assert_eq!(sizing.quantity, 200);
        assert_eq!(sizing.notional, dec!(20000));
    }

    #[test]
    fn test_rejection_yields_no_sizing() {
        // A 2000 loss entered on the evaluation day trips the daily limit.
        let trades = vec![closed(2, dec!(500)), closed(10, dec!(-2000))];
        let settings = PositionSettings::default();
        let evaluation = engine()
            .evaluate(&EvaluationInput {
                trades: &trades,
                settings: &settings,
                draft: &draft(),
                proposal: &proposal(),
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            })
            .unwrap();

        assert!(matches!(
            evaluation.verdict,
            Verdict::Rejected(RejectReason::DailyLimitExceeded { .. })
        ));
        assert!(evaluation.sizing.is_none());
    }

    #[test]
    fn test_empty_history_is_insufficient_data() {
        let settings = PositionSettings::default();
        let err = engine()
            .evaluate(&EvaluationInput {
                trades: &[],
                settings: &settings,
                draft: &draft(),
                proposal: &proposal(),
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { .. }));
    }

    #[test]
    fn test_invalid_settings_rejected_before_metrics() {
        let trades = vec![closed(2, dec!(500))];
        let settings = PositionSettings {
            account_risk_per_trade: dec!(0.5),
            max_portfolio_exposure: dec!(0.1),
            ..Default::default()
        };
        let err = engine()
            .evaluate(&EvaluationInput {
                trades: &trades,
                settings: &settings,
                draft: &draft(),
                proposal: &proposal(),
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_evaluate_from_store() {
        let store = InMemoryRecordStore::new();
        store.save_closed_trade(closed(2, dec!(500))).unwrap();
        store
            .save_position_settings(PositionSettings::default())
            .unwrap();

        let evaluation = engine()
            .evaluate_from_store(&store, &draft(), &proposal(), Decimal::ZERO, as_of())
            .unwrap();
        assert!(evaluation.verdict.is_allowed());
    }

    #[test]
    fn test_store_without_settings_is_data_unavailable() {
        let store = InMemoryRecordStore::new();
        store.save_closed_trade(closed(2, dec!(500))).unwrap();

        let err = engine()
            .evaluate_from_store(&store, &draft(), &proposal(), Decimal::ZERO, as_of())
            .unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable(_)));
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let winning = vec![closed(2, dec!(500))];
        let losing = vec![closed(10, dec!(-2000))];
        let settings = PositionSettings::default();
        let d = draft();
        let p = proposal();

        let inputs = vec![
            EvaluationInput {
                trades: &winning,
                settings: &settings,
                draft: &d,
                proposal: &p,
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            },
            EvaluationInput {
                trades: &losing,
                settings: &settings,
                draft: &d,
                proposal: &p,
                open_exposure: Decimal::ZERO,
                as_of: as_of(),
            },
        ];

        let results = engine().evaluate_batch(&inputs);
        assert_eq!(results.len(), 2);
        assert!(results[0].as_ref().unwrap().verdict.is_allowed());
        assert!(!results[1].as_ref().unwrap().verdict.is_allowed());
    }

    #[test]
    fn test_rejects_bad_engine_config() {
        let config = EngineConfig {
            lookback_trades: 0,
            ..Default::default()
        };
        assert!(RiskEngine::new(config).is_err());
    }
}
