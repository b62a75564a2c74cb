//! Account-level position sizing settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Account-level sizing and loss-limit settings.
///
/// Fractions are expressed in [0, 1]; loss limits are account-currency
/// amounts (a zero limit disables the corresponding check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSettings {
    /// Total account value in account currency.
    pub account_value: Decimal,
    /// Fraction of the account risked on a single trade.
    pub account_risk_per_trade: Decimal,
    /// Maximum fraction of the account at risk across open positions.
    pub max_portfolio_exposure: Decimal,
    /// Stop-loss distance as a fraction of entry price.
    pub stop_loss_percent: Decimal,
    /// Reward-to-risk ratio used to derive the target price.
    pub risk_reward_ratio: Decimal,
    /// Daily realized-loss limit in account currency (0 disables).
    pub daily_loss_limit: Decimal,
    /// Weekly realized-loss limit in account currency (0 disables).
    pub weekly_loss_limit: Decimal,
    /// Scaling factor applied to every computed size, (0, 1].
    pub position_scaling: Decimal,
    /// Size multiplier applied when correlated exposure is open, (0, 1].
    pub correlation_adjustment: Decimal,
    /// Size multiplier applied under elevated volatility, (0, 1].
    pub volatility_multiplier: Decimal,
    /// Maximum tolerated drawdown as a fraction of peak equity.
    pub max_drawdown_tolerance: Decimal,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            account_value: dec!(100000),
            account_risk_per_trade: dec!(0.01),
            max_portfolio_exposure: dec!(0.06),
            stop_loss_percent: dec!(0.05),
            risk_reward_ratio: dec!(2),
            daily_loss_limit: dec!(2000),
            weekly_loss_limit: dec!(5000),
            position_scaling: dec!(1),
            correlation_adjustment: dec!(0.75),
            volatility_multiplier: dec!(0.8),
            max_drawdown_tolerance: dec!(0.15),
        }
    }
}

impl PositionSettings {
    /// Validate ranges and cross-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_value <= Decimal::ZERO {
            return Err(ValidationError::new(
                "settings.accountValue",
                "must be positive",
            ));
        }
        check_fraction(self.account_risk_per_trade, "settings.accountRiskPerTrade")?;
        check_fraction(self.max_portfolio_exposure, "settings.maxPortfolioExposure")?;
        check_fraction(self.max_drawdown_tolerance, "settings.maxDrawdownTolerance")?;
        if self.stop_loss_percent <= Decimal::ZERO || self.stop_loss_percent > Decimal::ONE {
            return Err(ValidationError::new(
                "settings.stopLossPercent",
                "must be in (0, 1]",
            ));
        }
        if self.risk_reward_ratio <= Decimal::ZERO {
            return Err(ValidationError::new(
                "settings.riskRewardRatio",
                "must be positive",
            ));
        }
        if self.daily_loss_limit < Decimal::ZERO {
            return Err(ValidationError::new(
                "settings.dailyLossLimit",
                "must not be negative",
            ));
        }
        if self.weekly_loss_limit < Decimal::ZERO {
            return Err(ValidationError::new(
                "settings.weeklyLossLimit",
                "must not be negative",
            ));
        }
        check_multiplier(self.position_scaling, "settings.positionScaling")?;
        check_multiplier(self.correlation_adjustment, "settings.correlationAdjustment")?;
        check_multiplier(self.volatility_multiplier, "settings.volatilityMultiplier")?;
        if self.account_risk_per_trade > self.max_portfolio_exposure {
            return Err(ValidationError::new(
                "settings.accountRiskPerTrade",
                "must not exceed maxPortfolioExposure",
            ));
        }
        Ok(())
    }

    /// Account-currency amount risked on a single trade.
    #[must_use]
    pub fn risk_amount_per_trade(&self) -> Decimal {
        self.account_value * self.account_risk_per_trade
    }

    /// Account-currency exposure cap across open positions.
    #[must_use]
    pub fn exposure_cap(&self) -> Decimal {
        self.account_value * self.max_portfolio_exposure
    }
}

fn check_fraction(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::new(
            field,
            format!("must be in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

fn check_multiplier(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::new(
            field,
            format!("must be in (0, 1], got {value}"),
        ));
    }
    Ok(())
}
