use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LedgerError, Result};

/// accrual configuration shared by every computation of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccrualConfig {
    /// interest charged on remaining principal for each started week
    pub weekly_interest_rate: Rate,
    /// penalty step; overdue week k is charged k * late_step_rate
    pub late_step_rate: Rate,
    /// term used when a loan carries neither term_weeks nor agreed_due_on
    pub default_term_weeks: u32,
    /// balances at or below this are treated as paid
    pub settlement_epsilon: Decimal,
}

impl AccrualConfig {
    /// 10% a week, 2.5% escalating late step, one-week default term
    pub fn standard() -> Self {
        Self {
            weekly_interest_rate: Rate::from_percentage(10),
            late_step_rate: Rate::from_decimal(dec!(0.025)),
            default_term_weeks: 1,
            settlement_epsilon: dec!(0.000000001),
        }
    }

    pub fn with_weekly_interest_rate(mut self, rate: Rate) -> Self {
        self.weekly_interest_rate = rate;
        self
    }

    pub fn with_late_step_rate(mut self, rate: Rate) -> Self {
        self.late_step_rate = rate;
        self
    }

    pub fn with_default_term_weeks(mut self, weeks: u32) -> Self {
        self.default_term_weeks = weeks;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.weekly_interest_rate.is_negative() {
            return Err(LedgerError::InvalidInterestRate {
                rate: self.weekly_interest_rate,
            });
        }
        if self.late_step_rate.is_negative() {
            return Err(LedgerError::InvalidInterestRate {
                rate: self.late_step_rate,
            });
        }
        if self.default_term_weeks == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "default_term_weeks must be at least 1".to_string(),
            });
        }
        if self.settlement_epsilon < Decimal::ZERO {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("settlement_epsilon must not be negative: {}", self.settlement_epsilon),
            });
        }
        Ok(())
    }

    /// parse from json; absent fields keep their standard values
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AccrualConfig = serde_json::from_str(json).map_err(|e| {
            LedgerError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config() {
        let config = AccrualConfig::standard();
        assert_eq!(config.weekly_interest_rate.as_decimal(), dec!(0.10));
        assert_eq!(config.late_step_rate.as_decimal(), dec!(0.025));
        assert_eq!(config.default_term_weeks, 1);
        assert_eq!(config.settlement_epsilon, dec!(0.000000001));
        assert!(config.validate().is_ok());
        assert_eq!(config, AccrualConfig::default());
    }

    #[test]
    fn test_negative_rates_rejected() {
        let config = AccrualConfig::standard()
            .with_weekly_interest_rate(Rate::from_decimal(dec!(-0.01)));
        assert!(matches!(config.validate(), Err(LedgerError::InvalidInterestRate { .. })));

        let config = AccrualConfig::standard()
            .with_late_step_rate(Rate::from_decimal(dec!(-0.5)));
        assert!(matches!(config.validate(), Err(LedgerError::InvalidInterestRate { .. })));
    }

    #[test]
    fn test_zero_default_term_rejected() {
        let config = AccrualConfig::standard().with_default_term_weeks(0);
        assert!(matches!(config.validate(), Err(LedgerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AccrualConfig::from_json(r#"{ "weekly_interest_rate": "0.08" }"#).unwrap();
        assert_eq!(config.weekly_interest_rate.as_decimal(), dec!(0.08));
        assert_eq!(config.late_step_rate.as_decimal(), dec!(0.025));
        assert_eq!(config.default_term_weeks, 1);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = AccrualConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfiguration { .. }));

        let err = AccrualConfig::from_json(r#"{ "late_step_rate": "-0.1" }"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInterestRate { .. }));
    }
}
