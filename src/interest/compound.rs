use crate::config::AccrualConfig;
use crate::decimal::{Money, Rate};
use crate::interest::{DuePreview, PreviewCalculator};

/// the earlier compounding formula, kept for side-by-side previews
///
/// Interest compounds weekly on the original principal and a flat late add-on
/// of `step * principal` is charged for every week after the first. Payments
/// are not considered, so this must never be used for ledger balances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundingPreview {
    pub weekly_rate: Rate,
    pub late_step_rate: Rate,
}

impl CompoundingPreview {
    pub fn new(weekly_rate: Rate, late_step_rate: Rate) -> Self {
        Self {
            weekly_rate,
            late_step_rate,
        }
    }

    pub fn from_config(config: &AccrualConfig) -> Self {
        Self::new(config.weekly_interest_rate, config.late_step_rate)
    }
}

impl PreviewCalculator for CompoundingPreview {
    fn preview(&self, principal: Money, weeks: u32) -> DuePreview {
        if weeks == 0 {
            return DuePreview {
                principal,
                interest: Money::ZERO,
                late: Money::ZERO,
                total: principal.to_cents(),
                weeks,
            };
        }

        let interest = principal.compound(self.weekly_rate, weeks) - principal;
        let late = principal.simple_interest(self.late_step_rate, weeks - 1);

        DuePreview {
            principal,
            interest,
            late,
            total: (principal + interest + late).to_cents(),
            weeks,
        }
    }

    fn method(&self) -> &'static str {
        "weekly compounding, flat late add-on"
    }
}

/// amount due under the compounding formula; non-positive weeks owe the principal
pub fn compounding_amount_due(principal: Money, weeks_elapsed: i64, config: &AccrualConfig) -> Money {
    let weeks = u32::try_from(weeks_elapsed.max(0)).unwrap_or(u32::MAX);
    CompoundingPreview::from_config(config).preview(principal, weeks).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_elapsed_weeks_owes_principal() {
        let config = AccrualConfig::standard();
        assert_eq!(compounding_amount_due(Money::from_major(1_000), 0, &config), Money::from_major(1_000));
        assert_eq!(compounding_amount_due(Money::from_major(1_000), -2, &config), Money::from_major(1_000));
    }

    #[test]
    fn test_first_week_has_no_late_add_on() {
        let config = AccrualConfig::standard();
        assert_eq!(compounding_amount_due(Money::from_major(1_000), 1, &config), Money::from_major(1_100));
    }

    #[test]
    fn test_compounding_with_late_add_on() {
        let preview = CompoundingPreview::from_config(&AccrualConfig::standard());
        let result = preview.preview(Money::from_major(1_000), 3);

        // 1000 * 1.1^3 = 1331, late 2 * 25
        assert_eq!(result.interest, Money::from_major(331));
        assert_eq!(result.late, Money::from_major(50));
        assert_eq!(result.total, Money::from_major(1_381));
    }

    #[test]
    fn test_diverges_from_canonical_engine() {
        use crate::interest::AccrualEngine;
        use crate::terms::LoanTerms;
        use chrono::NaiveDate;

        let disbursed = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let terms = LoanTerms::with_term_weeks(Money::from_major(200_000), disbursed, 1).unwrap();
        let engine = AccrualEngine::standard();
        let canonical = engine
            .compute(&terms, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(), &[])
            .unwrap();

        let legacy = compounding_amount_due(Money::from_major(200_000), 3, engine.config());
        assert_eq!(canonical.outstanding, Money::from_major(275_000));
        assert_eq!(legacy, Money::from_major(276_200));
    }
}
