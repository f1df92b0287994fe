use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{DuePreview, PreviewCalculator};
use crate::terms::due_date_after;

/// flat interest over the agreed term, no late component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatPreview {
    pub weekly_rate: Rate,
}

impl FlatPreview {
    pub fn new(weekly_rate: Rate) -> Self {
        Self { weekly_rate }
    }
}

impl PreviewCalculator for FlatPreview {
    fn preview(&self, principal: Money, weeks: u32) -> DuePreview {
        let interest = principal.simple_interest(self.weekly_rate, weeks);
        DuePreview {
            principal,
            interest,
            late: Money::ZERO,
            total: (principal + interest).to_cents(),
            weeks,
        }
    }

    fn method(&self) -> &'static str {
        "flat weekly interest"
    }
}

/// what a new loan would owe on its due date if repaid on time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledDue {
    pub due_on: NaiveDate,
    pub amount: Money,
    pub term_weeks: u32,
}

/// form preview for a loan that does not exist yet; not a ledger balance
pub fn scheduled_due_on_date(
    principal: Money,
    disbursed_on: NaiveDate,
    term_weeks: u32,
    weekly_rate: Rate,
) -> Result<ScheduledDue> {
    let term_weeks = term_weeks.max(1);
    let due_on = due_date_after(disbursed_on, term_weeks)?;
    let preview = FlatPreview::new(weekly_rate).preview(principal, term_weeks);

    Ok(ScheduledDue {
        due_on,
        amount: preview.total,
        term_weeks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flat_schedule() {
        let due = scheduled_due_on_date(Money::from_major(100_000), date(2024, 1, 1), 3, Rate::from_percentage(10)).unwrap();
        assert_eq!(due.due_on, date(2024, 1, 22));
        assert_eq!(due.amount, Money::from_major(130_000));
        assert_eq!(due.term_weeks, 3);
    }

    #[test]
    fn test_zero_term_previews_one_week() {
        let due = scheduled_due_on_date(Money::from_major(1_000), date(2024, 1, 1), 0, Rate::from_percentage(10)).unwrap();
        assert_eq!(due.term_weeks, 1);
        assert_eq!(due.due_on, date(2024, 1, 8));
        assert_eq!(due.amount, Money::from_major(1_100));
    }

    #[test]
    fn test_term_past_calendar_end_is_an_error() {
        let result = scheduled_due_on_date(Money::from_major(1_000), date(2024, 1, 1), u32::MAX, Rate::from_percentage(10));
        assert!(matches!(result, Err(crate::errors::LedgerError::InvalidTerm { .. })));
    }

    #[test]
    fn test_preview_has_no_late_component() {
        let preview = FlatPreview::new(Rate::from_percentage(10)).preview(Money::from_major(500), 10);
        assert_eq!(preview.late, Money::ZERO);
        assert_eq!(preview.total, Money::from_major(1_000));
    }
}
