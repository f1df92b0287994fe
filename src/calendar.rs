//! Week counting on calendar dates.
//!
//! A week counts as started once any part of it has elapsed, so spans are
//! rounded up to whole weeks. Spans of zero or fewer days start no weeks.

use chrono::{Days, NaiveDate};

use crate::types::AgingBucket;

pub const DAYS_PER_WEEK: i64 = 7;

/// ceil(days / 7), zero for non-positive spans
pub fn weeks_started_in(days: i64) -> u32 {
    if days <= 0 {
        return 0;
    }
    let weeks = (days + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK;
    u32::try_from(weeks).unwrap_or(u32::MAX)
}

/// weeks started between two dates
pub fn started_weeks(from: NaiveDate, to: NaiveDate) -> u32 {
    weeks_started_in((to - from).num_days())
}

/// started overdue weeks at `as_of`; zero without a due date or before disbursement
pub fn overdue_weeks(as_of: NaiveDate, due_on: Option<NaiveDate>, disbursed_on: NaiveDate) -> u32 {
    if as_of < disbursed_on {
        return 0;
    }
    match due_on {
        Some(due) if as_of > due => started_weeks(due, as_of),
        _ => 0,
    }
}

pub fn aging_bucket(overdue_weeks: u32) -> AgingBucket {
    AgingBucket::from_overdue_weeks(overdue_weeks)
}

/// date `weeks` whole weeks after `from`; `None` past the end of the calendar
pub fn add_weeks(from: NaiveDate, weeks: u32) -> Option<NaiveDate> {
    from.checked_add_days(Days::new(7 * u64::from(weeks)))
}
