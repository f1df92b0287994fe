pub mod accrual;
pub mod compound;
pub mod penalty;
pub mod schedule;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use accrual::{compute, AccrualEngine, AccrualResult};
pub use compound::{compounding_amount_due, CompoundingPreview};
pub use penalty::LatePenaltySchedule;
pub use schedule::{scheduled_due_on_date, FlatPreview, ScheduledDue};

/// non-accruing estimate of an amount due
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuePreview {
    pub principal: Money,
    pub interest: Money,
    pub late: Money,
    /// rounded to cents
    pub total: Money,
    pub weeks: u32,
}

/// quick estimates shown before a loan exists; they ignore payments entirely
pub trait PreviewCalculator {
    fn preview(&self, principal: Money, weeks: u32) -> DuePreview;

    fn method(&self) -> &'static str;
}
