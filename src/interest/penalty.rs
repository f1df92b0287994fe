use crate::decimal::{Money, Rate};

/// late penalty that escalates linearly with each started overdue week
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatePenaltySchedule {
    /// rate added per overdue week; week k is charged k * step
    pub step: Rate,
}

impl LatePenaltySchedule {
    pub fn new(step: Rate) -> Self {
        Self { step }
    }

    /// rate applied in overdue week `k` (1-based)
    pub fn rate_for_week(&self, k: u32) -> Rate {
        self.step.times(k)
    }

    /// penalty for overdue week `k` against the principal still owed then
    pub fn charge_for_week(&self, principal_remaining: Money, k: u32) -> Money {
        if k == 0 {
            return Money::ZERO;
        }
        principal_remaining * self.rate_for_week(k)
    }
}
