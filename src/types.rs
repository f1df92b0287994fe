use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a recorded payment
pub type PaymentId = Uuid;

/// aging bucket by started overdue weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    /// not overdue
    Current,
    /// 1 to 2 overdue weeks
    OneToTwoWeeks,
    /// 3 to 4 overdue weeks
    ThreeToFourWeeks,
    /// 5 or more overdue weeks
    FivePlusWeeks,
}

impl AgingBucket {
    pub fn from_overdue_weeks(weeks: u32) -> Self {
        match weeks {
            0 => AgingBucket::Current,
            1..=2 => AgingBucket::OneToTwoWeeks,
            3..=4 => AgingBucket::ThreeToFourWeeks,
            _ => AgingBucket::FivePlusWeeks,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "Current",
            AgingBucket::OneToTwoWeeks => "1–2w",
            AgingBucket::ThreeToFourWeeks => "3–4w",
            AgingBucket::FivePlusWeeks => "5+w",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// coarse badge shown next to a loan, keyed on weeks since disbursement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentBadge {
    Current,
    DueSoon,
    Late,
    SeverelyLate,
}

impl RepaymentBadge {
    pub fn from_weeks_elapsed(weeks_elapsed: i64) -> Self {
        if weeks_elapsed <= 0 {
            RepaymentBadge::Current
        } else if weeks_elapsed <= 1 {
            RepaymentBadge::DueSoon
        } else if weeks_elapsed <= 4 {
            RepaymentBadge::Late
        } else {
            RepaymentBadge::SeverelyLate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepaymentBadge::Current => "Current",
            RepaymentBadge::DueSoon => "Due soon",
            RepaymentBadge::Late => "Late",
            RepaymentBadge::SeverelyLate => "Severely late",
        }
    }
}

impl fmt::Display for RepaymentBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// how a single payment was split across balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentApplication {
    pub to_interest: Money,
    pub to_late: Money,
    pub to_principal: Money,
    /// amount beyond everything owed; discarded, never credited
    pub excess: Money,
}

impl PaymentApplication {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_late + self.to_principal
    }
}
