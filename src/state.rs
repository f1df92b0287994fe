use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::{OutstandingBalances, Payment, PaymentWaterfall};
use crate::types::PaymentApplication;

/// running balances of one accrual walk; rebuilt from scratch on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualState {
    // balances
    pub principal_remaining: Money,
    pub accrued_interest: Money,
    pub accrued_late: Money,

    // week counters
    pub pre_due_weeks_charged: u32,
    pub overdue_weeks_charged: u32,

    // gross totals
    pub interest_charged: Money,
    pub late_charged: Money,
    pub total_applied: Money,
    pub excess_discarded: Money,

    pub settled_on: Option<NaiveDate>,
}

impl AccrualState {
    pub fn new(principal: Money) -> Self {
        Self {
            principal_remaining: principal,
            accrued_interest: Money::ZERO,
            accrued_late: Money::ZERO,
            pre_due_weeks_charged: 0,
            overdue_weeks_charged: 0,
            interest_charged: Money::ZERO,
            late_charged: Money::ZERO,
            total_applied: Money::ZERO,
            excess_discarded: Money::ZERO,
            settled_on: None,
        }
    }

    pub fn charge_interest(&mut self, amount: Money) {
        self.accrued_interest += amount;
        self.interest_charged += amount;
    }

    pub fn charge_late(&mut self, amount: Money) {
        self.accrued_late += amount;
        self.late_charged += amount;
    }

    pub fn balances(&self) -> OutstandingBalances {
        OutstandingBalances {
            accrued_interest: self.accrued_interest,
            accrued_late: self.accrued_late,
            principal: self.principal_remaining,
        }
    }

    /// interest plus late penalty still unpaid
    pub fn fees_outstanding(&self) -> Money {
        self.balances().fees()
    }

    pub fn has_principal(&self, epsilon: Decimal) -> bool {
        !self.principal_remaining.is_negligible(epsilon)
    }

    pub fn is_paid_off(&self, epsilon: Decimal) -> bool {
        self.principal_remaining.is_negligible(epsilon) && self.fees_outstanding().is_negligible(epsilon)
    }

    pub fn is_settled(&self) -> bool {
        self.settled_on.is_some()
    }

    /// run one payment through the waterfall
    pub fn apply_payment(&mut self, payment: &Payment, waterfall: &PaymentWaterfall) -> PaymentApplication {
        let mut balances = self.balances();
        let application = waterfall.apply(payment.amount, &mut balances);

        self.accrued_interest = balances.accrued_interest;
        self.accrued_late = balances.accrued_late;
        self.principal_remaining = balances.principal;
        self.total_applied += application.total_applied();
        self.excess_discarded += application.excess;

        application
    }

    /// mark settled if nothing meaningful is owed; sticky once set
    pub fn settle_if_paid(&mut self, on: NaiveDate, epsilon: Decimal) -> bool {
        if self.settled_on.is_none() && self.is_paid_off(epsilon) {
            self.settled_on = Some(on);
        }
        self.is_settled()
    }
}
