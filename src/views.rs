//! Serializable views of a loan evaluated on a given date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{aging_bucket, overdue_weeks, started_weeks};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{AccrualEngine, AccrualResult};
use crate::ledger::{LedgerSource, MemoryLedger};
use crate::types::{AgingBucket, LoanId, RepaymentBadge};

/// one loan as a reporting screen would show it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub borrower: String,
    pub as_of: NaiveDate,
    pub terms: TermsView,
    pub balances: BalanceView,
    pub standing: StandingView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsView {
    pub principal: Money,
    pub disbursed_on: NaiveDate,
    pub agreed_due_on: NaiveDate,
    pub term_weeks: u32,
    pub weekly_interest_rate: Rate,
    pub late_step_rate: Rate,
    pub tx_charge: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceView {
    pub principal_receivable: Money,
    pub accrued_interest_fees: Money,
    pub outstanding: Money,
    pub interest_charged: Money,
    pub late_charged: Money,
    pub total_paid: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingView {
    pub overdue_weeks: u32,
    pub aging: AgingBucket,
    pub badge: RepaymentBadge,
    pub settled_on: Option<NaiveDate>,
    pub written_off_on: Option<NaiveDate>,
    pub write_off_amount: Money,
}

impl LoanView {
    pub fn build(ledger: &MemoryLedger, id: LoanId, as_of: NaiveDate, engine: &AccrualEngine) -> Result<Self> {
        let loan = ledger.loan(id)?;
        let accrual: AccrualResult = ledger.accrual_for(id, as_of, engine)?;

        // a settled loan is never overdue, whatever the calendar says
        let overdue = if accrual.is_settled() {
            0
        } else {
            overdue_weeks(as_of, Some(loan.agreed_due_on), loan.disbursed_on)
        };
        let weeks_elapsed = i64::from(started_weeks(loan.disbursed_on, as_of));

        Ok(LoanView {
            id,
            borrower: loan.borrower(),
            as_of,
            terms: TermsView {
                principal: loan.principal,
                disbursed_on: loan.disbursed_on,
                agreed_due_on: loan.agreed_due_on,
                term_weeks: loan.term_weeks,
                weekly_interest_rate: engine.config().weekly_interest_rate,
                late_step_rate: engine.config().late_step_rate,
                tx_charge: loan.tx_charge,
            },
            balances: BalanceView {
                principal_receivable: accrual.principal_receivable,
                accrued_interest_fees: accrual.accrued_interest_fees,
                outstanding: accrual.outstanding,
                interest_charged: accrual.interest,
                late_charged: accrual.late_incremental,
                total_paid: accrual.total_applied,
            },
            standing: StandingView {
                overdue_weeks: overdue,
                aging: aging_bucket(overdue),
                badge: RepaymentBadge::from_weeks_elapsed(weeks_elapsed),
                settled_on: accrual.settled_on,
                written_off_on: loan.written_off_on,
                write_off_amount: loan.write_off_amount,
            },
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
