use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_weeks, started_weeks};
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// loan terms as agreed at creation; read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub disbursed_on: NaiveDate,
    pub agreed_due_on: Option<NaiveDate>,
    pub term_weeks: Option<u32>,
}

impl LoanTerms {
    /// validated terms; at most one of the term fields is usually set
    pub fn new(
        principal: Money,
        disbursed_on: NaiveDate,
        agreed_due_on: Option<NaiveDate>,
        term_weeks: Option<u32>,
    ) -> Result<Self> {
        if principal.is_negative() {
            return Err(LedgerError::NegativePrincipal { principal });
        }
        if term_weeks == Some(0) {
            return Err(LedgerError::InvalidTerm {
                message: "term_weeks must be at least 1".to_string(),
            });
        }
        if let Some(weeks) = term_weeks {
            due_date_after(disbursed_on, weeks)?;
        }
        if let Some(due) = agreed_due_on {
            if due < disbursed_on {
                return Err(LedgerError::InvalidTerm {
                    message: format!("agreed due date {} is before disbursement on {}", due, disbursed_on),
                });
            }
        }

        Ok(Self {
            principal,
            disbursed_on,
            agreed_due_on,
            term_weeks,
        })
    }

    pub fn with_term_weeks(principal: Money, disbursed_on: NaiveDate, term_weeks: u32) -> Result<Self> {
        Self::new(principal, disbursed_on, None, Some(term_weeks))
    }

    pub fn with_due_date(principal: Money, disbursed_on: NaiveDate, agreed_due_on: NaiveDate) -> Result<Self> {
        Self::new(principal, disbursed_on, Some(agreed_due_on), None)
    }

    /// fill in whichever of term/due date is missing
    pub fn resolve(&self, default_term_weeks: u32) -> Result<ResolvedTerms> {
        let (term_weeks, agreed_due_on) = match (self.term_weeks, self.agreed_due_on) {
            (Some(weeks), Some(due)) => (weeks, due),
            (Some(weeks), None) => (weeks, due_date_after(self.disbursed_on, weeks)?),
            (None, Some(due)) => (started_weeks(self.disbursed_on, due).max(1), due),
            (None, None) => {
                let weeks = default_term_weeks.max(1);
                (weeks, due_date_after(self.disbursed_on, weeks)?)
            }
        };

        Ok(ResolvedTerms {
            principal: self.principal,
            disbursed_on: self.disbursed_on,
            agreed_due_on,
            term_weeks,
        })
    }
}

/// due date `term_weeks` after disbursement, rejected when it falls off the calendar
pub fn due_date_after(disbursed_on: NaiveDate, term_weeks: u32) -> Result<NaiveDate> {
    add_weeks(disbursed_on, term_weeks).ok_or_else(|| LedgerError::InvalidTerm {
        message: format!("a {}-week term from {} has no representable due date", term_weeks, disbursed_on),
    })
}

/// terms with both the week count and due date known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTerms {
    pub principal: Money,
    pub disbursed_on: NaiveDate,
    pub agreed_due_on: NaiveDate,
    pub term_weeks: u32,
}

impl ResolvedTerms {
    /// pre-due weeks started by `date`, capped by both term and due date
    pub fn pre_due_weeks_at(&self, date: NaiveDate) -> u32 {
        let horizon = date.min(self.agreed_due_on);
        started_weeks(self.disbursed_on, horizon).min(self.term_weeks)
    }

    /// overdue weeks started by `date`
    pub fn overdue_weeks_at(&self, date: NaiveDate) -> u32 {
        if date > self.agreed_due_on {
            started_weeks(self.agreed_due_on, date)
        } else {
            0
        }
    }
}
