use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::interest::{AccrualEngine, AccrualResult};
use crate::payments::Payment;
use crate::terms::{due_date_after, LoanTerms};
use crate::types::{LoanId, PaymentId};

/// a loan as recorded by the lending desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub first_name: String,
    pub last_name: String,
    pub principal: Money,
    pub disbursed_on: NaiveDate,
    /// transfer charge paid out at origination
    pub tx_charge: Money,
    pub notes: Option<String>,
    pub term_weeks: u32,
    pub agreed_due_on: NaiveDate,
    pub written_off_on: Option<NaiveDate>,
    pub write_off_amount: Money,
}

impl Loan {
    /// new loan; the due date is `term_weeks` whole weeks after disbursement
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        principal: Money,
        disbursed_on: NaiveDate,
        term_weeks: u32,
    ) -> Result<Self> {
        let terms = LoanTerms::with_term_weeks(principal, disbursed_on, term_weeks)?;

        Ok(Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            principal: terms.principal,
            disbursed_on,
            tx_charge: Money::ZERO,
            notes: None,
            term_weeks,
            agreed_due_on: due_date_after(disbursed_on, term_weeks)?,
            written_off_on: None,
            write_off_amount: Money::ZERO,
        })
    }

    /// re-check an edited record and re-derive its due date from the term
    fn revalidated(mut self) -> Result<Self> {
        LoanTerms::with_term_weeks(self.principal, self.disbursed_on, self.term_weeks)?;
        self.agreed_due_on = due_date_after(self.disbursed_on, self.term_weeks)?;
        if let Some(on) = self.written_off_on {
            let amount = self.write_off_amount;
            self.write_off(on, amount)?;
        }
        Ok(self)
    }

    pub fn with_tx_charge(mut self, tx_charge: Money) -> Self {
        self.tx_charge = tx_charge;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// display name, trimmed when either part is empty
    pub fn borrower(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            disbursed_on: self.disbursed_on,
            agreed_due_on: Some(self.agreed_due_on),
            term_weeks: Some(self.term_weeks),
        }
    }

    pub fn is_written_off(&self) -> bool {
        self.written_off_on.is_some()
    }

    pub fn write_off(&mut self, on: NaiveDate, amount: Money) -> Result<()> {
        if on < self.disbursed_on {
            return Err(LedgerError::InvalidWriteOff {
                message: format!("write-off on {} precedes disbursement on {}", on, self.disbursed_on),
            });
        }
        if amount.is_negative() {
            return Err(LedgerError::InvalidWriteOff {
                message: format!("write-off amount must not be negative: {}", amount),
            });
        }
        self.written_off_on = Some(on);
        self.write_off_amount = amount;
        Ok(())
    }

    pub fn clear_write_off(&mut self) {
        self.written_off_on = None;
        self.write_off_amount = Money::ZERO;
    }

    pub fn accrual(&self, engine: &AccrualEngine, as_of: NaiveDate, payments: &[Payment]) -> Result<AccrualResult> {
        engine.compute(&self.terms(), as_of, payments)
    }
}

/// the two reads the accrual core needs from storage
pub trait LedgerSource {
    fn loan_terms(&self, id: LoanId) -> Result<LoanTerms>;

    fn payments_for(&self, id: LoanId) -> Result<Vec<Payment>>;

    fn accrual_for(&self, id: LoanId, as_of: NaiveDate, engine: &AccrualEngine) -> Result<AccrualResult> {
        let terms = self.loan_terms(id)?;
        let payments = self.payments_for(id)?;
        engine.compute(&terms, as_of, &payments)
    }
}

/// a payment stored against a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub id: PaymentId,
    pub loan_id: LoanId,
    pub payment: Payment,
    pub method: String,
    pub notes: Option<String>,
}

/// in-memory ledger; stands in for the database in tests and demos
#[derive(Debug, Default)]
pub struct MemoryLedger {
    loans: HashMap<LoanId, Loan>,
    payments: Vec<PaymentEntry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_loan(&mut self, loan: Loan) -> LoanId {
        let id = loan.id;
        info!(loan_id = %id, borrower = %loan.borrower(), principal = %loan.principal, "loan recorded");
        self.loans.insert(id, loan);
        id
    }

    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans.get(&id).ok_or(LedgerError::LoanNotFound { id })
    }

    /// replace a loan's record; the id must already exist
    pub fn update_loan(&mut self, loan: Loan) -> Result<()> {
        let loan = loan.revalidated()?;
        let slot = self.loans.get_mut(&loan.id).ok_or(LedgerError::LoanNotFound { id: loan.id })?;
        debug!(loan_id = %loan.id, term_weeks = loan.term_weeks, agreed_due_on = %loan.agreed_due_on, "loan updated");
        *slot = loan;
        Ok(())
    }

    pub fn write_off_loan(&mut self, id: LoanId, on: NaiveDate, amount: Money) -> Result<()> {
        let loan = self.loans.get_mut(&id).ok_or(LedgerError::LoanNotFound { id })?;
        loan.write_off(on, amount)?;
        info!(loan_id = %id, written_off_on = %on, %amount, "loan written off");
        Ok(())
    }

    /// loans ordered newest disbursement first
    pub fn loans(&self) -> Vec<&Loan> {
        let mut loans: Vec<&Loan> = self.loans.values().collect();
        loans.sort_by(|a, b| b.disbursed_on.cmp(&a.disbursed_on).then(a.id.cmp(&b.id)));
        loans
    }

    /// removes the loan and every payment recorded against it
    pub fn delete_loan(&mut self, id: LoanId) -> Result<Loan> {
        let loan = self.loans.remove(&id).ok_or(LedgerError::LoanNotFound { id })?;
        let before = self.payments.len();
        self.payments.retain(|p| p.loan_id != id);
        debug!(loan_id = %id, payments_removed = before - self.payments.len(), "loan deleted");
        Ok(loan)
    }

    pub fn insert_payment(
        &mut self,
        loan_id: LoanId,
        payment: Payment,
        method: impl Into<String>,
        notes: Option<String>,
    ) -> Result<PaymentId> {
        self.loan(loan_id)?;
        let id = Uuid::new_v4();
        debug!(%loan_id, payment_id = %id, amount = %payment.amount, paid_on = %payment.paid_on, "payment recorded");
        self.payments.push(PaymentEntry {
            id,
            loan_id,
            payment,
            method: method.into(),
            notes,
        });
        Ok(id)
    }

    pub fn update_payment(&mut self, id: PaymentId, payment: Payment) -> Result<()> {
        let entry = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LedgerError::PaymentNotFound { id })?;
        entry.payment = payment;
        Ok(())
    }

    pub fn delete_payment(&mut self, id: PaymentId) -> Result<PaymentEntry> {
        let index = self
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or(LedgerError::PaymentNotFound { id })?;
        Ok(self.payments.remove(index))
    }

    /// entries for one loan in date order
    pub fn payment_entries(&self, loan_id: LoanId) -> Vec<&PaymentEntry> {
        let mut entries: Vec<&PaymentEntry> = self.payments.iter().filter(|p| p.loan_id == loan_id).collect();
        entries.sort_by_key(|p| p.payment.paid_on);
        entries
    }
}

impl LedgerSource for MemoryLedger {
    fn loan_terms(&self, id: LoanId) -> Result<LoanTerms> {
        Ok(self.loan(id)?.terms())
    }

    fn payments_for(&self, id: LoanId) -> Result<Vec<Payment>> {
        self.loan(id)?;
        Ok(self.payment_entries(id).into_iter().map(|e| e.payment).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan() -> Loan {
        Loan::new("Amina", "Otieno", Money::from_major(200_000), date(2024, 1, 1), 1).unwrap()
    }

    #[test]
    fn test_new_loan_derives_due_date() {
        let loan = Loan::new("Amina", "", Money::from_major(5_000), date(2024, 1, 1), 2).unwrap();
        assert_eq!(loan.agreed_due_on, date(2024, 1, 15));
        assert_eq!(loan.borrower(), "Amina");
        assert!(Loan::new("A", "B", Money::from_major(5_000), date(2024, 1, 1), 0).is_err());
        assert!(Loan::new("A", "B", Money::from_major(-5), date(2024, 1, 1), 1).is_err());
    }

    #[test]
    fn test_write_off_round_trip() {
        let mut loan = loan().with_tx_charge(Money::from_major(150)).with_notes("market stall");
        assert!(loan.write_off(date(2023, 12, 1), Money::from_major(10)).is_err());
        assert!(loan.write_off(date(2024, 3, 1), Money::from_major(-10)).is_err());

        loan.write_off(date(2024, 3, 1), Money::from_major(200_000)).unwrap();
        assert!(loan.is_written_off());
        assert_eq!(loan.write_off_amount, Money::from_major(200_000));

        loan.clear_write_off();
        assert!(!loan.is_written_off());
        assert_eq!(loan.write_off_amount, Money::ZERO);
    }

    #[test]
    fn test_ledger_feeds_engine() {
        let mut ledger = MemoryLedger::new();
        let id = ledger.insert_loan(loan());
        ledger
            .insert_payment(id, Payment::new(Money::from_major(145_000), date(2024, 1, 15)).unwrap(), "cash", None)
            .unwrap();

        let engine = AccrualEngine::standard();
        let result = ledger.accrual_for(id, date(2024, 1, 22), &engine).unwrap();
        assert_eq!(result.outstanding, Money::from_major(115_000));

        let direct = ledger.loan(id).unwrap()
            .accrual(&engine, date(2024, 1, 22), &ledger.payments_for(id).unwrap())
            .unwrap();
        assert_eq!(direct, result);
    }

    #[test]
    fn test_payment_crud() {
        let mut ledger = MemoryLedger::new();
        let id = ledger.insert_loan(loan());
        let first = ledger
            .insert_payment(id, Payment::new(Money::from_major(100), date(2024, 1, 9)).unwrap(), "mpesa", None)
            .unwrap();
        ledger
            .insert_payment(id, Payment::new(Money::from_major(50), date(2024, 1, 3)).unwrap(), "cash", Some("partial".into()))
            .unwrap();

        let dates: Vec<NaiveDate> = ledger.payments_for(id).unwrap().iter().map(|p| p.paid_on).collect();
        assert_eq!(dates, vec![date(2024, 1, 3), date(2024, 1, 9)]);

        ledger.update_payment(first, Payment::new(Money::from_major(120), date(2024, 1, 9)).unwrap()).unwrap();
        assert_eq!(ledger.payments_for(id).unwrap()[1].amount, Money::from_major(120));

        let removed = ledger.delete_payment(first).unwrap();
        assert_eq!(removed.method, "mpesa");
        assert_eq!(ledger.payments_for(id).unwrap().len(), 1);
        assert!(matches!(ledger.delete_payment(first), Err(LedgerError::PaymentNotFound { .. })));
    }

    #[test]
    fn test_unknown_loan_rejected() {
        let mut ledger = MemoryLedger::new();
        let missing = Uuid::new_v4();
        let payment = Payment::new(Money::from_major(1), date(2024, 1, 1)).unwrap();

        assert!(matches!(ledger.insert_payment(missing, payment, "", None), Err(LedgerError::LoanNotFound { .. })));
        assert!(matches!(ledger.loan_terms(missing), Err(LedgerError::LoanNotFound { .. })));
        assert!(matches!(ledger.payments_for(missing), Err(LedgerError::LoanNotFound { .. })));
    }

    #[test]
    fn test_delete_loan_cascades_and_update() {
        let mut ledger = MemoryLedger::new();
        let id = ledger.insert_loan(loan());
        let other = ledger.insert_loan(Loan::new("Juma", "K", Money::from_major(1_000), date(2024, 2, 1), 1).unwrap());
        ledger
            .insert_payment(id, Payment::new(Money::from_major(10), date(2024, 1, 2)).unwrap(), "", None)
            .unwrap();
        ledger
            .insert_payment(other, Payment::new(Money::from_major(10), date(2024, 2, 2)).unwrap(), "", None)
            .unwrap();

        assert_eq!(ledger.loans()[0].id, other);

        let mut edited = ledger.loan(other).unwrap().clone();
        edited.notes = Some("rescheduled".to_string());
        ledger.update_loan(edited).unwrap();
        assert_eq!(ledger.loan(other).unwrap().notes.as_deref(), Some("rescheduled"));

        ledger.delete_loan(id).unwrap();
        assert!(ledger.loan(id).is_err());
        assert!(matches!(ledger.update_loan(loan()), Err(LedgerError::LoanNotFound { .. })));
        assert_eq!(ledger.payment_entries(other).len(), 1);
        assert_eq!(ledger.loans().len(), 1);
    }

    #[test]
    fn test_update_loan_revalidates_terms() {
        let mut ledger = MemoryLedger::new();
        let id = ledger.insert_loan(loan());

        let mut zero_term = ledger.loan(id).unwrap().clone();
        zero_term.term_weeks = 0;
        assert!(matches!(ledger.update_loan(zero_term), Err(LedgerError::InvalidTerm { .. })));

        let mut huge_term = ledger.loan(id).unwrap().clone();
        huge_term.term_weeks = u32::MAX;
        assert!(matches!(ledger.update_loan(huge_term), Err(LedgerError::InvalidTerm { .. })));
        assert_eq!(ledger.loan(id).unwrap().term_weeks, 1);

        // a stale due date is replaced by one derived from the new term
        let mut longer = ledger.loan(id).unwrap().clone();
        longer.term_weeks = 3;
        longer.agreed_due_on = date(2024, 1, 2);
        ledger.update_loan(longer).unwrap();
        assert_eq!(ledger.loan(id).unwrap().agreed_due_on, date(2024, 1, 22));

        let result = ledger.accrual_for(id, date(2024, 1, 22), &AccrualEngine::standard()).unwrap();
        assert_eq!(result.overdue_weeks, 0);
        assert_eq!(result.outstanding, Money::from_major(260_000));
    }

    #[test]
    fn test_extreme_terms_rejected_at_creation() {
        assert!(matches!(
            Loan::new("A", "B", Money::from_major(1_000), date(2024, 1, 1), 20_000_000),
            Err(LedgerError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_write_off_through_ledger() {
        let mut ledger = MemoryLedger::new();
        let id = ledger.insert_loan(loan());
        assert!(ledger.write_off_loan(id, date(2023, 1, 1), Money::from_major(1)).is_err());
        ledger.write_off_loan(id, date(2024, 3, 1), Money::from_major(200_000)).unwrap();
        assert!(ledger.loan(id).unwrap().is_written_off());
        assert!(matches!(
            ledger.write_off_loan(Uuid::new_v4(), date(2024, 3, 1), Money::ZERO),
            Err(LedgerError::LoanNotFound { .. })
        ));
    }
}
