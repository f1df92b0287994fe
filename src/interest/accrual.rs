use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::AccrualConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::interest::LatePenaltySchedule;
use crate::payments::{effective_payments, Payment, PaymentWaterfall};
use crate::state::AccrualState;
use crate::terms::{LoanTerms, ResolvedTerms};

/// what a loan owes as of one evaluation date, in cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualResult {
    pub as_of: NaiveDate,
    /// capital still owed
    pub principal_receivable: Money,
    /// unpaid interest plus unpaid late penalty
    pub accrued_interest_fees: Money,
    /// principal_receivable + accrued_interest_fees
    pub outstanding: Money,
    /// gross interest charged over the life of the loan
    pub interest: Money,
    /// gross late penalty charged over the life of the loan
    pub late_incremental: Money,
    pub unpaid_interest: Money,
    /// the rest of accrued_interest_fees, so the two unpaid parts always sum to it
    pub unpaid_late: Money,
    pub total_applied: Money,
    pub excess_discarded: Money,
    pub pre_due_weeks: u32,
    pub overdue_weeks: u32,
    pub settled_on: Option<NaiveDate>,
}

impl AccrualResult {
    fn from_state(state: &AccrualState, as_of: NaiveDate) -> Self {
        let principal_receivable = state.principal_remaining.non_negative().to_cents();
        let accrued_interest_fees = state.fees_outstanding().non_negative().to_cents();
        let unpaid_interest = state.accrued_interest.non_negative().to_cents();

        Self {
            as_of,
            principal_receivable,
            accrued_interest_fees,
            outstanding: principal_receivable + accrued_interest_fees,
            interest: state.interest_charged.non_negative().to_cents(),
            late_incremental: state.late_charged.non_negative().to_cents(),
            unpaid_interest,
            unpaid_late: accrued_interest_fees - unpaid_interest,
            total_applied: state.total_applied.to_cents(),
            excess_discarded: state.excess_discarded.to_cents(),
            pre_due_weeks: state.pre_due_weeks_charged,
            overdue_weeks: state.overdue_weeks_charged,
            settled_on: state.settled_on,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled_on.is_some() || self.outstanding.is_zero()
    }
}

/// payment-aware weekly accrual engine
///
/// Each call replays the full payment history from disbursement. Weeks are
/// charged as they start; payments dated the same day are applied one by one
/// through the interest, late, principal waterfall after that day's weeks are
/// charged. Once everything is repaid the loan stops accruing for good.
#[derive(Debug, Clone)]
pub struct AccrualEngine {
    config: AccrualConfig,
    penalty: LatePenaltySchedule,
    waterfall: PaymentWaterfall,
}

impl AccrualEngine {
    pub fn new(config: AccrualConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            penalty: LatePenaltySchedule::new(config.late_step_rate),
            config,
            waterfall: PaymentWaterfall::new(),
        })
    }

    /// 10% weekly interest, 2.5% late step
    pub fn standard() -> Self {
        let config = AccrualConfig::standard();
        Self {
            penalty: LatePenaltySchedule::new(config.late_step_rate),
            config,
            waterfall: PaymentWaterfall::new(),
        }
    }

    pub fn config(&self) -> &AccrualConfig {
        &self.config
    }

    /// compute balances owed as of `as_of`; payments may be in any order
    pub fn compute(&self, terms: &LoanTerms, as_of: NaiveDate, payments: &[Payment]) -> Result<AccrualResult> {
        if as_of < terms.disbursed_on {
            return Err(LedgerError::EvaluationBeforeDisbursement {
                as_of,
                disbursed_on: terms.disbursed_on,
            });
        }

        let resolved = terms.resolve(self.config.default_term_weeks)?;
        let effective = effective_payments(payments, as_of);
        let epsilon = self.config.settlement_epsilon;

        debug!(
            principal = %terms.principal,
            disbursed_on = %terms.disbursed_on,
            agreed_due_on = %resolved.agreed_due_on,
            term_weeks = resolved.term_weeks,
            %as_of,
            payments = effective.len(),
            "computing accrual"
        );

        let mut state = AccrualState::new(terms.principal);

        for day in effective.chunk_by(|a, b| a.paid_on == b.paid_on) {
            let paid_on = day[0].paid_on;
            if !state.is_settled() {
                self.accrue_to(&mut state, &resolved, paid_on);
            }

            for payment in day {
                let application = state.apply_payment(payment, &self.waterfall);
                if application.excess.is_positive() {
                    warn!(
                        %paid_on,
                        amount = %payment.amount,
                        excess = %application.excess,
                        "payment exceeds balance owed; excess discarded"
                    );
                }
            }

            if !state.is_settled() && state.settle_if_paid(paid_on, epsilon) {
                debug!(settled_on = %paid_on, "loan settled; accrual stopped");
            }
        }

        if !state.is_settled() {
            self.accrue_to(&mut state, &resolved, as_of);
        }

        let result = AccrualResult::from_state(&state, as_of);
        debug!(
            principal_receivable = %result.principal_receivable,
            accrued_interest_fees = %result.accrued_interest_fees,
            outstanding = %result.outstanding,
            "accrual computed"
        );
        Ok(result)
    }

    /// compute as of the provider's current date
    pub fn compute_today(
        &self,
        terms: &LoanTerms,
        payments: &[Payment],
        time_provider: &SafeTimeProvider,
    ) -> Result<AccrualResult> {
        self.compute(terms, time_provider.now().date_naive(), payments)
    }

    /// charge every week that has started by `date` and not been charged yet
    fn accrue_to(&self, state: &mut AccrualState, terms: &ResolvedTerms, date: NaiveDate) {
        let rate = self.config.weekly_interest_rate;
        let epsilon = self.config.settlement_epsilon;

        let pre_due_target = terms.pre_due_weeks_at(date);
        while state.pre_due_weeks_charged < pre_due_target {
            state.pre_due_weeks_charged += 1;
            if state.has_principal(epsilon) {
                let interest = state.principal_remaining * rate;
                state.charge_interest(interest);
                trace!(week = state.pre_due_weeks_charged, %interest, "pre-due week charged");
            }
        }

        let overdue_target = terms.overdue_weeks_at(date);
        while state.overdue_weeks_charged < overdue_target {
            state.overdue_weeks_charged += 1;
            let k = state.overdue_weeks_charged;
            if state.has_principal(epsilon) {
                let interest = state.principal_remaining * rate;
                let late = self.penalty.charge_for_week(state.principal_remaining, k);
                state.charge_interest(interest);
                state.charge_late(late);
                trace!(overdue_week = k, %interest, %late, "overdue week charged");
            }
        }
    }
}

impl Default for AccrualEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// compute with the standard 10% / 2.5% rates
pub fn compute(terms: &LoanTerms, as_of: NaiveDate, payments: &[Payment]) -> Result<AccrualResult> {
    AccrualEngine::standard().compute(terms, as_of, payments)
}
