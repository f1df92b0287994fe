use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid amount: {message}")]
    InvalidAmount {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("principal must not be negative: {principal}")]
    NegativePrincipal {
        principal: Money,
    },

    #[error("invalid loan term: {message}")]
    InvalidTerm {
        message: String,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("evaluation date {as_of} is before disbursement on {disbursed_on}")]
    EvaluationBeforeDisbursement {
        as_of: NaiveDate,
        disbursed_on: NaiveDate,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: Uuid,
    },

    #[error("payment not found: {id}")]
    PaymentNotFound {
        id: Uuid,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid write-off: {message}")]
    InvalidWriteOff {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
