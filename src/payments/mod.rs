pub mod waterfall;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

pub use waterfall::{OutstandingBalances, PaymentWaterfall};

/// a validated repayment as the engine consumes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Money,
    pub paid_on: NaiveDate,
}

impl Payment {
    pub fn new(amount: Money, paid_on: NaiveDate) -> Result<Self> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }
        Ok(Self { amount, paid_on })
    }
}

/// a payment as it arrives from storage or a form, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub amount: Option<String>,
    pub paid_on: Option<String>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<PaymentRecord> for Payment {
    type Error = LedgerError;

    fn try_from(record: PaymentRecord) -> Result<Self> {
        let raw_amount = record
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LedgerError::MissingField { field: "amount" })?;
        let raw_date = record
            .paid_on
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LedgerError::MissingField { field: "paid_on" })?;

        let amount = Money::from_str_exact(raw_amount).map_err(|e| LedgerError::InvalidAmount {
            message: format!("{}: {}", raw_amount, e),
        })?;
        let paid_on = parse_date(raw_date)?;

        Payment::new(amount, paid_on)
    }
}

/// parse an ISO date, accepting a trailing `T` or space separated time of day
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let invalid = |detail: String| LedgerError::InvalidDate {
        message: format!("{}: {}", raw, detail),
    };
    let (day, rest) = NaiveDate::parse_and_remainder(raw, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))?;

    match rest.strip_prefix(&['T', ' '][..]) {
        _ if rest.is_empty() => Ok(day),
        Some(time) if is_time_of_day(time) => Ok(day),
        _ => Err(invalid(format!("unexpected trailing text {:?}", rest))),
    }
}

fn is_time_of_day(raw: &str) -> bool {
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(raw, fmt).is_ok())
}

/// validate a batch of raw records, failing on the first malformed one
pub fn normalize_records<I>(records: I) -> Result<Vec<Payment>>
where
    I: IntoIterator<Item = PaymentRecord>,
{
    records.into_iter().map(Payment::try_from).collect()
}

/// payments on or before `as_of`, ordered by date then amount
pub fn effective_payments(payments: &[Payment], as_of: NaiveDate) -> Vec<Payment> {
    let mut effective: Vec<Payment> = payments
        .iter()
        .filter(|p| p.paid_on <= as_of)
        .copied()
        .collect();
    effective.sort_by(|a, b| a.paid_on.cmp(&b.paid_on).then(a.amount.cmp(&b.amount)));
    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(amount: Option<&str>, paid_on: Option<&str>) -> PaymentRecord {
        PaymentRecord {
            amount: amount.map(str::to_string),
            paid_on: paid_on.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_normalization() {
        let payment = Payment::try_from(record(Some(" 1500.50 "), Some("2024-01-08"))).unwrap();
        assert_eq!(payment.amount, Money::from_str_exact("1500.50").unwrap());
        assert_eq!(payment.paid_on, date(2024, 1, 8));

        let payment = Payment::try_from(record(Some("10"), Some("2024-01-08T09:30:00"))).unwrap();
        assert_eq!(payment.paid_on, date(2024, 1, 8));
        assert_eq!(parse_date("2024-01-08 09:30:00.123").unwrap(), date(2024, 1, 8));
        assert_eq!(parse_date("2024-01-08 09:30").unwrap(), date(2024, 1, 8));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        for raw in ["2024-01-08xyz", "2024-01-081", "2024-01-08T", "2024-01-08 noon", "2024-01-08T25:00:00"] {
            assert!(matches!(parse_date(raw), Err(LedgerError::InvalidDate { .. })), "{}", raw);
        }
    }

    #[test]
    fn test_missing_fields_fail_fast() {
        assert_eq!(
            Payment::try_from(record(None, Some("2024-01-08"))),
            Err(LedgerError::MissingField { field: "amount" })
        );
        assert_eq!(
            Payment::try_from(record(Some("10"), Some("  "))),
            Err(LedgerError::MissingField { field: "paid_on" })
        );
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(matches!(
            Payment::try_from(record(Some("ten"), Some("2024-01-08"))),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            Payment::try_from(record(Some("10"), Some("08/01/2024"))),
            Err(LedgerError::InvalidDate { .. })
        ));
        assert!(matches!(
            Payment::try_from(record(Some("0"), Some("2024-01-08"))),
            Err(LedgerError::InvalidPaymentAmount { .. })
        ));
        assert!(matches!(
            Payment::try_from(record(Some("-5"), Some("2024-01-08"))),
            Err(LedgerError::InvalidPaymentAmount { .. })
        ));
    }

    #[test]
    fn test_batch_normalization_stops_on_error() {
        let records = vec![
            record(Some("10"), Some("2024-01-08")),
            record(None, Some("2024-01-09")),
        ];
        assert!(normalize_records(records).is_err());

        let json = r#"[{"amount": "250", "paid_on": "2024-01-03", "method": "mpesa"}]"#;
        let records: Vec<PaymentRecord> = serde_json::from_str(json).unwrap();
        let payments = normalize_records(records).unwrap();
        assert_eq!(payments, vec![Payment::new(Money::from_major(250), date(2024, 1, 3)).unwrap()]);
    }

    #[test]
    fn test_effective_payments_filter_and_order() {
        let payments = vec![
            Payment::new(Money::from_major(300), date(2024, 1, 10)).unwrap(),
            Payment::new(Money::from_major(500), date(2024, 1, 5)).unwrap(),
            Payment::new(Money::from_major(100), date(2024, 1, 5)).unwrap(),
            Payment::new(Money::from_major(900), date(2024, 2, 1)).unwrap(),
        ];

        let effective = effective_payments(&payments, date(2024, 1, 10));
        let amounts: Vec<Money> = effective.iter().map(|p| p.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_major(100), Money::from_major(500), Money::from_major(300)]
        );
    }
}
