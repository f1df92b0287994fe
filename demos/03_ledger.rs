/// ledger - record loans and payments, then render a loan view
use lending_ledger_rs::chrono::NaiveDate;
use lending_ledger_rs::payments::normalize_records;
use lending_ledger_rs::{
    scheduled_due_on_date, AccrualEngine, Loan, LoanView, MemoryLedger, Money, PaymentRecord,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = AccrualEngine::standard();
    let disbursed = NaiveDate::from_ymd_opt(2024, 3, 4).ok_or("bad date")?;

    // what the form would show before the loan is saved
    let preview = scheduled_due_on_date(Money::from_major(30_000), disbursed, 2, engine.config().weekly_interest_rate)?;
    println!("preview: {} due on {}", preview.amount, preview.due_on);

    let mut ledger = MemoryLedger::new();
    let loan = Loan::new("Wanjiru", "Kamau", Money::from_major(30_000), disbursed, 2)?
        .with_tx_charge(Money::from_major(105))
        .with_notes("stock for kiosk");
    let id = ledger.insert_loan(loan);

    let raw = r#"[
        {"amount": "6000", "paid_on": "2024-03-11", "method": "mpesa"},
        {"amount": "12000", "paid_on": "2024-03-18", "method": "cash"}
    ]"#;
    let records: Vec<PaymentRecord> = serde_json::from_str(raw)?;
    for payment in normalize_records(records)? {
        ledger.insert_payment(id, payment, "import", None)?;
    }

    let as_of = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?;
    let view = LoanView::build(&ledger, id, as_of, &engine)?;
    println!("{}", view.to_json_pretty()?);

    Ok(())
}
