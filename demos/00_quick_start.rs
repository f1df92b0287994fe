/// quick start - minimal example to get started
use lending_ledger_rs::chrono::NaiveDate;
use lending_ledger_rs::{AccrualEngine, LoanTerms, Money, Payment};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let disbursed = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let due = NaiveDate::from_ymd_opt(2024, 1, 8).ok_or("bad date")?;

    // a one-week 100,000 loan
    let terms = LoanTerms::with_due_date(Money::from_major(100_000), disbursed, due)?;

    // repaid in full on the due date
    let payments = vec![Payment::new(Money::from_major(110_000), due)?];

    let engine = AccrualEngine::standard();
    let result = engine.compute(&terms, due, &payments)?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
