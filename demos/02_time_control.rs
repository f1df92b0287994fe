/// time control - evaluate "today" against a controlled clock
use lending_ledger_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use lending_ledger_rs::{AccrualEngine, LoanTerms, Money, Payment, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let disbursed = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let terms = LoanTerms::with_term_weeks(Money::from_major(50_000), disbursed, 2)?;
    let payments = vec![Payment::new(Money::from_major(5_000), disbursed + Duration::days(5))?];
    let engine = AccrualEngine::standard();

    for _ in 0..6 {
        let result = engine.compute_today(&terms, &payments, &time)?;
        println!(
            "{}  principal {:>10}  fees {:>10}  outstanding {:>10}",
            time.now().format("%Y-%m-%d"),
            result.principal_receivable,
            result.accrued_interest_fees,
            result.outstanding,
        );
        controller.advance(Duration::days(7));
    }

    Ok(())
}
