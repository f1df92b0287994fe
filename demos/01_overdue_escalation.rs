/// overdue escalation - watch the late penalty step up week by week
use lending_ledger_rs::chrono::{Duration, NaiveDate};
use lending_ledger_rs::{aging_bucket, AccrualEngine, LoanTerms, Money, Payment};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== overdue escalation ===\n");

    let disbursed = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let terms = LoanTerms::with_term_weeks(Money::from_major(200_000), disbursed, 1)?;
    let engine = AccrualEngine::standard();

    println!("{:<12} {:>8} {:>14} {:>14} {:>14}  aging", "as of", "overdue", "interest", "late", "outstanding");
    for week in 0..=6 {
        let as_of = disbursed + Duration::days(7 * week);
        let result = engine.compute(&terms, as_of, &[])?;
        println!(
            "{:<12} {:>8} {:>14} {:>14} {:>14}  {}",
            as_of,
            result.overdue_weeks,
            result.interest,
            result.late_incremental,
            result.outstanding,
            aging_bucket(result.overdue_weeks),
        );
    }

    // a part payment in overdue week 1 halves the base for later penalties
    let payments = vec![Payment::new(Money::from_major(145_000), disbursed + Duration::days(14))?];
    let result = engine.compute(&terms, disbursed + Duration::days(21), &payments)?;
    println!("\nwith 145,000 paid on {}:", disbursed + Duration::days(14));
    println!("  principal receivable: {}", result.principal_receivable);
    println!("  interest + late:      {}", result.accrued_interest_fees);
    println!("  outstanding:          {}", result.outstanding);

    Ok(())
}
