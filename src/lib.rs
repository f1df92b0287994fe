pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod ledger;
pub mod payments;
pub mod state;
pub mod terms;
pub mod types;
pub mod views;

// re-export key types
pub use calendar::{aging_bucket, overdue_weeks, started_weeks};
pub use config::AccrualConfig;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use interest::{
    compounding_amount_due, compute, scheduled_due_on_date, AccrualEngine, AccrualResult,
    CompoundingPreview, DuePreview, FlatPreview, LatePenaltySchedule, PreviewCalculator,
    ScheduledDue,
};
pub use ledger::{LedgerSource, Loan, MemoryLedger, PaymentEntry};
pub use payments::{Payment, PaymentRecord, PaymentWaterfall};
pub use state::AccrualState;
pub use terms::{LoanTerms, ResolvedTerms};
pub use types::{AgingBucket, LoanId, PaymentApplication, PaymentId, RepaymentBadge};
pub use views::LoanView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
