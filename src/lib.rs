pub mod amortization;
pub mod calculator;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod scenario;
pub mod schedule;
pub mod types;
pub mod validation;

// re-export key types
pub use amortization::{derive_loan_parameters, calculate_annuity_payment, LoanParameters};
pub use calculator::{calculate_mortgage, generate_schedule, MortgageResult};
pub use calendar::PeriodCursor;
pub use config::{DownPayment, LoanInput, MortgageFormState};
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use events::{ExtraPaymentEvent, RateChangeEvent, RateTimeline};
pub use scenario::{calculate_scenario, ScenarioInput, ScenarioResult, ScenarioSummary};
pub use schedule::{calculate_summary, MortgageSummary, ScheduleEntry};
pub use types::{
    DayCountConvention, EventId, ExtraPaymentEffect, ExtraPaymentFrequency, InterestMethod,
    PaymentType,
};
pub use validation::{validate_loan_input, validate_scenario_events};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
