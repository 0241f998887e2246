use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::amortization::{derive_loan_parameters, generate_annuity_schedule, generate_differentiated_schedule};
use crate::calendar::PeriodCursor;
use crate::config::LoanInput;
use crate::errors::{MortgageError, Result};
use crate::schedule::{calculate_summary, MortgageSummary, ScheduleEntry};
use crate::types::{InterestMethod, PaymentType};

/// base schedule together with its summary and the input that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub summary: MortgageSummary,
    pub schedule: Vec<ScheduleEntry>,
    pub input: LoanInput,
}

impl MortgageResult {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// first period label, falling back to the provider's current date for missing parts
pub fn resolve_start(
    start_year: Option<i32>,
    start_month: Option<u32>,
    time: &SafeTimeProvider,
) -> Result<PeriodCursor> {
    let today = PeriodCursor::from_date(time.now());
    PeriodCursor::new(
        start_year.unwrap_or(today.year),
        start_month.unwrap_or(today.month),
    )
}

/// build the payment schedule for `input`
pub fn generate_schedule(
    input: &LoanInput,
    start_year: Option<i32>,
    start_month: Option<u32>,
    time: &SafeTimeProvider,
) -> Result<Vec<ScheduleEntry>> {
    let start = resolve_start(start_year, start_month, time)?;
    Ok(schedule_from(input, start))
}

pub(crate) fn schedule_from(input: &LoanInput, start: PeriodCursor) -> Vec<ScheduleEntry> {
    let params = derive_loan_parameters(input);
    debug!(
        payment_type = ?input.payment_type,
        interest_method = ?input.interest_method,
        principal = %params.principal,
        periods = params.total_payments,
        "dispatching schedule engine"
    );

    let days = input.first_period_days;
    match (input.payment_type, input.interest_method) {
        (PaymentType::Annuity, InterestMethod::Monthly) => {
            generate_annuity_schedule(&params, InterestMethod::Monthly, start, days)
        }
        (PaymentType::Annuity, InterestMethod::Daily) => {
            generate_annuity_schedule(&params, InterestMethod::Daily, start, days)
        }
        (PaymentType::Differentiated, InterestMethod::Monthly) => {
            generate_differentiated_schedule(&params, InterestMethod::Monthly, start, days)
        }
        (PaymentType::Differentiated, InterestMethod::Daily) => {
            generate_differentiated_schedule(&params, InterestMethod::Daily, start, days)
        }
    }
}

/// reject inputs the engine cannot amortize
pub fn check_preconditions(input: &LoanInput) -> Result<()> {
    let principal = input.loan_amount();
    if !principal.is_positive() {
        return Err(MortgageError::InvalidPrincipal { principal });
    }

    if input.annual_interest_rate.is_negative() {
        return Err(MortgageError::NegativeInterestRate {
            rate: input.annual_interest_rate,
        });
    }

    if input.loan_term_years == 0 {
        return Err(MortgageError::InvalidLoanTerm {
            years: input.loan_term_years,
        });
    }

    Ok(())
}

/// schedule and summary for a loan
#[instrument(skip(input, time), fields(principal = %input.loan_amount(), years = input.loan_term_years))]
pub fn calculate_mortgage(
    input: &LoanInput,
    start_year: Option<i32>,
    start_month: Option<u32>,
    time: &SafeTimeProvider,
) -> Result<MortgageResult> {
    check_preconditions(input)?;
    let start = resolve_start(start_year, start_month, time)?;
    Ok(mortgage_from(input, start))
}

pub(crate) fn mortgage_from(input: &LoanInput, start: PeriodCursor) -> MortgageResult {
    let schedule = schedule_from(input, start);
    let summary = calculate_summary(&schedule, input.loan_amount());

    MortgageResult {
        summary,
        schedule,
        input: input.clone(),
    }
}
