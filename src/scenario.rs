use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::amortization::{calculate_annuity_payment, InterestAccrual};
use crate::calculator::{check_preconditions, mortgage_from};
use crate::calendar::PeriodCursor;
use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::events::{extra_payment_due, ExtraPaymentEvent, RateChangeEvent, RateTimeline};
use crate::schedule::ScheduleEntry;
use crate::types::PaymentType;
use crate::validation::{validate_loan_input, validate_scenario_events};

/// rates closer than this are treated as unchanged
const RATE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 10);

/// the loop never runs past this multiple of the contractual term
const SAFETY_CAP_MULTIPLIER: u32 = 2;

/// what-if request: a base loan plus time-indexed events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub base_input: LoanInput,
    pub start_year: i32,
    pub start_month: u32,
    #[serde(default)]
    pub extra_payments: Vec<ExtraPaymentEvent>,
    #[serde(default)]
    pub rate_changes: Vec<RateChangeEvent>,
}

impl ScenarioInput {
    pub fn new(base_input: LoanInput, start_year: i32, start_month: u32) -> Self {
        Self {
            base_input,
            start_year,
            start_month,
            extra_payments: Vec::new(),
            rate_changes: Vec::new(),
        }
    }

    pub fn with_extra_payment(mut self, event: ExtraPaymentEvent) -> Self {
        self.extra_payments.push(event);
        self
    }

    pub fn with_rate_change(mut self, event: RateChangeEvent) -> Self {
        self.rate_changes.push(event);
        self
    }

    /// loan and event rules together
    pub fn validate(&self) -> Result<()> {
        let mut messages = validate_loan_input(&self.base_input);
        messages.extend(validate_scenario_events(&self.extra_payments, &self.rate_changes));

        if messages.is_empty() {
            Ok(())
        } else {
            Err(MortgageError::Validation { messages })
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// baseline against scenario comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub original_total_interest: Money,
    pub original_total_payments: u32,
    pub original_monthly_payment: Money,
    pub new_total_interest: Money,
    pub new_total_payments: u32,
    pub new_monthly_payment: Money,
    pub interest_saved: Money,
    /// negative when the scenario runs longer than the baseline
    pub payments_saved: i64,
    pub total_extra_payments: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub summary: ScenarioSummary,
    pub schedule: Vec<ScheduleEntry>,
    pub original_schedule: Vec<ScheduleEntry>,
}

impl ScenarioResult {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// running loan state, scoped to one scenario run
struct ScenarioState {
    balance: Money,
    remaining_payments: u32,
    annual_rate: Rate,
    monthly_rate: Rate,
    monthly_payment: Money,
    accrual: InterestAccrual,
}

impl ScenarioState {
    fn new(input: &LoanInput) -> Self {
        let balance = input.loan_amount();
        let remaining_payments = input.loan_term_years * 12;
        let annual_rate = input.annual_interest_rate;
        let monthly_rate = annual_rate.monthly_rate();

        Self {
            balance,
            remaining_payments,
            annual_rate,
            monthly_rate,
            monthly_payment: calculate_annuity_payment(balance, monthly_rate, remaining_payments),
            accrual: accrual_for(input, annual_rate),
        }
    }

    /// switch to `rate`, re-amortizing annuity loans over what is left
    fn apply_rate(&mut self, input: &LoanInput, rate: Rate) {
        self.annual_rate = rate;
        self.monthly_rate = rate.monthly_rate();
        self.accrual = accrual_for(input, rate);

        if input.payment_type == PaymentType::Annuity {
            self.reamortize();
        }
    }

    fn reamortize(&mut self) {
        self.monthly_payment = calculate_annuity_payment(self.balance, self.monthly_rate, self.remaining_payments);
        debug!(
            balance = %self.balance,
            remaining = self.remaining_payments,
            payment = %self.monthly_payment,
            "payment re-amortized"
        );
    }

    fn principal_portion(&self, payment_type: PaymentType, interest: Money) -> Money {
        let portion = match payment_type {
            PaymentType::Annuity => self.monthly_payment - interest,
            PaymentType::Differentiated if self.remaining_payments == 0 => self.balance,
            PaymentType::Differentiated => self.balance / Decimal::from(self.remaining_payments),
        };
        portion.min(self.balance)
    }
}

/// scenario periods always accrue a regular period; an irregular first period only
/// shapes the baseline
fn accrual_for(input: &LoanInput, annual_rate: Rate) -> InterestAccrual {
    InterestAccrual::new(annual_rate, input.interest_method, input.day_count_convention, None)
}

/// replay the loan period by period, applying rate changes and extra payments
#[instrument(
    skip(scenario),
    fields(
        extra_payments = scenario.extra_payments.len(),
        rate_changes = scenario.rate_changes.len()
    )
)]
pub fn calculate_scenario(scenario: &ScenarioInput) -> Result<ScenarioResult> {
    let total_payments = scenario.base_input.loan_term_years * 12;
    run_scenario(scenario, total_payments.saturating_mul(SAFETY_CAP_MULTIPLIER))
}

/// scenario loop bounded by `safety_cap` periods
fn run_scenario(scenario: &ScenarioInput, safety_cap: u32) -> Result<ScenarioResult> {
    let input = &scenario.base_input;
    check_preconditions(input)?;
    let start = PeriodCursor::new(scenario.start_year, scenario.start_month)?;

    let original = mortgage_from(input, start);

    let total_payments = input.loan_term_years * 12;
    let timeline = RateTimeline::new(input.annual_interest_rate, &scenario.rate_changes);

    let mut state = ScenarioState::new(input);
    let mut cursor = start;
    let mut schedule = Vec::with_capacity(total_payments as usize);
    let mut total_extra_payments = Money::ZERO;

    for payment_number in 1..=safety_cap {
        if state.balance <= Money::CENT {
            break;
        }

        let rate = timeline.rate_at(payment_number);
        if rate.differs_from(state.annual_rate, RATE_TOLERANCE) {
            debug!(payment_number, from = %state.annual_rate, to = %rate, "rate change");
            state.apply_rate(input, rate);
        }

        let accrued = state.accrual.accrue(state.balance, payment_number, &cursor);
        let principal = state.principal_portion(input.payment_type, accrued.interest);

        let due = extra_payment_due(&scenario.extra_payments, payment_number);
        let headroom = (state.balance - principal).max(Money::ZERO);
        let applied_extra = due.amount.min(headroom).max(Money::ZERO);

        state.balance = (state.balance - principal - applied_extra).max(Money::ZERO);
        state.remaining_payments = state.remaining_payments.saturating_sub(1);

        if applied_extra.is_positive()
            && due.reduce_payment
            && input.payment_type == PaymentType::Annuity
            && state.remaining_payments > 0
            && state.balance > Money::CENT
        {
            state.reamortize();
        }

        total_extra_payments += applied_extra;

        schedule.push(ScheduleEntry {
            payment_number,
            year: cursor.year,
            month: cursor.month,
            payment: principal + accrued.interest + applied_extra,
            interest_payment: accrued.interest,
            principal_payment: principal + applied_extra,
            remaining_balance: state.balance,
            days_in_month: accrued.days,
            extra_payment: Some(applied_extra).filter(Money::is_positive),
            active_rate: Some(state.annual_rate),
        });

        cursor.advance();
    }

    if state.balance > Money::CENT {
        warn!(
            balance = %state.balance,
            periods = schedule.len(),
            "scenario stopped at safety cap with balance outstanding"
        );
    }

    let new_total_interest: Money = schedule.iter().map(|e| e.interest_payment).sum();
    let new_monthly_payment = schedule
        .iter()
        .rev()
        .find(|e| e.extra_payment.is_none())
        .map_or(state.monthly_payment, |e| e.payment);

    let summary = ScenarioSummary {
        original_total_interest: original.summary.total_interest_paid,
        original_total_payments: original.schedule.len() as u32,
        original_monthly_payment: original.summary.monthly_payment,
        new_total_interest,
        new_total_payments: schedule.len() as u32,
        new_monthly_payment,
        interest_saved: original.summary.total_interest_paid - new_total_interest,
        payments_saved: original.schedule.len() as i64 - schedule.len() as i64,
        total_extra_payments,
    };

    debug!(
        interest_saved = %summary.interest_saved,
        payments_saved = summary.payments_saved,
        "scenario complete"
    );

    Ok(ScenarioResult {
        summary,
        schedule,
        original_schedule: original.schedule,
    })
}
