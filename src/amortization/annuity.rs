use tracing::debug;

use crate::calendar::PeriodCursor;
use crate::schedule::ScheduleEntry;
use crate::types::InterestMethod;

use super::{build_schedule, calculate_annuity_payment, InterestAccrual, LoanParameters, PrincipalRule};

/// fixed-payment schedule
///
/// Principal follows the standard monthly-rate annuity trajectory under both interest
/// methods. With daily interest the charged interest tracks the period's day count, so
/// the reported payment drifts slightly from month to month.
pub fn generate_annuity_schedule(
    params: &LoanParameters,
    method: InterestMethod,
    start: PeriodCursor,
    first_period_days: Option<u32>,
) -> Vec<ScheduleEntry> {
    let payment = calculate_annuity_payment(params.principal, params.monthly_rate, params.total_payments);
    debug!(%payment, periods = params.total_payments, ?method, "annuity payment computed");

    let accrual = InterestAccrual::from_rates(
        params.monthly_rate,
        params.daily_rate,
        method,
        params.day_count_convention,
        first_period_days,
    );
    let rule = PrincipalRule::Annuity {
        payment,
        monthly_rate: params.monthly_rate,
    };

    build_schedule(params, rule, &accrual, start)
}
