use rust_decimal::Decimal;
use tracing::debug;

use crate::calendar::PeriodCursor;
use crate::schedule::ScheduleEntry;
use crate::types::InterestMethod;

use super::{build_schedule, InterestAccrual, LoanParameters, PrincipalRule};

/// fixed-principal schedule: principal / n each period plus interest on the balance
pub fn generate_differentiated_schedule(
    params: &LoanParameters,
    method: InterestMethod,
    start: PeriodCursor,
    first_period_days: Option<u32>,
) -> Vec<ScheduleEntry> {
    let portion = params.principal / Decimal::from(params.total_payments.max(1));
    debug!(%portion, periods = params.total_payments, ?method, "differentiated principal computed");

    let accrual = InterestAccrual::from_rates(
        params.monthly_rate,
        params.daily_rate,
        method,
        params.day_count_convention,
        first_period_days,
    );

    build_schedule(params, PrincipalRule::Fixed { portion }, &accrual, start)
}
