pub mod annuity;
pub mod differentiated;
pub mod interest;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::PeriodCursor;
use crate::config::LoanInput;
use crate::decimal::{Money, Rate};
use crate::schedule::ScheduleEntry;
use crate::types::DayCountConvention;

pub use annuity::generate_annuity_schedule;
pub use differentiated::generate_differentiated_schedule;
pub use interest::{InterestAccrual, PeriodInterest};

/// loan parameters derived from user input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub total_payments: u32,
    pub monthly_rate: Rate,
    pub daily_rate: Rate,
    pub day_count_convention: DayCountConvention,
}

/// map raw input into normalized loan parameters; performs no validation
pub fn derive_loan_parameters(input: &LoanInput) -> LoanParameters {
    LoanParameters {
        principal: input.loan_amount(),
        total_payments: input.loan_term_years * 12,
        monthly_rate: input.annual_interest_rate.monthly_rate(),
        daily_rate: input
            .annual_interest_rate
            .daily_rate(input.day_count_convention.year_basis()),
        day_count_convention: input.day_count_convention,
    }
}

/// fixed payment that amortizes `principal` over `periods` at `periodic_rate`
///
/// M = P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when r is zero. The rate factor is
/// formed before scaling by the principal so large loans at long terms stay in range.
pub fn calculate_annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> Money {
    if periods == 0 {
        return principal;
    }

    let r = periodic_rate.as_decimal();
    if r.is_zero() {
        return principal / Decimal::from(periods);
    }

    Money::from_decimal(principal.as_decimal() * annuity_factor(r, periods))
}

/// r * (1 + r)^n / ((1 + r)^n - 1)
fn annuity_factor(r: Decimal, periods: u32) -> Decimal {
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            // (1 + r)^n beyond range: the factor has converged to r
            None => return r,
        }
    }

    r.checked_mul(compound)
        .and_then(|numerator| numerator.checked_div(compound - Decimal::ONE))
        .unwrap_or(r)
}

/// how much principal a regular period retires
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PrincipalRule {
    /// fixed payment less the standard monthly interest
    Annuity { payment: Money, monthly_rate: Rate },
    /// constant share of the original principal
    Fixed { portion: Money },
}

impl PrincipalRule {
    fn principal_portion(&self, balance: Money) -> Money {
        match *self {
            PrincipalRule::Annuity { payment, monthly_rate } => payment - balance * monthly_rate,
            PrincipalRule::Fixed { portion } => portion,
        }
    }
}

/// period loop shared by every engine variant
///
/// The final period always pays off the exact remaining balance so rounding drift
/// never leaves a residue.
pub(crate) fn build_schedule(
    params: &LoanParameters,
    rule: PrincipalRule,
    accrual: &InterestAccrual,
    start: PeriodCursor,
) -> Vec<ScheduleEntry> {
    let mut entries = Vec::with_capacity(params.total_payments as usize);
    let mut balance = params.principal;
    let mut cursor = start;

    for payment_number in 1..=params.total_payments {
        let accrued = accrual.accrue(balance, payment_number, &cursor);

        let principal_payment = if payment_number == params.total_payments {
            balance
        } else {
            rule.principal_portion(balance)
        };
        let payment = principal_payment + accrued.interest;

        balance = (balance - principal_payment).max(Money::ZERO);

        entries.push(ScheduleEntry {
            payment_number,
            year: cursor.year,
            month: cursor.month,
            payment,
            interest_payment: accrued.interest,
            principal_payment,
            remaining_balance: balance,
            days_in_month: accrued.days,
            extra_payment: None,
            active_rate: None,
        });

        cursor.advance();
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_derive_parameters() {
        let input = LoanInput::annuity_mortgage(
            Money::from_major(500_000),
            Money::from_major(100_000),
            30,
            Rate::from_bps(650),
        );
        let params = derive_loan_parameters(&input);

        assert_eq!(params.principal, Money::from_major(400_000));
        assert_eq!(params.total_payments, 360);
        assert_eq!(params.monthly_rate.as_decimal().round_dp(7), dec!(0.0054167));
        assert_eq!(params.daily_rate.as_decimal(), dec!(0.065) / dec!(365));
        assert_eq!(params.day_count_convention, DayCountConvention::Actual365);
    }

    #[test]
    fn test_annuity_payment_known_value() {
        let payment = calculate_annuity_payment(
            Money::from_major(400_000),
            Rate::from_bps(650).monthly_rate(),
            360,
        );
        assert_eq!(payment.round_dp(2), Money::from_str_exact("2528.27").unwrap());
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let payment = calculate_annuity_payment(Money::from_major(12_000), Rate::ZERO, 12);
        assert_eq!(payment, Money::from_major(1_000));
    }

    #[test]
    fn test_annuity_payment_no_periods_left() {
        let payment = calculate_annuity_payment(Money::from_major(5_000), Rate::from_percentage(1), 0);
        assert_eq!(payment, Money::from_major(5_000));
    }

    #[test]
    fn test_annuity_payment_large_loan_long_term() {
        // (13/12)^600 is about 7e20, so P * r * (1+r)^n would leave the decimal range
        let payment = calculate_annuity_payment(
            Money::from_major(2_000_000_000),
            Rate::from_percentage(100).monthly_rate(),
            600,
        );
        assert_eq!(payment.round_dp(2), Money::from_str_exact("166666666.67").unwrap());
    }

    #[test]
    fn test_annuity_payment_rate_beyond_range() {
        let rate = Rate::from_percentage(500).monthly_rate();
        let payment = calculate_annuity_payment(Money::from_major(1_000), rate, 600);
        assert_eq!(payment, Money::from_major(1_000) * rate);
    }

    #[test]
    fn test_annuity_payment_single_period() {
        let payment = calculate_annuity_payment(Money::from_major(1_000), Rate::from_percentage(1), 1);
        assert_eq!(payment, Money::from_major(1_010));
    }
}
