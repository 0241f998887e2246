use rust_decimal::Decimal;

use crate::calendar::PeriodCursor;
use crate::decimal::{Money, Rate};
use crate::types::{DayCountConvention, InterestMethod};

/// year basis used for a mid-period disbursement, whatever the loan's convention
const FIRST_PERIOD_YEAR_BASIS: u32 = 365;

/// interest charged for one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodInterest {
    pub interest: Money,
    /// accrual days, reported for daily interest only
    pub days: Option<u32>,
}

/// per-period interest rule for one loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestAccrual {
    method: InterestMethod,
    monthly_rate: Rate,
    daily_rate: Rate,
    convention: DayCountConvention,
    first_period_days: Option<u32>,
}

impl InterestAccrual {
    pub fn new(
        annual_rate: Rate,
        method: InterestMethod,
        convention: DayCountConvention,
        first_period_days: Option<u32>,
    ) -> Self {
        Self {
            method,
            monthly_rate: annual_rate.monthly_rate(),
            daily_rate: annual_rate.daily_rate(convention.year_basis()),
            convention,
            first_period_days: first_period_days.filter(|days| *days > 0),
        }
    }

    /// accrual from already derived monthly and daily rates
    pub fn from_rates(
        monthly_rate: Rate,
        daily_rate: Rate,
        method: InterestMethod,
        convention: DayCountConvention,
        first_period_days: Option<u32>,
    ) -> Self {
        Self {
            method,
            monthly_rate,
            daily_rate,
            convention,
            first_period_days: first_period_days.filter(|days| *days > 0),
        }
    }

    /// interest on `balance` for period `payment_number`
    pub fn accrue(&self, balance: Money, payment_number: u32, cursor: &PeriodCursor) -> PeriodInterest {
        let first_period = if payment_number == 1 { self.first_period_days } else { None };

        match (self.method, first_period) {
            (InterestMethod::Monthly, Some(days)) => PeriodInterest {
                interest: first_period_interest(balance, self.monthly_rate, days),
                days: None,
            },
            (InterestMethod::Monthly, None) => PeriodInterest {
                interest: balance * self.monthly_rate,
                days: None,
            },
            (InterestMethod::Daily, Some(days)) => PeriodInterest {
                interest: first_period_interest(balance, self.monthly_rate, days),
                days: Some(days),
            },
            (InterestMethod::Daily, None) => {
                let days = cursor.accrual_days(self.convention);
                PeriodInterest {
                    interest: daily_interest(balance, self.daily_rate, days),
                    days: Some(days),
                }
            }
        }
    }
}

/// balance * daily rate * days
pub fn daily_interest(balance: Money, daily_rate: Rate, days: u32) -> Money {
    balance * (daily_rate.as_decimal() * Decimal::from(days))
}

/// interest for an irregular first period, always on a 365-day year
pub fn first_period_interest(balance: Money, monthly_rate: Rate, days: u32) -> Money {
    let daily_rate = monthly_rate.annualized().daily_rate(FIRST_PERIOD_YEAR_BASIS);
    daily_interest(balance, daily_rate, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> PeriodCursor {
        PeriodCursor::new(2025, 1).unwrap()
    }

    #[test]
    fn test_monthly_interest() {
        let accrual = InterestAccrual::new(
            Rate::from_percentage(12),
            InterestMethod::Monthly,
            DayCountConvention::Actual365,
            None,
        );
        let accrued = accrual.accrue(Money::from_major(100_000), 5, &january());
        assert_eq!(accrued.interest, Money::from_major(1_000));
        assert_eq!(accrued.days, None);
    }

    #[test]
    fn test_daily_interest_conventions() {
        let actual = InterestAccrual::new(
            Rate::from_percentage(73),
            InterestMethod::Daily,
            DayCountConvention::Actual365,
            None,
        );
        let accrued = actual.accrue(Money::from_major(10_000), 3, &january());
        // 10_000 * 0.73 / 365 * 31
        assert_eq!(accrued.interest, Money::from_major(620));
        assert_eq!(accrued.days, Some(31));

        let thirty = InterestAccrual::new(
            Rate::from_percentage(36),
            InterestMethod::Daily,
            DayCountConvention::Thirty360,
            None,
        );
        let accrued = thirty.accrue(Money::from_major(10_000), 3, &january());
        assert_eq!(accrued.interest, Money::from_major(300));
        assert_eq!(accrued.days, Some(30));
    }

    #[test]
    fn test_first_period_override_applies_once() {
        let accrual = InterestAccrual::new(
            Rate::from_bps(650),
            InterestMethod::Monthly,
            DayCountConvention::Actual365,
            Some(45),
        );
        let balance = Money::from_major(400_000);

        let first = accrual.accrue(balance, 1, &january());
        assert_eq!(first.interest.round_dp(2), Money::from_str_exact("3205.48").unwrap());

        let second = accrual.accrue(balance, 2, &january());
        assert_eq!(second.interest.round_dp(2), Money::from_str_exact("2166.67").unwrap());
    }

    #[test]
    fn test_first_period_replaces_days_in_daily_mode() {
        let accrual = InterestAccrual::new(
            Rate::from_bps(650),
            InterestMethod::Daily,
            DayCountConvention::Thirty360,
            Some(45),
        );
        let first = accrual.accrue(Money::from_major(400_000), 1, &january());
        assert_eq!(first.days, Some(45));
        // 365-day year even under the 360 convention
        assert_eq!(first.interest.round_dp(2), Money::from_str_exact("3205.48").unwrap());
    }

    #[test]
    fn test_zero_first_period_days_ignored() {
        let accrual = InterestAccrual::new(
            Rate::from_percentage(12),
            InterestMethod::Monthly,
            DayCountConvention::Actual365,
            Some(0),
        );
        let first = accrual.accrue(Money::from_major(100_000), 1, &january());
        assert_eq!(first.interest, Money::from_major(1_000));
    }
}
