use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};

/// one payment period of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-indexed
    pub payment_number: u32,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub payment: Money,
    pub interest_payment: Money,
    pub principal_payment: Money,
    /// balance after this payment
    pub remaining_balance: Money,
    /// accrual days, present for daily interest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_in_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_payment: Option<Money>,
    /// annual rate in force, present on scenario schedules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_rate: Option<Rate>,
}

/// headline figures of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    /// recurring payment; the second period's when the first is adjusted
    pub monthly_payment: Money,
    /// set when the first payment differs from the recurring one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_amount: Option<Money>,
    /// set when the final payment differs from the recurring one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_monthly_payment: Option<Money>,
    pub total_amount_paid: Money,
    pub total_interest_paid: Money,
    /// total interest / principal
    pub overpayment_ratio: Decimal,
    pub principal: Money,
}

/// derive summary statistics from a generated schedule
pub fn calculate_summary(schedule: &[ScheduleEntry], principal: Money) -> MortgageSummary {
    let total_amount_paid: Money = schedule.iter().map(|e| e.payment).sum();
    let total_interest_paid: Money = schedule.iter().map(|e| e.interest_payment).sum();

    let overpayment_ratio = if principal.is_positive() {
        total_interest_paid.as_decimal() / principal.as_decimal()
    } else {
        Decimal::ZERO
    };

    let first = schedule.first().map_or(Money::ZERO, |e| e.payment);
    let (monthly_payment, first_payment_amount) = match schedule.get(1) {
        Some(second) if first.differs_from(second.payment, Money::CENT) => (second.payment, Some(first)),
        _ => (first, None),
    };

    let last_monthly_payment = schedule
        .last()
        .map(|e| e.payment)
        .filter(|last| last.differs_from(monthly_payment, Money::CENT));

    debug!(
        periods = schedule.len(),
        %monthly_payment,
        %total_interest_paid,
        "schedule summarised"
    );

    MortgageSummary {
        monthly_payment,
        first_payment_amount,
        last_monthly_payment,
        total_amount_paid,
        total_interest_paid,
        overpayment_ratio,
        principal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(payment_number: u32, payment: i64, interest: i64) -> ScheduleEntry {
        ScheduleEntry {
            payment_number,
            year: 2025,
            month: payment_number,
            payment: Money::from_major(payment),
            interest_payment: Money::from_major(interest),
            principal_payment: Money::from_major(payment - interest),
            remaining_balance: Money::ZERO,
            days_in_month: None,
            extra_payment: None,
            active_rate: None,
        }
    }

    #[test]
    fn test_flat_payments() {
        let schedule = vec![entry(1, 500, 100), entry(2, 500, 80), entry(3, 500, 60)];
        let summary = calculate_summary(&schedule, Money::from_major(1_260));

        assert_eq!(summary.monthly_payment, Money::from_major(500));
        assert_eq!(summary.first_payment_amount, None);
        assert_eq!(summary.last_monthly_payment, None);
        assert_eq!(summary.total_amount_paid, Money::from_major(1_500));
        assert_eq!(summary.total_interest_paid, Money::from_major(240));
        assert_eq!(summary.overpayment_ratio.round_dp(4), dec!(0.1905));
    }

    #[test]
    fn test_adjusted_first_and_last_payment() {
        let schedule = vec![entry(1, 700, 300), entry(2, 500, 80), entry(3, 420, 10)];
        let summary = calculate_summary(&schedule, Money::from_major(1_230));

        assert_eq!(summary.first_payment_amount, Some(Money::from_major(700)));
        assert_eq!(summary.monthly_payment, Money::from_major(500));
        assert_eq!(summary.last_monthly_payment, Some(Money::from_major(420)));
    }

    #[test]
    fn test_single_period_and_empty_schedule() {
        let single = calculate_summary(&[entry(1, 1_010, 10)], Money::from_major(1_000));
        assert_eq!(single.monthly_payment, Money::from_major(1_010));
        assert_eq!(single.first_payment_amount, None);
        assert_eq!(single.last_monthly_payment, None);

        let empty = calculate_summary(&[], Money::ZERO);
        assert_eq!(empty.monthly_payment, Money::ZERO);
        assert_eq!(empty.overpayment_ratio, Decimal::ZERO);
    }
}
