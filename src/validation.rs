use rust_decimal::Decimal;

use crate::config::LoanInput;
use crate::events::{ExtraPaymentEvent, RateChangeEvent};
use crate::types::ExtraPaymentFrequency;

pub const MAX_LOAN_TERM_YEARS: u32 = 50;
pub const MAX_FIRST_PERIOD_DAYS: u32 = 365;

/// check a loan request against the input rules, returning one message per violation
pub fn validate_loan_input(input: &LoanInput) -> Vec<String> {
    let mut errors = Vec::new();

    if !input.property_price.is_positive() {
        errors.push("Property price must be greater than 0".to_string());
    }

    if input.down_payment.is_negative() {
        errors.push("Down payment cannot be negative".to_string());
    }

    if input.property_price.is_positive() && input.down_payment >= input.property_price {
        errors.push("Down payment must be less than property price".to_string());
    }

    if input.loan_term_years == 0 || input.loan_term_years > MAX_LOAN_TERM_YEARS {
        errors.push("Loan term must be between 1 and 50 years".to_string());
    }

    let rate = input.annual_interest_rate.as_decimal();
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        errors.push("Interest rate must be between 0% and 100%".to_string());
    }

    if let Some(days) = input.first_period_days {
        if days == 0 || days > MAX_FIRST_PERIOD_DAYS {
            errors.push("First period days must be between 1 and 365".to_string());
        }
    }

    errors
}

/// check scenario events, returning one message per violation
pub fn validate_scenario_events(
    extra_payments: &[ExtraPaymentEvent],
    rate_changes: &[RateChangeEvent],
) -> Vec<String> {
    let mut errors = Vec::new();

    for event in extra_payments {
        if !event.amount.is_positive() {
            errors.push(format!("Extra payment {} must have a positive amount", event.id));
        }
        if event.start_at_payment == 0 {
            errors.push(format!("Extra payment {} must start at payment 1 or later", event.id));
        }
        if let Some(end) = event.end_at_payment {
            if event.frequency != ExtraPaymentFrequency::OneTime && end < event.start_at_payment {
                errors.push(format!("Extra payment {} must end at or after its start", event.id));
            }
        }
    }

    for change in rate_changes {
        let rate = change.new_rate.as_decimal();
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            errors.push(format!("Rate change {} must be between 0% and 100%", change.id));
        }
        if change.at_payment == 0 {
            errors.push(format!("Rate change {} must apply at payment 1 or later", change.id));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::ExtraPaymentEffect;
    use rust_decimal_macros::dec;

    fn valid_input() -> LoanInput {
        LoanInput::annuity_mortgage(
            Money::from_major(500_000),
            Money::from_major(100_000),
            30,
            Rate::from_bps(650),
        )
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_loan_input(&valid_input()).is_empty());
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let input = LoanInput {
            property_price: Money::ZERO,
            down_payment: Money::from_major(-1),
            loan_term_years: 51,
            annual_interest_rate: Rate::from_decimal(dec!(1.5)),
            first_period_days: Some(0),
            ..valid_input()
        };

        let errors = validate_loan_input(&input);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&"Property price must be greater than 0".to_string()));
        assert!(errors.contains(&"Down payment cannot be negative".to_string()));
        assert!(errors.contains(&"Loan term must be between 1 and 50 years".to_string()));
        assert!(errors.contains(&"Interest rate must be between 0% and 100%".to_string()));
        assert!(errors.contains(&"First period days must be between 1 and 365".to_string()));
    }

    #[test]
    fn test_down_payment_must_leave_a_loan() {
        let input = LoanInput {
            down_payment: Money::from_major(500_000),
            ..valid_input()
        };
        assert_eq!(
            validate_loan_input(&input),
            vec!["Down payment must be less than property price".to_string()]
        );
    }

    #[test]
    fn test_boundary_terms_and_rates() {
        let shortest = LoanInput { loan_term_years: 1, annual_interest_rate: Rate::ZERO, ..valid_input() };
        let longest = LoanInput { loan_term_years: 50, annual_interest_rate: Rate::from_percentage(100), ..valid_input() };
        assert!(validate_loan_input(&shortest).is_empty());
        assert!(validate_loan_input(&longest).is_empty());

        let zero_term = LoanInput { loan_term_years: 0, ..valid_input() };
        assert_eq!(validate_loan_input(&zero_term).len(), 1);
    }

    #[test]
    fn test_scenario_event_rules() {
        let bad_extra = ExtraPaymentEvent::monthly(
            Money::ZERO,
            10,
            Some(5),
            ExtraPaymentEffect::ReduceTerm,
        );
        let bad_rate = RateChangeEvent::new(Rate::from_decimal(dec!(-0.01)), 0);

        let errors = validate_scenario_events(&[bad_extra], &[bad_rate]);
        assert_eq!(errors.len(), 4);

        let good_extra = ExtraPaymentEvent::one_time(Money::from_major(5_000), 12, ExtraPaymentEffect::ReduceTerm);
        let good_rate = RateChangeEvent::new(Rate::from_percentage(5), 6);
        assert!(validate_scenario_events(&[good_extra], &[good_rate]).is_empty());
    }
}
