/// what-if - extra payments and rate changes against the baseline
use mortgage_schedule_rs::{
    calculate_scenario, ExtraPaymentEffect, ExtraPaymentEvent, LoanInput, Money, Rate,
    RateChangeEvent, ScenarioInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = LoanInput::annuity_mortgage(
        Money::from_major(500_000),
        Money::from_major(100_000),
        30,
        Rate::from_bps(650),
    );

    let scenario = ScenarioInput::new(input, 2025, 1)
        // bonus after the first year shortens the loan
        .with_extra_payment(ExtraPaymentEvent::one_time(
            Money::from_major(25_000),
            12,
            ExtraPaymentEffect::ReduceTerm,
        ))
        // yearly top-up lowers the installment instead
        .with_extra_payment(ExtraPaymentEvent::yearly(
            Money::from_major(5_000),
            24,
            Some(120),
            ExtraPaymentEffect::ReducePayment,
        ))
        // listed out of order on purpose
        .with_rate_change(RateChangeEvent::new(Rate::from_bps(550), 60))
        .with_rate_change(RateChangeEvent::new(Rate::from_bps(725), 36));

    scenario.validate()?;
    let result = calculate_scenario(&scenario)?;
    let summary = &result.summary;

    println!("=== what-if ===\n");
    println!("payments:        {} -> {}", summary.original_total_payments, summary.new_total_payments);
    println!(
        "monthly payment: {} -> {}",
        summary.original_monthly_payment.round_dp(2),
        summary.new_monthly_payment.round_dp(2)
    );
    println!(
        "total interest:  {} -> {}",
        summary.original_total_interest.round_dp(2),
        summary.new_total_interest.round_dp(2)
    );
    println!("interest saved:  {}", summary.interest_saved.round_dp(2));
    println!("payments saved:  {}", summary.payments_saved);
    println!("extra paid:      {}", summary.total_extra_payments.round_dp(2));

    println!("\nrate in force:");
    for n in [1, 36, 60] {
        if let Some(entry) = result.schedule.get(n - 1) {
            if let Some(rate) = entry.active_rate {
                println!("  payment {:>3}: {} ({})", n, rate, entry.payment.round_dp(2));
            }
        }
    }

    println!("\n{}", serde_json::to_string_pretty(summary)?);

    Ok(())
}
