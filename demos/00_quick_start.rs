/// quick start - schedule for the default form values
use mortgage_schedule_rs::{calculate_mortgage, MortgageFormState, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // 500,000 property, 20% down, 30 years at 6.5%
    let input = MortgageFormState::default().validate()?;
    let result = calculate_mortgage(&input, None, None, &time)?;
    let summary = &result.summary;

    println!("loan amount:     {}", summary.principal);
    println!("monthly payment: {}", summary.monthly_payment.round_dp(2));
    println!("total interest:  {}", summary.total_interest_paid.round_dp(2));
    println!("total paid:      {}", summary.total_amount_paid.round_dp(2));
    println!("overpayment:     {}", summary.overpayment_ratio.round_dp(4));

    // first year
    println!("\n  #   period      payment   interest  principal      balance");
    for entry in result.schedule.iter().take(12) {
        println!(
            "{:>3}  {}-{:02}  {:>10}  {:>9}  {:>9}  {:>11}",
            entry.payment_number,
            entry.year,
            entry.month,
            entry.payment.round_dp(2),
            entry.interest_payment.round_dp(2),
            entry.principal_payment.round_dp(2),
            entry.remaining_balance.round_dp(2),
        );
    }

    Ok(())
}
