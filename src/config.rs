use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::types::{DayCountConvention, InterestMethod, PaymentType};
use crate::validation::validate_loan_input;

/// validated loan request handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub property_price: Money,
    pub down_payment: Money,
    pub loan_term_years: u32,
    /// decimal fraction, 0.065 = 6.5%
    pub annual_interest_rate: Rate,
    pub payment_type: PaymentType,
    pub interest_method: InterestMethod,
    pub day_count_convention: DayCountConvention,
    /// accrual days covered by the first payment when disbursement is mid-period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_period_days: Option<u32>,
}

impl LoanInput {
    /// create annuity mortgage with monthly interest and a 365-day year
    pub fn annuity_mortgage(
        property_price: Money,
        down_payment: Money,
        loan_term_years: u32,
        annual_interest_rate: Rate,
    ) -> Self {
        Self {
            property_price,
            down_payment,
            loan_term_years,
            annual_interest_rate,
            payment_type: PaymentType::Annuity,
            interest_method: InterestMethod::Monthly,
            day_count_convention: DayCountConvention::Actual365,
            first_period_days: None,
        }
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    pub fn with_interest_method(
        mut self,
        interest_method: InterestMethod,
        day_count_convention: DayCountConvention,
    ) -> Self {
        self.interest_method = interest_method;
        self.day_count_convention = day_count_convention;
        self
    }

    pub fn with_first_period_days(mut self, days: u32) -> Self {
        self.first_period_days = Some(days);
        self
    }

    /// loan amount before any validation
    pub fn loan_amount(&self) -> Money {
        self.property_price - self.down_payment
    }

    /// run the input validation rules, collecting every failure
    pub fn validate(&self) -> Result<()> {
        let messages = validate_loan_input(self);
        if messages.is_empty() {
            Ok(())
        } else {
            Err(MortgageError::Validation { messages })
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// down payment as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "kebab-case")]
pub enum DownPayment {
    /// absolute amount
    Amount(Money),
    /// share of the property price, 20 = 20%
    Percentage(Decimal),
}

impl DownPayment {
    pub fn resolve(&self, property_price: Money) -> Money {
        match self {
            DownPayment::Amount(amount) => *amount,
            DownPayment::Percentage(pct) => property_price.percentage(*pct),
        }
    }
}

/// raw form state before the down payment is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageFormState {
    pub property_price: Money,
    pub down_payment: DownPayment,
    pub loan_term_years: u32,
    pub annual_interest_rate: Rate,
    pub payment_type: PaymentType,
    pub interest_method: InterestMethod,
    pub day_count_convention: DayCountConvention,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_period_days: Option<u32>,
}

impl Default for MortgageFormState {
    fn default() -> Self {
        Self {
            property_price: Money::from_major(500_000),
            down_payment: DownPayment::Percentage(dec!(20)),
            loan_term_years: 30,
            annual_interest_rate: Rate::from_bps(650),
            payment_type: PaymentType::Annuity,
            interest_method: InterestMethod::Monthly,
            day_count_convention: DayCountConvention::Actual365,
            first_period_days: None,
        }
    }
}

impl MortgageFormState {
    pub fn to_loan_input(&self) -> LoanInput {
        LoanInput {
            property_price: self.property_price,
            down_payment: self.down_payment.resolve(self.property_price),
            loan_term_years: self.loan_term_years,
            annual_interest_rate: self.annual_interest_rate,
            payment_type: self.payment_type,
            interest_method: self.interest_method,
            day_count_convention: self.day_count_convention,
            first_period_days: self.first_period_days,
        }
    }

    /// validate the form and resolve it into engine input
    pub fn validate(&self) -> Result<LoanInput> {
        let input = self.to_loan_input();
        let mut messages = Vec::new();

        if let DownPayment::Percentage(pct) = self.down_payment {
            if pct < Decimal::ZERO || pct >= dec!(100) {
                messages.push("Down payment percentage must be between 0% and 100%".to_string());
            }
        }
        messages.extend(validate_loan_input(&input));

        if messages.is_empty() {
            Ok(input)
        } else {
            Err(MortgageError::Validation { messages })
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
