use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// identifier of a scenario event
pub type EventId = Uuid;

/// how the recurring payment is structured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    /// equal installments, interest share declines over time
    Annuity,
    /// equal principal portions, total payment declines over time
    Differentiated,
}

/// how each period's interest is accrued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestMethod {
    /// annual rate / 12 on the outstanding balance
    Monthly,
    /// annual rate / year basis, times the days in the period
    Daily,
}

/// assumed days per year when deriving a daily rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 360-day year, every month counts 30 days
    #[serde(rename = "360")]
    Thirty360,
    /// 365-day year, months count their calendar days
    #[serde(rename = "365")]
    Actual365,
}

impl DayCountConvention {
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Thirty360 => 360,
            DayCountConvention::Actual365 => 365,
        }
    }
}

/// recurrence of an extra payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraPaymentFrequency {
    OneTime,
    Monthly,
    Yearly,
}

/// what an extra payment does to the rest of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraPaymentEffect {
    /// keep the payment, finish earlier
    ReduceTerm,
    /// keep the term, lower the payment
    ReducePayment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentType::Differentiated).unwrap(), "\"differentiated\"");
        assert_eq!(serde_json::to_string(&ExtraPaymentFrequency::OneTime).unwrap(), "\"one-time\"");
        assert_eq!(serde_json::to_string(&ExtraPaymentEffect::ReducePayment).unwrap(), "\"reduce-payment\"");
        assert_eq!(serde_json::to_string(&DayCountConvention::Thirty360).unwrap(), "\"360\"");

        let convention: DayCountConvention = serde_json::from_str("\"365\"").unwrap();
        assert_eq!(convention, DayCountConvention::Actual365);
        assert_eq!(convention.year_basis(), 365);
    }
}
