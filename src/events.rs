use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::types::{EventId, ExtraPaymentEffect, ExtraPaymentFrequency};

/// out-of-schedule payment applied to principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentEvent {
    pub id: EventId,
    pub amount: Money,
    pub frequency: ExtraPaymentFrequency,
    /// first payment number (1-indexed) the event applies to
    pub start_at_payment: u32,
    /// last payment number, inclusive; ignored for one-time events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at_payment: Option<u32>,
    pub effect: ExtraPaymentEffect,
}

impl ExtraPaymentEvent {
    pub fn one_time(amount: Money, at_payment: u32, effect: ExtraPaymentEffect) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            frequency: ExtraPaymentFrequency::OneTime,
            start_at_payment: at_payment,
            end_at_payment: None,
            effect,
        }
    }

    pub fn monthly(
        amount: Money,
        start_at_payment: u32,
        end_at_payment: Option<u32>,
        effect: ExtraPaymentEffect,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            frequency: ExtraPaymentFrequency::Monthly,
            start_at_payment,
            end_at_payment,
            effect,
        }
    }

    pub fn yearly(
        amount: Money,
        start_at_payment: u32,
        end_at_payment: Option<u32>,
        effect: ExtraPaymentEffect,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            frequency: ExtraPaymentFrequency::Yearly,
            start_at_payment,
            end_at_payment,
            effect,
        }
    }

    /// whether `payment_number` lies inside the event's schedule window
    pub fn is_active_at(&self, payment_number: u32) -> bool {
        match self.frequency {
            ExtraPaymentFrequency::OneTime => payment_number == self.start_at_payment,
            ExtraPaymentFrequency::Monthly | ExtraPaymentFrequency::Yearly => {
                payment_number >= self.start_at_payment
                    && self.end_at_payment.map_or(true, |end| payment_number <= end)
            }
        }
    }

    /// whether this event pays at `payment_number`
    pub fn fires_at(&self, payment_number: u32) -> bool {
        self.is_active_at(payment_number)
            && match self.frequency {
                ExtraPaymentFrequency::Yearly => (payment_number - self.start_at_payment) % 12 == 0,
                ExtraPaymentFrequency::OneTime | ExtraPaymentFrequency::Monthly => true,
            }
    }
}

/// extra payments due at one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraPaymentDue {
    pub amount: Money,
    pub reduce_payment: bool,
}

/// sum every extra payment that fires at `payment_number`
///
/// The reduce-payment flag follows the events' windows rather than their firing days, so a
/// yearly reduce-payment plan also re-amortizes after another event's payment in between.
pub fn extra_payment_due(events: &[ExtraPaymentEvent], payment_number: u32) -> ExtraPaymentDue {
    let amount = events
        .iter()
        .filter(|event| event.fires_at(payment_number))
        .map(|event| event.amount)
        .sum();

    let reduce_payment = events.iter().any(|event| {
        event.effect == ExtraPaymentEffect::ReducePayment && event.is_active_at(payment_number)
    });

    ExtraPaymentDue { amount, reduce_payment }
}

/// change of the annual rate from a given payment onward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChangeEvent {
    pub id: EventId,
    pub new_rate: Rate,
    pub at_payment: u32,
}

impl RateChangeEvent {
    pub fn new(new_rate: Rate, at_payment: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            new_rate,
            at_payment,
        }
    }
}

/// step function of the annual rate over payment numbers
#[derive(Debug, Clone)]
pub struct RateTimeline {
    base_rate: Rate,
    // sorted by at_payment; equal keys keep input order
    changes: Vec<RateChangeEvent>,
}

impl RateTimeline {
    pub fn new(base_rate: Rate, changes: &[RateChangeEvent]) -> Self {
        let mut changes = changes.to_vec();
        changes.sort_by_key(|change| change.at_payment);
        Self { base_rate, changes }
    }

    /// rate in effect at `payment_number`
    pub fn rate_at(&self, payment_number: u32) -> Rate {
        self.changes
            .iter()
            .take_while(|change| change.at_payment <= payment_number)
            .last()
            .map_or(self.base_rate, |change| change.new_rate)
    }
}
