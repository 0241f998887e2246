use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("principal must be greater than 0: got {principal}")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("interest rate cannot be negative: got {rate}")]
    NegativeInterestRate {
        rate: Rate,
    },

    #[error("loan term must be greater than 0: got {years} years")]
    InvalidLoanTerm {
        years: u32,
    },

    #[error("invalid start period: year {year}, month {month}")]
    InvalidStartPeriod {
        year: i32,
        month: u32,
    },

    #[error("invalid input: {}", .messages.join("; "))]
    Validation {
        messages: Vec<String>,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
