//! Time-value-of-money primitives: compounding factors and cash-flow
//! present/future values.

use std::fmt;

pub mod time_value;

pub use time_value::{
    CashFlow, compound_growth, future_value_flat, future_value_schedule, present_value_flat,
    present_value_schedule,
};

/// Errors raised by cash-flow construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatesError {
    InvalidCashFlow(String),
}

impl fmt::Display for RatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCashFlow(msg) => write!(f, "invalid cash flow: {msg}"),
        }
    }
}

impl std::error::Error for RatesError {}
