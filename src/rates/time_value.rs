//! Flat-rate and per-flow compounding arithmetic.
//!
//! Flows are indexed from the end of the first period: the `i`-th amount
//! (zero-based) sits `i + 1` periods away from valuation. The schedule
//! variants let every flow carry its own rate, with the compound factor
//! cascading across flows in order.

use serde::{Deserialize, Serialize};

use crate::rates::RatesError;

/// Growth factor of one unit compounded `periods` times at the nominal
/// `rate`, `(1 + rate / periods)^periods`.
///
/// # Panics
/// Panics when `periods == 0`.
pub fn compound_growth(rate: f64, periods: u32) -> f64 {
    assert!(periods > 0, "periods must be positive");
    (1.0 + rate / periods as f64).powi(periods as i32)
}

/// One cash flow with its own nominal rate and compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub rate: f64,
    pub amount: f64,
    /// Compoundings per period; at least 1.
    pub compounding: u32,
}

impl CashFlow {
    pub fn new(rate: f64, amount: f64, compounding: u32) -> Result<Self, RatesError> {
        if !rate.is_finite() {
            return Err(RatesError::InvalidCashFlow(format!(
                "rate must be finite, got {rate}"
            )));
        }
        if !amount.is_finite() {
            return Err(RatesError::InvalidCashFlow(format!(
                "amount must be finite, got {amount}"
            )));
        }
        if compounding == 0 {
            return Err(RatesError::InvalidCashFlow(
                "compounding frequency must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            rate,
            amount,
            compounding,
        })
    }

    /// Annually compounded flow.
    pub fn annual(rate: f64, amount: f64) -> Result<Self, RatesError> {
        Self::new(rate, amount, 1)
    }

    /// Growth factor of this flow over one period.
    fn period_factor(&self) -> f64 {
        compound_growth(self.rate, self.compounding)
    }
}

/// Present value of `amounts` under one rate, compounded `compounding`
/// times per period.
///
/// # Panics
/// Panics when `compounding == 0`.
pub fn present_value_flat(rate: f64, amounts: &[f64], compounding: u32) -> f64 {
    let factor = compound_growth(rate, compounding);
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| amount / factor.powi(i as i32 + 1))
        .sum()
}

/// Future value of `amounts` under one rate; the `i`-th amount accrues for
/// `i + 1` periods.
///
/// # Panics
/// Panics when `compounding == 0`.
pub fn future_value_flat(rate: f64, amounts: &[f64], compounding: u32) -> f64 {
    let factor = compound_growth(rate, compounding);
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| amount * factor.powi(i as i32 + 1))
        .sum()
}

/// Present value of a schedule where each flow carries its own rate.
///
/// The discount factor cascades: flow `i` is discounted through the
/// product of the period factors of flows `0..=i`.
pub fn present_value_schedule(flows: &[CashFlow]) -> f64 {
    let mut factor = 1.0;
    let mut total = 0.0;
    for flow in flows {
        factor *= flow.period_factor();
        total += flow.amount / factor;
    }
    total
}

/// Future value counterpart of [`present_value_schedule`] with the same
/// cascading factors.
pub fn future_value_schedule(flows: &[CashFlow]) -> f64 {
    let mut factor = 1.0;
    let mut total = 0.0;
    for flow in flows {
        factor *= flow.period_factor();
        total += flow.amount * factor;
    }
    total
}
