//! Uniform priors over the calibrated parameters.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{CalibrationError, ModelParameters};

/// Half-open uniform range `[low, high)` for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorRange {
    pub low: f64,
    pub high: f64,
}

impl PriorRange {
    pub fn new(low: f64, high: f64) -> Result<Self, CalibrationError> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "prior bounds must be finite, got [{}, {}]",
                self.low, self.high
            )));
        }
        if self.low >= self.high {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "prior lower bound must lie below the upper bound, got [{}, {}]",
                self.low, self.high
            )));
        }
        Ok(())
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.low..self.high)
    }
}

/// One uniform range per free parameter.
///
/// Lower bounds must be strictly positive so every sampled
/// [`ModelParameters`] satisfies its positivity invariant without per-draw
/// checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterPriors {
    pub kappa: PriorRange,
    pub theta: PriorRange,
}

impl Default for ParameterPriors {
    /// Search box of the synthetic-data study: `kappa` in `[0.8, 1.5)`,
    /// `theta` in `[0.03, 0.07)`.
    fn default() -> Self {
        Self {
            kappa: PriorRange {
                low: 0.8,
                high: 1.5,
            },
            theta: PriorRange {
                low: 0.03,
                high: 0.07,
            },
        }
    }
}

impl ParameterPriors {
    pub fn new(kappa: PriorRange, theta: PriorRange) -> Result<Self, CalibrationError> {
        let priors = Self { kappa, theta };
        priors.validate()?;
        Ok(priors)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        self.kappa.validate()?;
        self.theta.validate()?;
        if self.kappa.low <= 0.0 || self.theta.low <= 0.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "prior lower bounds must be strictly positive, got kappa >= {}, theta >= {}",
                self.kappa.low, self.theta.low
            )));
        }
        Ok(())
    }

    /// Draws one candidate, `kappa` first then `theta`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ModelParameters {
        ModelParameters::new(self.kappa.sample(rng), self.theta.sample(rng))
    }
}
