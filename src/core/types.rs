use serde::{Deserialize, Serialize};

use super::CalibrationError;

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

/// The two free quantities recovered by the rejection sampler.
///
/// `kappa` is the mean-reversion speed of the variance process and `theta`
/// its long-run level. Positivity is upheld by the validated prior ranges
/// the sampler draws from, not re-checked on every use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Variance mean-reversion speed.
    pub kappa: f64,
    /// Long-run variance level.
    pub theta: f64,
}

impl ModelParameters {
    pub fn new(kappa: f64, theta: f64) -> Self {
        Self { kappa, theta }
    }
}

/// Fixed hyperparameters shared by every simulation in a calibration run.
///
/// Immutable once built; passed by reference into each component. The
/// canonical values (`Default`) match the synthetic-data study the engine
/// was designed around: a one-year daily grid with moderately negative
/// spot/variance correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Initial spot level.
    pub s0: f64,
    /// Initial instantaneous variance.
    pub v0: f64,
    /// Drift of the spot process.
    pub mu: f64,
    /// Volatility of variance.
    pub xi: f64,
    /// Correlation between the spot and variance Brownian drivers.
    pub rho: f64,
    /// Path horizon in years.
    pub horizon: f64,
    /// Number of grid points per path (initial point included).
    pub steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            s0: 100.0,
            v0: 0.04,
            mu: 0.0,
            xi: 0.3,
            rho: -0.7,
            horizon: 1.0,
            steps: 252,
        }
    }
}

impl SimulationConfig {
    /// Time increment of the Euler grid.
    pub fn dt(&self) -> f64 {
        self.horizon / self.steps as f64
    }

    /// Rejects statically invalid inputs before any simulation starts.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.steps < 2 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "steps must be at least 2, got {}",
                self.steps
            )));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "horizon must be finite and positive, got {}",
                self.horizon
            )));
        }
        if !self.s0.is_finite() || self.s0 <= 0.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "s0 must be finite and positive, got {}",
                self.s0
            )));
        }
        if !self.v0.is_finite() || self.v0 < 0.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "v0 must be finite and non-negative, got {}",
                self.v0
            )));
        }
        if !self.mu.is_finite() {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "mu must be finite, got {}",
                self.mu
            )));
        }
        if !self.xi.is_finite() || self.xi < 0.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "xi must be finite and non-negative, got {}",
                self.xi
            )));
        }
        if !self.rho.is_finite() || self.rho.abs() >= 1.0 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "rho must lie strictly inside (-1, 1), got {}",
                self.rho
            )));
        }
        Ok(())
    }
}
