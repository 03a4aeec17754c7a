//! Stochastic process models driving the simulation and pricing engines.
//!
//! The calibration pipeline is hardwired to the two-factor Heston dynamics;
//! GBM backs the European and Asian Monte Carlo pricers.

use crate::core::{ModelParameters, SimulationConfig};

/// Numerical floor applied to the variance factor at every Euler step.
///
/// Clamping is the documented stability mechanism for the explicit scheme,
/// applied silently; it is never an error condition.
pub const VARIANCE_FLOOR: f64 = 1e-6;

/// Geometric Brownian motion under a flat drift.
#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    /// Exact lognormal transition over `dt` given a standard normal draw.
    pub fn step_exact(&self, s: f64, dt: f64, z: f64) -> f64 {
        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * dt;
        s * (drift + self.sigma * dt.sqrt() * z).exp()
    }
}

/// Heston stochastic-volatility dynamics.
///
/// `kappa` and `theta` are the free calibration parameters; the remaining
/// fields come from the shared [`SimulationConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Heston {
    pub mu: f64,
    pub kappa: f64,
    pub theta: f64,
    pub xi: f64,
    pub rho: f64,
    pub v0: f64,
}

impl Heston {
    /// Assembles the full dynamics from a candidate parameter pair and the
    /// fixed hyperparameters.
    pub fn from_calibration(config: &SimulationConfig, params: ModelParameters) -> Self {
        Self {
            mu: config.mu,
            kappa: params.kappa,
            theta: params.theta,
            xi: config.xi,
            rho: config.rho,
            v0: config.v0,
        }
    }

    pub fn validate(&self) -> bool {
        self.kappa > 0.0
            && self.theta > 0.0
            && self.xi >= 0.0
            && self.v0 >= 0.0
            && self.rho > -1.0
            && self.rho < 1.0
    }

    /// One explicit Euler step of the correlated pair `(spot, variance)`.
    ///
    /// The variance entering both factors is floored first, and the updated
    /// variance is floored again, so the scheme never sees a negative value
    /// under the square root.
    pub fn step_euler(&self, s: f64, v: f64, dt: f64, z1: f64, z2: f64) -> (f64, f64) {
        let sqrt_dt = dt.sqrt();
        let dw_v = sqrt_dt * z1;
        let dw_s = self.rho * z1 * sqrt_dt + (1.0 - self.rho * self.rho).sqrt() * z2 * sqrt_dt;

        let v_prev = v.max(VARIANCE_FLOOR);
        let v_next = (v_prev + self.kappa * (self.theta - v_prev) * dt
            + self.xi * v_prev.sqrt() * dw_v)
            .max(VARIANCE_FLOOR);
        let s_next = s + self.mu * s * dt + v_prev.sqrt() * s * dw_s;

        (s_next, v_next)
    }
}
