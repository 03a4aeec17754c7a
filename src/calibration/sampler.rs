//! ABC rejection sampler for the two-parameter calibration.
//!
//! Likelihood-free scheme: candidates drawn from uniform priors are scored
//! by the scaled distance between their replicated summary statistics and
//! the observed vector, and kept when the distance falls below `epsilon`.
//! Draws are independent, there is no adaptivity, and the only early exit
//! is cooperative cancellation between draws.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calibration::distance::{StatisticScale, scaled_distance};
use crate::calibration::priors::ParameterPriors;
use crate::calibration::replication::replicate_statistics;
use crate::core::{CalibrationError, ModelParameters, SimulationConfig};
use crate::stats::SummaryStatistics;

/// How a sampling run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Every requested draw was evaluated.
    Completed,
    /// The cancellation flag was observed between draws.
    Cancelled,
}

/// Outcome of one rejection-sampling run.
///
/// An empty posterior is a legitimate outcome (the tolerance was too tight
/// for the replication noise), reported here rather than raised as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcRunReport {
    /// Accepted parameter pairs in acceptance order.
    pub posterior: Vec<ModelParameters>,
    pub status: RunStatus,
    pub draws_requested: usize,
    pub draws_completed: usize,
    pub accepted: usize,
    /// Draws discarded after a failed simulation.
    pub discarded: usize,
    /// Smallest distance seen over completed draws; infinite when none
    /// completed. The natural starting point for retuning `epsilon` after
    /// an empty run.
    pub min_distance: f64,
}

impl AbcRunReport {
    /// Accepted draws as a fraction of completed draws; zero when nothing
    /// completed.
    pub fn acceptance_rate(&self) -> f64 {
        if self.draws_completed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.draws_completed as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posterior.is_empty()
    }
}

/// Rejection sampler over uniform priors, builder style.
///
/// ```
/// use svolfit::calibration::RejectionSampler;
///
/// let sampler = RejectionSampler::new(500, 0.8, 4);
/// assert_eq!(sampler.n_draws(), 500);
/// ```
#[derive(Debug, Clone)]
pub struct RejectionSampler {
    n_draws: usize,
    epsilon: f64,
    n_sim: usize,
    priors: ParameterPriors,
    scale: StatisticScale,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for RejectionSampler {
    /// The synthetic-data study settings: 10000 draws, tolerance 0.8,
    /// 20 replications per candidate.
    fn default() -> Self {
        Self::new(10_000, 0.8, 20)
    }
}

impl RejectionSampler {
    pub fn new(n_draws: usize, epsilon: f64, n_sim: usize) -> Self {
        Self {
            n_draws,
            epsilon,
            n_sim,
            priors: ParameterPriors::default(),
            scale: StatisticScale::default(),
            cancel: None,
        }
    }

    pub fn with_priors(mut self, priors: ParameterPriors) -> Self {
        self.priors = priors;
        self
    }

    pub fn with_scale(mut self, scale: StatisticScale) -> Self {
        self.scale = scale;
        self
    }

    /// Installs a cooperative cancellation flag, checked between draws.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn n_draws(&self) -> usize {
        self.n_draws
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn n_sim(&self) -> usize {
        self.n_sim
    }

    fn validate(&self, config: &SimulationConfig) -> Result<(), CalibrationError> {
        config.validate()?;
        self.priors.validate()?;
        self.scale.validate()?;
        if self.n_draws == 0 {
            return Err(CalibrationError::InvalidConfiguration(
                "draw count must be at least 1".to_string(),
            ));
        }
        if self.n_sim == 0 {
            return Err(CalibrationError::InvalidConfiguration(
                "replication count must be at least 1".to_string(),
            ));
        }
        // Rejects NaN as well; +inf is allowed and accepts everything.
        if !(self.epsilon > 0.0) {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Runs the rejection loop against `observed` on the given RNG stream.
    ///
    /// All static inputs are validated before the first simulation. Draws
    /// that fail with a simulation error are logged, counted as discarded
    /// and skipped; configuration errors abort the run.
    pub fn run<R: Rng + ?Sized>(
        &self,
        observed: &SummaryStatistics,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<AbcRunReport, CalibrationError> {
        self.validate(config)?;

        info!(
            "starting rejection run: {} draws, epsilon {}, {} replications",
            self.n_draws, self.epsilon, self.n_sim
        );

        let mut posterior: Vec<ModelParameters> = Vec::new();
        let mut discarded = 0usize;
        let mut draws_completed = 0usize;
        let mut min_distance = f64::INFINITY;
        let mut status = RunStatus::Completed;

        for draw in 0..self.n_draws {
            if self.is_cancelled() {
                status = RunStatus::Cancelled;
                info!("cancellation observed at draw {draw}, stopping run");
                break;
            }

            let candidate = self.priors.sample(rng);
            match replicate_statistics(candidate, config, self.n_sim, rng) {
                Ok(simulated) => {
                    let d = scaled_distance(&simulated, observed, &self.scale);
                    if d < min_distance {
                        min_distance = d;
                    }
                    if d < self.epsilon {
                        debug!(
                            "accepted draw {}: kappa {:.4}, theta {:.4}, distance {:.4}",
                            draw, candidate.kappa, candidate.theta, d
                        );
                        posterior.push(candidate);
                    }
                }
                Err(CalibrationError::FailedSimulation(msg)) => {
                    warn!("discarding draw {draw} after failed simulation: {msg}");
                    discarded += 1;
                }
                Err(err) => return Err(err),
            }
            draws_completed += 1;
        }

        if posterior.is_empty() {
            warn!(
                "empty posterior: min distance {} with epsilon {}, consider a larger epsilon",
                min_distance, self.epsilon
            );
        }

        let report = AbcRunReport {
            accepted: posterior.len(),
            posterior,
            status,
            draws_requested: self.n_draws,
            draws_completed,
            discarded,
            min_distance,
        };
        info!(
            "rejection run finished: {} accepted of {} completed (rate {:.4})",
            report.accepted,
            report.draws_completed,
            report.acceptance_rate()
        );
        Ok(report)
    }
}
