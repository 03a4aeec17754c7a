//! Replication averaging of summary statistics.
//!
//! A single path gives a noisy statistic vector; averaging `n_sim`
//! independent replications under the same candidate sharpens the signal
//! the acceptance decision is based on.

use rand::Rng;

use crate::core::{CalibrationError, ModelParameters, SimulationConfig};
use crate::mc::simulate_heston_path;
use crate::models::Heston;
use crate::stats::SummaryStatistics;

/// Runs `n_sim` simulate-and-extract evaluations of one candidate, consuming
/// successive slices of the same `rng` stream, and returns the elementwise
/// mean of the statistic vectors.
///
/// With `n_sim == 1` the result is bit-identical to a single direct
/// evaluation on the same stream. Any replication failing with
/// [`CalibrationError::FailedSimulation`] fails the whole candidate.
pub fn replicate_statistics<R: Rng + ?Sized>(
    params: ModelParameters,
    config: &SimulationConfig,
    n_sim: usize,
    rng: &mut R,
) -> Result<SummaryStatistics, CalibrationError> {
    if n_sim == 0 {
        return Err(CalibrationError::InvalidConfiguration(
            "replication count must be at least 1".to_string(),
        ));
    }
    config.validate()?;

    let model = Heston::from_calibration(config, params);
    let mut replicas = Vec::with_capacity(n_sim);
    for _ in 0..n_sim {
        let path = simulate_heston_path(&model, config.s0, config.horizon, config.steps, rng)?;
        replicas.push(SummaryStatistics::from_path(&path)?);
    }

    SummaryStatistics::mean_of(&replicas).ok_or_else(|| {
        CalibrationError::FailedSimulation("replication set produced no statistics".to_string())
    })
}
