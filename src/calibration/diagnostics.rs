//! Pre-run diagnostics and posterior summaries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calibration::distance::{StatisticScale, scaled_distance};
use crate::calibration::replication::replicate_statistics;
use crate::core::{CalibrationError, ModelParameters, SimulationConfig};
use crate::mc::simulate_heston_path;
use crate::models::Heston;
use crate::stats::SummaryStatistics;

/// Synthesizes observed statistics from one path under known parameters.
///
/// Stands in for a market-data pipeline: the calibration target is produced
/// by the same simulator the sampler uses, which makes recovery studies
/// self-contained.
pub fn synthesize_observed<R: Rng + ?Sized>(
    params: ModelParameters,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SummaryStatistics, CalibrationError> {
    config.validate()?;
    let model = Heston::from_calibration(config, params);
    let path = simulate_heston_path(&model, config.s0, config.horizon, config.steps, rng)?;
    SummaryStatistics::from_path(&path)
}

/// Observed statistics next to a replicated reference vector under the same
/// parameters, with their scaled distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDiagnostics {
    pub observed: SummaryStatistics,
    pub reference: SummaryStatistics,
    pub distance: f64,
}

/// Scores a replicated reference vector against `observed`.
///
/// Run before sampling: the distance between observed statistics and a
/// replication under the true parameters is the noise floor of the metric,
/// and an `epsilon` below it cannot accept anything.
pub fn reference_diagnostics<R: Rng + ?Sized>(
    observed: &SummaryStatistics,
    params: ModelParameters,
    config: &SimulationConfig,
    n_sim: usize,
    scale: &StatisticScale,
    rng: &mut R,
) -> Result<ReferenceDiagnostics, CalibrationError> {
    scale.validate()?;
    let reference = replicate_statistics(params, config, n_sim, rng)?;
    Ok(ReferenceDiagnostics {
        observed: *observed,
        reference,
        distance: scaled_distance(observed, &reference, scale),
    })
}

/// Elementwise mean of the accepted pairs; `None` on an empty posterior.
pub fn posterior_mean(posterior: &[ModelParameters]) -> Option<ModelParameters> {
    if posterior.is_empty() {
        return None;
    }
    let n = posterior.len() as f64;
    let (kappa_sum, theta_sum) = posterior
        .iter()
        .fold((0.0, 0.0), |(k, t), p| (k + p.kappa, t + p.theta));
    Some(ModelParameters::new(kappa_sum / n, theta_sum / n))
}

/// Elementwise sample standard deviation of the accepted pairs; `None` with
/// fewer than two acceptances.
pub fn posterior_std(posterior: &[ModelParameters]) -> Option<ModelParameters> {
    if posterior.len() < 2 {
        return None;
    }
    let kappas: Vec<f64> = posterior.iter().map(|p| p.kappa).collect();
    let thetas: Vec<f64> = posterior.iter().map(|p| p.theta).collect();
    Some(ModelParameters::new(
        crate::math::sample_variance(&kappas).sqrt(),
        crate::math::sample_variance(&thetas).sqrt(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn observed_statistics_are_reproducible() {
        let config = SimulationConfig::default();
        let params = ModelParameters::new(1.2, 0.05);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            synthesize_observed(params, &config, &mut a).unwrap(),
            synthesize_observed(params, &config, &mut b).unwrap()
        );
    }

    #[test]
    fn reference_distance_is_finite_and_positive() {
        let config = SimulationConfig::default();
        let params = ModelParameters::new(1.2, 0.05);
        let scale = StatisticScale::default();
        let mut rng = StdRng::seed_from_u64(42);

        let observed = synthesize_observed(params, &config, &mut rng).unwrap();
        let diag =
            reference_diagnostics(&observed, params, &config, 10, &scale, &mut rng).unwrap();

        assert!(diag.distance.is_finite());
        assert!(diag.distance > 0.0);
        assert_eq!(diag.observed, observed);
    }

    #[test]
    fn posterior_mean_of_two_pairs() {
        let posterior = vec![
            ModelParameters::new(1.0, 0.04),
            ModelParameters::new(1.4, 0.06),
        ];
        let mean = posterior_mean(&posterior).unwrap();
        assert_relative_eq!(mean.kappa, 1.2, epsilon = 1e-15);
        assert_relative_eq!(mean.theta, 0.05, epsilon = 1e-15);
        assert!(posterior_mean(&[]).is_none());
    }

    #[test]
    fn posterior_std_needs_two_pairs() {
        assert!(posterior_std(&[ModelParameters::new(1.0, 0.04)]).is_none());
        let posterior = vec![
            ModelParameters::new(1.0, 0.04),
            ModelParameters::new(1.4, 0.06),
        ];
        let std = posterior_std(&posterior).unwrap();
        // Sample std of two points is |a - b| / sqrt(2).
        assert_relative_eq!(std.kappa, 0.4 / 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(std.theta, 0.02 / 2.0_f64.sqrt(), epsilon = 1e-12);
    }
}
