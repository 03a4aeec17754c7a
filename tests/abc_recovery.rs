//! End-to-end parameter recovery at the synthetic-data study settings.

use svolfit::calibration::{
    RejectionSampler, RunStatus, StatisticScale, posterior_mean, reference_diagnostics,
    scaled_distance, synthesize_observed,
};
use svolfit::core::{ModelParameters, SimulationConfig};
use svolfit::math::rng::stream_rng;

const TRUE_KAPPA: f64 = 1.2;
const TRUE_THETA: f64 = 0.05;

/// Full study run: 10000 draws, tolerance 0.8, 20 replications, priors
/// `kappa in [0.8, 1.5]`, `theta in [0.03, 0.07]`.
///
/// A single observed path can realize an average variance no candidate in
/// the prior box reproduces, in which case the tolerance accepts nothing
/// and nothing about recovery can be concluded. The pre-run diagnostic
/// exists to detect exactly that, so the test scans observed seeds until
/// the diagnostic confirms the target is reachable, then asserts recovery.
#[test]
fn study_settings_recover_the_true_parameters() {
    let config = SimulationConfig::default();
    let true_params = ModelParameters::new(TRUE_KAPPA, TRUE_THETA);
    let scale = StatisticScale::default();
    let epsilon = 0.8;
    let n_sim = 20;

    for observed_seed in 0..64 {
        let mut rng = stream_rng(20_240_601, observed_seed);
        let observed = synthesize_observed(true_params, &config, &mut rng).unwrap();
        let diag =
            reference_diagnostics(&observed, true_params, &config, n_sim, &scale, &mut rng)
                .unwrap();
        if diag.distance >= epsilon {
            continue;
        }

        let report = RejectionSampler::new(10_000, epsilon, n_sim)
            .run(&observed, &config, &mut rng)
            .unwrap();

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.draws_completed, 10_000);
        assert!(
            !report.is_empty(),
            "viable target but empty posterior (min distance {})",
            report.min_distance
        );

        let mean = posterior_mean(&report.posterior).unwrap();
        assert!(
            (mean.kappa - TRUE_KAPPA).abs() <= 0.3,
            "posterior kappa mean {} too far from {TRUE_KAPPA}",
            mean.kappa
        );
        assert!(
            (mean.theta - TRUE_THETA).abs() <= 0.02,
            "posterior theta mean {} too far from {TRUE_THETA}",
            mean.theta
        );
        return;
    }
    panic!("no observed path produced a reachable target in 64 seeds");
}

#[test]
fn observed_statistics_have_zero_distance_to_themselves() {
    let config = SimulationConfig::default();
    let mut rng = stream_rng(7, 0);
    let observed =
        synthesize_observed(ModelParameters::new(TRUE_KAPPA, TRUE_THETA), &config, &mut rng)
            .unwrap();
    assert_eq!(
        scaled_distance(&observed, &observed, &StatisticScale::default()),
        0.0
    );
}

#[test]
fn unreachable_tolerance_reports_an_empty_posterior_without_error() {
    let config = SimulationConfig::default();
    let mut rng = stream_rng(11, 0);
    let observed =
        synthesize_observed(ModelParameters::new(TRUE_KAPPA, TRUE_THETA), &config, &mut rng)
            .unwrap();

    let report = RejectionSampler::new(100, 1e-9, 1)
        .run(&observed, &config, &mut rng)
        .unwrap();

    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.is_empty());
    assert_eq!(report.accepted, 0);
    assert!(report.min_distance.is_finite());
    assert!(report.acceptance_rate() == 0.0);
}
