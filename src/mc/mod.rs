//! Discretized path simulation for the calibration pipeline.
//!
//! One call produces one path under an explicit RNG handle, so the caller
//! owns reproducibility and can hand independent substreams to parallel
//! workers. Paths are transient: simulate, extract statistics, drop.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::CalibrationError;
use crate::models::{Heston, VARIANCE_FLOOR};

/// One simulated price/variance path on the Euler grid.
///
/// Both sequences have the same length; `variance[i] >= VARIANCE_FLOOR`
/// holds at every index. Owned by the simulation call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct HestonPath {
    pub spot: Vec<f64>,
    pub variance: Vec<f64>,
}

impl HestonPath {
    /// Number of grid points (initial point included).
    pub fn len(&self) -> usize {
        self.spot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spot.is_empty()
    }
}

/// Simulates one Heston path of `steps` points over `horizon` years.
///
/// Per step the generator is consumed exactly twice (variance draw first,
/// then the spot draw), which fixes the stream layout that the replication
/// averager and its `n_sim = 1` identity rely on. A non-finite spot or
/// variance aborts the call with a [`CalibrationError::FailedSimulation`];
/// the variance floor itself is applied silently.
pub fn simulate_heston_path<R: Rng + ?Sized>(
    model: &Heston,
    s0: f64,
    horizon: f64,
    steps: usize,
    rng: &mut R,
) -> Result<HestonPath, CalibrationError> {
    if steps < 2 {
        return Err(CalibrationError::InvalidConfiguration(format!(
            "steps must be at least 2, got {steps}"
        )));
    }
    if !horizon.is_finite() || horizon <= 0.0 {
        return Err(CalibrationError::InvalidConfiguration(format!(
            "horizon must be finite and positive, got {horizon}"
        )));
    }
    if !model.validate() {
        return Err(CalibrationError::InvalidConfiguration(format!(
            "model parameters out of range: kappa={}, theta={}, xi={}, rho={}, v0={}",
            model.kappa, model.theta, model.xi, model.rho, model.v0
        )));
    }

    let dt = horizon / steps as f64;
    let mut spot = vec![0.0_f64; steps];
    let mut variance = vec![0.0_f64; steps];
    spot[0] = s0;
    variance[0] = model.v0.max(VARIANCE_FLOOR);

    for t in 1..steps {
        let z1: f64 = StandardNormal.sample(rng);
        let z2: f64 = StandardNormal.sample(rng);
        let (s_next, v_next) = model.step_euler(spot[t - 1], variance[t - 1], dt, z1, z2);

        if !s_next.is_finite() || !v_next.is_finite() {
            return Err(CalibrationError::FailedSimulation(format!(
                "non-finite path value at step {t} (spot={s_next}, variance={v_next})"
            )));
        }

        spot[t] = s_next;
        variance[t] = v_next;
    }

    Ok(HestonPath { spot, variance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn study_model() -> Heston {
        Heston {
            mu: 0.0,
            kappa: 1.2,
            theta: 0.05,
            xi: 0.3,
            rho: -0.7,
            v0: 0.04,
        }
    }

    #[test]
    fn daily_grid_path_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let path = simulate_heston_path(&study_model(), 100.0, 1.0, 252, &mut rng).unwrap();

        assert_eq!(path.len(), 252);
        assert_eq!(path.spot[0], 100.0);
        assert_eq!(path.variance[0], 0.04);
        assert!(path.variance.iter().all(|&v| v >= VARIANCE_FLOOR));
    }

    #[test]
    fn variance_floor_holds_across_parameter_sweep() {
        let mut rng = StdRng::seed_from_u64(7);
        for kappa in [0.5, 1.2, 3.0] {
            for theta in [0.01, 0.05, 0.2] {
                for xi in [0.1, 0.6, 1.2] {
                    let model = Heston {
                        kappa,
                        theta,
                        xi,
                        ..study_model()
                    };
                    let path =
                        simulate_heston_path(&model, 100.0, 1.0, 128, &mut rng).unwrap();
                    assert!(
                        path.variance.iter().all(|&v| v >= VARIANCE_FLOOR),
                        "floor violated for kappa={kappa} theta={theta} xi={xi}"
                    );
                }
            }
        }
    }

    #[test]
    fn identical_seeds_reproduce_the_path() {
        let model = study_model();
        let mut a = StdRng::seed_from_u64(123);
        let mut b = StdRng::seed_from_u64(123);
        let pa = simulate_heston_path(&model, 100.0, 1.0, 64, &mut a).unwrap();
        let pb = simulate_heston_path(&model, 100.0, 1.0, 64, &mut b).unwrap();
        assert_eq!(pa, pb);
    }

    #[test]
    fn degenerate_grid_is_rejected_before_any_draw() {
        let model = study_model();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            simulate_heston_path(&model, 100.0, 1.0, 1, &mut rng),
            Err(CalibrationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            simulate_heston_path(&model, 100.0, 0.0, 252, &mut rng),
            Err(CalibrationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            simulate_heston_path(&model, 100.0, f64::NAN, 252, &mut rng),
            Err(CalibrationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let negative_kappa = Heston {
            kappa: -0.5,
            ..study_model()
        };
        assert!(matches!(
            simulate_heston_path(&negative_kappa, 100.0, 1.0, 64, &mut rng),
            Err(CalibrationError::InvalidConfiguration(_))
        ));
        let degenerate_rho = Heston {
            rho: 1.0,
            ..study_model()
        };
        assert!(matches!(
            simulate_heston_path(&degenerate_rho, 100.0, 1.0, 64, &mut rng),
            Err(CalibrationError::InvalidConfiguration(_))
        ));
    }
}
