//! Arithmetic-average Asian options, priced by plain Monte Carlo and by
//! Sobol quasi-Monte Carlo side by side.
//!
//! The spot is observed at `n_steps` equally spaced times and the payoff is
//! struck on the arithmetic average. The QMC estimator drives each path
//! from one Sobol point of dimension `n_steps` and estimates its error from
//! block means, since the usual iid standard error does not apply to a
//! low-discrepancy sequence.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::math::sobol::{SOBOL_MAX_DIMENSIONS, SobolSequence};
use crate::math::{normal_inv_cdf, sample_variance};
use crate::models::Gbm;
use crate::pricing::OptionType;
use crate::pricing::european::finalize_estimate;

/// Average of the spot at the observation times, driven by one normal
/// vector through consecutive exact [`Gbm`] transitions.
fn path_average(gbm: Gbm, s0: f64, dt: f64, normals: &[f64]) -> f64 {
    let mut s = s0;
    let mut sum = 0.0;
    for &z in normals {
        s = gbm.step_exact(s, dt, z);
        sum += s;
    }
    sum / normals.len() as f64
}

/// Plain Monte Carlo price and standard error of an arithmetic Asian
/// option.
///
/// # Panics
/// Panics when `n_steps == 0` or `n_paths == 0`.
#[allow(clippy::too_many_arguments)]
pub fn mc_asian_price<R: Rng + ?Sized>(
    option_type: OptionType,
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_steps: usize,
    n_paths: usize,
    rng: &mut R,
) -> (f64, f64) {
    assert!(n_steps > 0, "n_steps must be positive");
    assert!(n_paths > 0, "n_paths must be positive");

    let dt = t / n_steps as f64;
    let gbm = Gbm { mu: r, sigma };
    let df = (-r * t).exp();

    let mut normals = vec![0.0_f64; n_steps];
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for _ in 0..n_paths {
        for slot in normals.iter_mut() {
            *slot = StandardNormal.sample(rng);
        }
        let avg = path_average(gbm, s0, dt, &normals);
        let payoff = (option_type.sign() * (avg - k)).max(0.0);
        sum += payoff;
        sum_sq += payoff * payoff;
    }

    finalize_estimate(sum, sum_sq, n_paths, df)
}

/// Sobol QMC price of the same option, error estimated from `n_blocks`
/// block means.
///
/// Uses `n_blocks * (n_paths / n_blocks)` points, so a remainder of
/// `n_paths` not divisible by the block count is dropped.
///
/// # Panics
/// Panics when `n_steps` is zero or above [`SOBOL_MAX_DIMENSIONS`], when
/// `n_blocks < 2`, or when fewer than one point per block remains.
#[allow(clippy::too_many_arguments)]
pub fn qmc_asian_price(
    option_type: OptionType,
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_steps: usize,
    n_paths: usize,
    n_blocks: usize,
    seed: u64,
) -> (f64, f64) {
    assert!(
        n_steps > 0 && n_steps <= SOBOL_MAX_DIMENSIONS,
        "n_steps must lie in 1..={SOBOL_MAX_DIMENSIONS}"
    );
    assert!(n_blocks >= 2, "block error estimate needs at least 2 blocks");
    let block_size = n_paths / n_blocks;
    assert!(block_size > 0, "need at least one point per block");

    let dt = t / n_steps as f64;
    let gbm = Gbm { mu: r, sigma };
    let df = (-r * t).exp();

    let mut sobol = SobolSequence::new(n_steps, seed);
    let mut point = vec![0.0_f64; n_steps];
    let mut normals = vec![0.0_f64; n_steps];

    let mut block_means = Vec::with_capacity(n_blocks);
    for _ in 0..n_blocks {
        let mut block_sum = 0.0;
        for _ in 0..block_size {
            sobol.next_into(&mut point);
            for (slot, u) in normals.iter_mut().zip(&point) {
                *slot = normal_inv_cdf(*u);
            }
            let avg = path_average(gbm, s0, dt, &normals);
            block_sum += df * (option_type.sign() * (avg - k)).max(0.0);
        }
        block_means.push(block_sum / block_size as f64);
    }

    let price = block_means.iter().sum::<f64>() / n_blocks as f64;
    let stderr = (sample_variance(&block_means) / n_blocks as f64).sqrt();
    (price, stderr)
}

/// One row of the MC-versus-QMC comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceRow {
    pub n_paths: usize,
    pub mc_price: f64,
    pub mc_stderr: f64,
    pub qmc_price: f64,
    pub qmc_stderr: f64,
}

/// Prices the option at each sample size with both estimators, on
/// independent streams derived from `base_seed`.
///
/// Produces the raw table behind the classic convergence plot; rendering is
/// left to the caller.
#[allow(clippy::too_many_arguments)]
pub fn convergence_study(
    option_type: OptionType,
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_steps: usize,
    sample_sizes: &[usize],
    n_blocks: usize,
    base_seed: u64,
) -> Vec<ConvergenceRow> {
    sample_sizes
        .iter()
        .enumerate()
        .map(|(i, &n_paths)| {
            let mut rng = crate::math::rng::stream_rng(base_seed, i);
            let (mc_price, mc_stderr) =
                mc_asian_price(option_type, s0, k, r, sigma, t, n_steps, n_paths, &mut rng);
            let (qmc_price, qmc_stderr) = qmc_asian_price(
                option_type,
                s0,
                k,
                r,
                sigma,
                t,
                n_steps,
                n_paths,
                n_blocks,
                crate::math::rng::stream_seed(base_seed, i),
            );
            ConvergenceRow {
                n_paths,
                mc_price,
                mc_stderr,
                qmc_price,
                qmc_stderr,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::pricing::european::black_scholes_price;

    const STUDY: (f64, f64, f64, f64, f64) = (100.0, 100.0, 0.05, 0.2, 1.0);

    #[test]
    fn single_observation_reduces_to_european() {
        let (s0, k, r, sigma, t) = STUDY;
        let bs = black_scholes_price(OptionType::Call, s0, k, r, sigma, t);

        let mut rng = StdRng::seed_from_u64(21);
        let (mc, mc_err) =
            mc_asian_price(OptionType::Call, s0, k, r, sigma, t, 1, 200_000, &mut rng);
        assert!((mc - bs).abs() <= 3.0 * mc_err + 1e-2, "mc={mc}, bs={bs}");

        let (qmc, qmc_err) =
            qmc_asian_price(OptionType::Call, s0, k, r, sigma, t, 1, 8_192, 16, 21);
        assert!(
            (qmc - bs).abs() <= 5.0 * qmc_err + 5e-2,
            "qmc={qmc}, bs={bs}, err={qmc_err}"
        );
    }

    #[test]
    fn mc_and_qmc_agree_within_joint_error() {
        let (s0, k, r, sigma, t) = STUDY;
        let mut rng = StdRng::seed_from_u64(33);
        let (mc, mc_err) =
            mc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 100_000, &mut rng);
        let (qmc, qmc_err) =
            qmc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 8_192, 16, 33);
        assert!(
            (mc - qmc).abs() <= 3.0 * (mc_err + qmc_err) + 5e-2,
            "mc={mc}, qmc={qmc}"
        );
    }

    #[test]
    fn qmc_block_error_beats_plain_mc_at_equal_budget() {
        let (s0, k, r, sigma, t) = STUDY;
        let mut rng = StdRng::seed_from_u64(2);
        let (_, mc_err) = mc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 8_192, &mut rng);
        let (_, qmc_err) = qmc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 8_192, 16, 2);
        assert!(qmc_err < mc_err, "qmc_err={qmc_err}, mc_err={mc_err}");
    }

    #[test]
    fn qmc_is_deterministic_per_seed() {
        let (s0, k, r, sigma, t) = STUDY;
        let a = qmc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 2_048, 8, 77);
        let b = qmc_asian_price(OptionType::Call, s0, k, r, sigma, t, 4, 2_048, 8, 77);
        assert_eq!(a, b);
    }

    #[test]
    fn deeper_strike_lowers_the_call_price() {
        let (s0, _, r, sigma, t) = STUDY;
        let atm = qmc_asian_price(OptionType::Call, s0, 100.0, r, sigma, t, 4, 4_096, 8, 5).0;
        let otm = qmc_asian_price(OptionType::Call, s0, 120.0, r, sigma, t, 4, 4_096, 8, 5).0;
        assert!(atm > otm);
    }

    #[test]
    fn convergence_table_has_one_row_per_size() {
        let (s0, k, r, sigma, t) = STUDY;
        let sizes = [64, 128, 256];
        let rows = convergence_study(OptionType::Call, s0, k, r, sigma, t, 4, &sizes, 8, 1);
        assert_eq!(rows.len(), 3);
        for (row, &n) in rows.iter().zip(&sizes) {
            assert_eq!(row.n_paths, n);
            assert!(row.mc_price > 0.0 && row.qmc_price > 0.0);
            assert!(row.mc_stderr > 0.0 && row.qmc_stderr > 0.0);
        }
    }
}
