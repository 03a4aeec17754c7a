//! European option pricing: Black-Scholes closed forms and a terminal-value
//! Monte Carlo estimator.
//!
//! The closed forms serve as the reference the Monte Carlo estimator is
//! checked against; the estimator itself is the building block the
//! finite-difference Greeks engine reprices under bumped inputs.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::math::normal_cdf;
#[cfg(feature = "parallel")]
use crate::math::rng::stream_rng;
use crate::models::Gbm;
use crate::pricing::OptionType;

/// First-order sensitivities of a European option under BSM assumptions.
///
/// `theta` is the per-year calendar decay `dV/dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Black-Scholes-Merton price with zero dividend yield.
///
/// Degenerate inputs (`t <= 0` or `sigma <= 0`) collapse to intrinsic value.
///
/// # Examples
/// ```
/// use svolfit::core::OptionType;
/// use svolfit::pricing::european::black_scholes_price;
///
/// let call = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
/// let put = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.20, 1.0);
/// assert!(call > put);
/// ```
pub fn black_scholes_price(
    option_type: OptionType,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
) -> f64 {
    if t <= 0.0 || sigma <= 0.0 {
        return (option_type.sign() * (s - k)).max(0.0);
    }

    let vt = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vt;
    let d2 = d1 - vt;
    let df = (-r * t).exp();

    match option_type {
        OptionType::Call => s * normal_cdf(d1) - k * df * normal_cdf(d2),
        OptionType::Put => k * df * normal_cdf(-d2) - s * normal_cdf(-d1),
    }
}

/// Closed-form Black-Scholes Greeks with zero dividend yield.
///
/// Returns all-zero sensitivities on degenerate inputs.
pub fn black_scholes_greeks(
    option_type: OptionType,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
) -> Greeks {
    if t <= 0.0 || sigma <= 0.0 {
        return Greeks {
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        };
    }

    let vt = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vt;
    let d2 = d1 - vt;
    let df = (-r * t).exp();
    let pdf_d1 = crate::math::normal_pdf(d1);

    let (delta, theta_rate_term, rho) = match option_type {
        OptionType::Call => (
            normal_cdf(d1),
            -r * k * df * normal_cdf(d2),
            k * t * df * normal_cdf(d2),
        ),
        OptionType::Put => (
            normal_cdf(d1) - 1.0,
            r * k * df * normal_cdf(-d2),
            -k * t * df * normal_cdf(-d2),
        ),
    };

    Greeks {
        delta,
        gamma: pdf_d1 / (s * vt),
        vega: s * pdf_d1 * t.sqrt(),
        theta: -s * pdf_d1 * sigma / (2.0 * t.sqrt()) + theta_rate_term,
        rho,
    }
}

/// Discounted mean payoff and its standard error from terminal-value GBM
/// sampling, a single exact [`Gbm`] transition over the full horizon per
/// path.
///
/// With `antithetic` each drawn normal is reused with flipped sign and the
/// pair average forms one sample, so `n_paths` is rounded up to an even
/// number of evaluated paths.
///
/// # Panics
/// Panics when `n_paths == 0`.
#[allow(clippy::too_many_arguments)]
pub fn mc_european_price<R: Rng + ?Sized>(
    option_type: OptionType,
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_paths: usize,
    antithetic: bool,
    rng: &mut R,
) -> (f64, f64) {
    assert!(n_paths > 0, "n_paths must be positive");

    let t = t.max(0.0);
    let gbm = Gbm { mu: r, sigma };
    let df = (-r * t).exp();

    let payoff = |z: f64| -> f64 {
        let terminal = gbm.step_exact(s0, t, z);
        (option_type.sign() * (terminal - k)).max(0.0)
    };

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let n = if antithetic {
        let pairs = n_paths.div_ceil(2);
        for _ in 0..pairs {
            let z: f64 = StandardNormal.sample(rng);
            let sample = 0.5 * (payoff(z) + payoff(-z));
            sum += sample;
            sum_sq += sample * sample;
        }
        pairs
    } else {
        for _ in 0..n_paths {
            let z: f64 = StandardNormal.sample(rng);
            let sample = payoff(z);
            sum += sample;
            sum_sq += sample * sample;
        }
        n_paths
    };

    finalize_estimate(sum, sum_sq, n, df)
}

/// Parallel variant of [`mc_european_price`] without antithetic pairing.
///
/// Paths are split into fixed-size chunks, each chunk running on its own
/// generator derived from `seed` via the stream-seed scheme, so the result
/// is reproducible regardless of how rayon schedules the chunks.
#[cfg(feature = "parallel")]
#[allow(clippy::too_many_arguments)]
pub fn mc_european_price_parallel(
    option_type: OptionType,
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_paths: usize,
    seed: u64,
) -> (f64, f64) {
    assert!(n_paths > 0, "n_paths must be positive");

    const CHUNK: usize = 16_384;

    let t = t.max(0.0);
    let gbm = Gbm { mu: r, sigma };
    let df = (-r * t).exp();

    let n_chunks = n_paths.div_ceil(CHUNK);
    let (sum, sum_sq) = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = stream_rng(seed, chunk);
            let count = CHUNK.min(n_paths - chunk * CHUNK);
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            for _ in 0..count {
                let z: f64 = StandardNormal.sample(&mut rng);
                let terminal = gbm.step_exact(s0, t, z);
                let sample = (option_type.sign() * (terminal - k)).max(0.0);
                sum += sample;
                sum_sq += sample * sample;
            }
            (sum, sum_sq)
        })
        .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));

    finalize_estimate(sum, sum_sq, n_paths, df)
}

pub(crate) fn finalize_estimate(sum: f64, sum_sq: f64, n: usize, df: f64) -> (f64, f64) {
    let nf = n as f64;
    let mean = sum / nf;
    let var = if n > 1 {
        ((sum_sq - sum * sum / nf) / (nf - 1.0)).max(0.0)
    } else {
        0.0
    };
    (df * mean, df * (var / nf).sqrt())
}
