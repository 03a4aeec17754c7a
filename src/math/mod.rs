//! Numerical helpers shared by the simulation, statistics, and pricing modules.
//!
//! Distribution functions delegate to `statrs`; the moment and correlation
//! helpers are the small set the summary-statistic extractor needs, with
//! degenerate inputs mapped to zero rather than NaN so callers can treat
//! short series as "no signal" instead of an error.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

pub mod rng;
pub mod sobol;

/// Standard normal density.
pub fn normal_pdf(x: f64) -> f64 {
    Normal::standard().pdf(x)
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Inverse of the standard normal CDF.
///
/// `p` must lie in the open unit interval; the Sobol-to-normal transform
/// guarantees this for quasi-random inputs.
pub fn normal_inv_cdf(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Unbiased sample variance (divisor `n - 1`); zero with fewer than two points.
pub fn sample_variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (xs.len() - 1) as f64
}

/// Pearson correlation of two equal-length series.
///
/// Returns zero when the series are shorter than two points, mismatched in
/// length, or either one is constant.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }

    let ma = mean(a);
    let mb = mean(b);
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - ma;
        let dy = y - mb;
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }

    let denom = (va * vb).sqrt();
    if denom <= 0.0 {
        return 0.0;
    }
    cov / denom
}

/// Lag-1 autocorrelation: the Pearson correlation of a series against its
/// one-step shift. Zero when fewer than two overlapping pairs exist.
pub fn lag1_autocorrelation(xs: &[f64]) -> f64 {
    if xs.len() < 3 {
        return 0.0;
    }
    pearson_correlation(&xs[..xs.len() - 1], &xs[1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_functions_match_reference_values() {
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-9);
        assert_relative_eq!(normal_cdf(-2.0), 0.022_750_131_948_179_2, epsilon = 1e-9);
    }

    #[test]
    fn inverse_cdf_round_trips_cdf() {
        for i in 1..100 {
            let p = i as f64 / 100.0;
            assert_relative_eq!(normal_cdf(normal_inv_cdf(p)), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn sample_variance_uses_unbiased_divisor() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&xs), 2.5, epsilon = 1e-15);
        assert_relative_eq!(sample_variance(&xs), 5.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn degenerate_inputs_yield_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_variance(&[1.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 1.0], &[2.0, 3.0]), 0.0);
        assert_eq!(lag1_autocorrelation(&[0.4, 0.5]), 0.0);
    }

    #[test]
    fn correlation_of_linear_series_is_unit() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let c = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson_correlation(&a, &b), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson_correlation(&a, &c), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn lag1_autocorrelation_of_alternating_series_is_negative() {
        let xs = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        assert_relative_eq!(lag1_autocorrelation(&xs), -1.0, epsilon = 1e-12);
    }
}
