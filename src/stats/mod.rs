//! Summary-statistic extraction.
//!
//! A path is reduced to a fixed five-dimensional feature vector so simulated
//! and observed behavior can be compared without exact path matching. The
//! extraction is a pure function: the same path always yields bit-identical
//! statistics.

use serde::{Deserialize, Serialize};

use crate::core::CalibrationError;
use crate::math::{lag1_autocorrelation, mean, sample_variance};
use crate::mc::HestonPath;

/// Five-dimensional summary of one simulated path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Mean of the log returns.
    pub mean_log_return: f64,
    /// Sample variance of the log returns.
    pub var_log_return: f64,
    /// Mean of the variance factor.
    pub mean_variance: f64,
    /// Sample variance of the variance factor.
    pub var_variance: f64,
    /// Lag-1 autocorrelation of the log returns; zero when fewer than two
    /// return observations exist.
    pub lag1_autocorr: f64,
}

impl SummaryStatistics {
    /// Reduces a path to its summary vector.
    ///
    /// Fails with [`CalibrationError::FailedSimulation`] when any statistic
    /// comes out non-finite, which happens when a spot excursion below zero
    /// poisons the log returns.
    pub fn from_path(path: &HestonPath) -> Result<Self, CalibrationError> {
        if path.len() < 2 {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "path must contain at least 2 points, got {}",
                path.len()
            )));
        }

        let returns: Vec<f64> = path
            .spot
            .windows(2)
            .map(|w| w[1].ln() - w[0].ln())
            .collect();

        let stats = Self {
            mean_log_return: mean(&returns),
            var_log_return: sample_variance(&returns),
            mean_variance: mean(&path.variance),
            var_variance: sample_variance(&path.variance),
            lag1_autocorr: lag1_autocorrelation(&returns),
        };

        if stats.as_array().iter().any(|x| !x.is_finite()) {
            return Err(CalibrationError::FailedSimulation(
                "non-finite summary statistic (degenerate spot path)".to_string(),
            ));
        }

        Ok(stats)
    }

    /// The statistics as a fixed-order array, matching the distance scale.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.mean_log_return,
            self.var_log_return,
            self.mean_variance,
            self.var_variance,
            self.lag1_autocorr,
        ]
    }

    /// Elementwise arithmetic mean of several statistic vectors.
    ///
    /// Returns `None` on an empty slice. With a single element the result is
    /// bit-identical to that element.
    pub fn mean_of(items: &[Self]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let n = items.len() as f64;
        let mut acc = [0.0_f64; 5];
        for item in items {
            for (slot, value) in acc.iter_mut().zip(item.as_array()) {
                *slot += value;
            }
        }
        Some(Self {
            mean_log_return: acc[0] / n,
            var_log_return: acc[1] / n,
            mean_variance: acc[2] / n,
            var_variance: acc[3] / n,
            lag1_autocorr: acc[4] / n,
        })
    }
}
