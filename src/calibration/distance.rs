//! Scaled Euclidean distance between summary-statistic vectors.
//!
//! The five statistics live on very different scales (daily log returns
//! versus variance levels), so each dimension is divided by a typical
//! magnitude before the Euclidean norm is taken. Without the rescaling the
//! variance dimensions would dominate the acceptance decision.

use serde::{Deserialize, Serialize};

use crate::core::CalibrationError;
use crate::stats::SummaryStatistics;

/// Per-dimension normalization applied inside [`scaled_distance`].
///
/// Entry order matches [`SummaryStatistics::as_array`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticScale(pub [f64; 5]);

impl Default for StatisticScale {
    /// Empirical magnitudes of the five statistics under the canonical
    /// configuration.
    fn default() -> Self {
        Self([0.01, 0.01, 0.01, 0.01, 0.1])
    }
}

impl StatisticScale {
    pub fn new(scale: [f64; 5]) -> Result<Self, CalibrationError> {
        let scale = Self(scale);
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.0.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(CalibrationError::InvalidConfiguration(format!(
                "statistic scale entries must be finite and positive, got {:?}",
                self.0
            )));
        }
        Ok(())
    }
}

/// Euclidean distance after per-dimension scaling.
///
/// Symmetric, non-negative, exactly zero on identical inputs.
pub fn scaled_distance(
    a: &SummaryStatistics,
    b: &SummaryStatistics,
    scale: &StatisticScale,
) -> f64 {
    a.as_array()
        .iter()
        .zip(b.as_array())
        .zip(scale.0)
        .map(|((x, y), s)| {
            let z = (x - y) / s;
            z * z
        })
        .sum::<f64>()
        .sqrt()
}
