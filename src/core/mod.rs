//! Core domain types and the library-wide error taxonomy.

pub mod types;

pub use types::*;

/// Errors surfaced by the calibration pipeline.
///
/// Configuration problems are fatal and raised before any simulation work
/// starts. Failed simulations are recoverable inside the rejection sampler,
/// which discards the offending draw and moves on; they are fatal only when
/// a component is called directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// A statically invalid input (grid size, horizon, prior range, ...).
    InvalidConfiguration(String),
    /// A path evaluation produced a non-finite value.
    FailedSimulation(String),
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::FailedSimulation(msg) => write!(f, "failed simulation: {msg}"),
        }
    }
}

impl std::error::Error for CalibrationError {}
