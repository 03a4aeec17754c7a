//! Simulation-based (ABC) calibration of the variance mean-reversion pair.
//!
//! The pipeline, in evaluation order:
//! - uniform priors propose `(kappa, theta)` candidates,
//! - each candidate is scored by replicated simulate-and-extract runs,
//! - a scaled Euclidean metric compares the replicated statistics to the
//!   observed vector,
//! - candidates scoring below the tolerance enter the posterior sample.
//!
//! All outputs are serde-compatible payloads for persistence or audit.

pub mod diagnostics;
pub mod distance;
pub mod priors;
pub mod replication;
pub mod sampler;

pub use diagnostics::{
    ReferenceDiagnostics, posterior_mean, posterior_std, reference_diagnostics,
    synthesize_observed,
};
pub use distance::{StatisticScale, scaled_distance};
pub use priors::{ParameterPriors, PriorRange};
pub use replication::replicate_statistics;
pub use sampler::{AbcRunReport, RejectionSampler, RunStatus};
