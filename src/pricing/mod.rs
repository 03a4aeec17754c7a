//! Option pricing engines: Black-Scholes closed forms, Monte Carlo with
//! antithetic variates, Sobol quasi-Monte Carlo, and finite-difference
//! Greeks.

pub mod asian;
pub mod european;
pub mod greeks;

pub use asian::{ConvergenceRow, convergence_study, mc_asian_price, qmc_asian_price};
pub use crate::core::types::OptionType;
pub use european::{Greeks, black_scholes_greeks, black_scholes_price, mc_european_price};
pub use greeks::MonteCarloGreeks;

#[cfg(feature = "parallel")]
pub use european::mc_european_price_parallel;
