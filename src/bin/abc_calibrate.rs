//! ABC calibration driver.
//!
//! Synthesizes observed statistics under known true parameters, prints the
//! pre-run reference diagnostic, runs the rejection sampler and reports the
//! posterior. Human-readable output and logs go to stderr; accepted pairs
//! are emitted as CSV on stdout so a plotting collaborator can consume them
//! directly.

use rand::SeedableRng;
use rand::rngs::StdRng;

use svolfit::calibration::{
    RejectionSampler, StatisticScale, posterior_mean, posterior_std, reference_diagnostics,
    synthesize_observed,
};
use svolfit::core::{CalibrationError, ModelParameters, SimulationConfig};

#[derive(Debug, Clone, Copy)]
struct RunOptions {
    seed: u64,
    draws: usize,
    epsilon: f64,
    replications: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            draws: 10_000,
            epsilon: 0.8,
            replications: 20,
        }
    }
}

fn print_usage() {
    let defaults = RunOptions::default();
    eprintln!("usage: abc_calibrate [options]");
    eprintln!("  --seed <u64>           RNG seed (default {})", defaults.seed);
    eprintln!(
        "  --draws <usize>        prior draws to evaluate (default {})",
        defaults.draws
    );
    eprintln!(
        "  --epsilon <f64>        acceptance tolerance (default {})",
        defaults.epsilon
    );
    eprintln!(
        "  --replications <usize> simulations averaged per draw (default {})",
        defaults.replications
    );
}

fn parse_options() -> RunOptions {
    fn set<T: std::str::FromStr>(slot: &mut T, flag: &str, value: &str) {
        match value.parse::<T>() {
            Ok(parsed) => *slot = parsed,
            Err(_) => eprintln!("ignoring invalid {flag} value: {value}"),
        }
    }

    let mut options = RunOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            if let Some(value) = args.next() {
                set(&mut options.seed, "--seed", &value);
            }
        } else if let Some(value) = arg.strip_prefix("--seed=") {
            set(&mut options.seed, "--seed", value);
        } else if arg == "--draws" {
            if let Some(value) = args.next() {
                set(&mut options.draws, "--draws", &value);
            }
        } else if let Some(value) = arg.strip_prefix("--draws=") {
            set(&mut options.draws, "--draws", value);
        } else if arg == "--epsilon" {
            if let Some(value) = args.next() {
                set(&mut options.epsilon, "--epsilon", &value);
            }
        } else if let Some(value) = arg.strip_prefix("--epsilon=") {
            set(&mut options.epsilon, "--epsilon", value);
        } else if arg == "--replications" {
            if let Some(value) = args.next() {
                set(&mut options.replications, "--replications", &value);
            }
        } else if let Some(value) = arg.strip_prefix("--replications=") {
            set(&mut options.replications, "--replications", value);
        } else if arg == "--help" || arg == "-h" {
            print_usage();
            std::process::exit(0);
        } else {
            eprintln!("ignoring unknown argument: {arg}");
        }
    }
    options
}

fn fail(context: &str, err: CalibrationError) -> ! {
    eprintln!("{context}: {err}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let options = parse_options();
    let config = SimulationConfig::default();
    let true_params = ModelParameters::new(1.2, 0.05);
    let scale = StatisticScale::default();

    let mut rng = StdRng::seed_from_u64(options.seed);

    let observed = match synthesize_observed(true_params, &config, &mut rng) {
        Ok(observed) => observed,
        Err(err) => fail("failed to synthesize observed statistics", err),
    };

    let diag = match reference_diagnostics(
        &observed,
        true_params,
        &config,
        options.replications,
        &scale,
        &mut rng,
    ) {
        Ok(diag) => diag,
        Err(err) => fail("reference diagnostic failed", err),
    };
    eprintln!("observed summary stats:            {:?}", diag.observed.as_array());
    eprintln!("replicated stats at true params:   {:?}", diag.reference.as_array());
    eprintln!("reference distance: {:.6}", diag.distance);

    let sampler = RejectionSampler::new(options.draws, options.epsilon, options.replications)
        .with_scale(scale);
    let report = match sampler.run(&observed, &config, &mut rng) {
        Ok(report) => report,
        Err(err) => fail("rejection run failed", err),
    };

    eprintln!(
        "{:?}: {}/{} draws, {} accepted ({:.2}%), {} discarded, min distance {:.4}",
        report.status,
        report.draws_completed,
        report.draws_requested,
        report.accepted,
        100.0 * report.acceptance_rate(),
        report.discarded,
        report.min_distance,
    );

    match posterior_mean(&report.posterior) {
        Some(mean) => {
            eprintln!(
                "posterior mean: kappa={:.4}, theta={:.5}",
                mean.kappa, mean.theta
            );
            if let Some(std) = posterior_std(&report.posterior) {
                eprintln!(
                    "posterior std:  kappa={:.4}, theta={:.5}",
                    std.kappa, std.theta
                );
            }
            println!("kappa,theta");
            for pair in &report.posterior {
                println!("{},{}", pair.kappa, pair.theta);
            }
        }
        None => {
            eprintln!(
                "no samples accepted; raise --epsilon (min distance seen: {:.4}) or increase --replications",
                report.min_distance
            );
        }
    }
}
