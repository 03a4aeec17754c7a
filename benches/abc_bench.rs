use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use svolfit::calibration::{RejectionSampler, replicate_statistics, synthesize_observed};
use svolfit::core::{ModelParameters, SimulationConfig};
use svolfit::mc::simulate_heston_path;
use svolfit::models::Heston;
use svolfit::stats::SummaryStatistics;

// Calibration pipeline benchmarks
// Goals:
// - Path simulation should scale linearly in step count
// - Replication cost should be n_sim times one simulate+extract
// - The rejection loop should add negligible overhead per draw

fn benchmark_params() -> ModelParameters {
    ModelParameters::new(1.2, 0.05)
}

fn bench_path_simulation(c: &mut Criterion) {
    let params = benchmark_params();
    let mut group = c.benchmark_group("heston_path");

    for steps in [64, 252, 504].iter() {
        let config = SimulationConfig {
            steps: *steps,
            ..SimulationConfig::default()
        };
        let model = Heston::from_calibration(&config, params);
        let mut rng = StdRng::seed_from_u64(42);
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, _| {
            b.iter(|| {
                let path = simulate_heston_path(
                    black_box(&model),
                    config.s0,
                    config.horizon,
                    config.steps,
                    &mut rng,
                )
                .expect("simulation should succeed");
                black_box(path.spot[config.steps - 1])
            })
        });
    }

    group.finish();
}

fn bench_statistic_extraction(c: &mut Criterion) {
    let params = benchmark_params();
    let config = SimulationConfig::default();
    let model = Heston::from_calibration(&config, params);
    let mut rng = StdRng::seed_from_u64(42);
    let path = simulate_heston_path(&model, config.s0, config.horizon, config.steps, &mut rng)
        .expect("simulation should succeed");

    c.bench_function("summary_statistics", |b| {
        b.iter(|| {
            let stats = SummaryStatistics::from_path(black_box(&path))
                .expect("extraction should succeed");
            black_box(stats.as_array())
        })
    });
}

fn bench_replication(c: &mut Criterion) {
    let params = benchmark_params();
    let config = SimulationConfig::default();
    let mut group = c.benchmark_group("replicate_statistics");

    for n_sim in [1, 5, 20].iter() {
        let mut rng = StdRng::seed_from_u64(42);
        group.bench_with_input(BenchmarkId::from_parameter(n_sim), n_sim, |b, &n| {
            b.iter(|| {
                let stats = replicate_statistics(black_box(params), &config, n, &mut rng)
                    .expect("replication should succeed");
                black_box(stats.mean_variance)
            })
        });
    }

    group.finish();
}

fn bench_rejection_loop(c: &mut Criterion) {
    // Short grid keeps a full run inside a sensible bench budget.
    let config = SimulationConfig {
        steps: 64,
        ..SimulationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);
    let observed =
        synthesize_observed(benchmark_params(), &config, &mut rng).expect("observed target");
    let mut group = c.benchmark_group("rejection_run");
    group.sample_size(10);

    for draws in [50, 200].iter() {
        let sampler = RejectionSampler::new(*draws, 0.8, 5);
        group.bench_with_input(BenchmarkId::from_parameter(draws), draws, |b, _| {
            b.iter(|| {
                let report = sampler
                    .run(black_box(&observed), &config, &mut rng)
                    .expect("run should succeed");
                black_box(report.accepted)
            })
        });
    }

    group.finish();
}

criterion_group!(
    abc_benches,
    bench_path_simulation,
    bench_statistic_extraction,
    bench_replication,
    bench_rejection_loop
);
criterion_main!(abc_benches);
