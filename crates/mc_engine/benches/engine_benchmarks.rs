//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Benchmarks cover:
//! - Sub-stream derivation and normal sampling
//! - End-to-end runs per scenario
//! - Thread scalability of the dispatcher
//! - Risk metric aggregation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mc_engine::rng::StreamFactory;
use mc_engine::stats::risk_metrics;
use mc_engine::{
    MonteCarloEngine, OptionPricingConfig, PiEstimationConfig, RandomWalkConfig,
    RiskAnalysisConfig, ScenarioConfig, ScenarioSpecificConfig,
};

fn engine(config: ScenarioSpecificConfig) -> MonteCarloEngine {
    MonteCarloEngine::new(config.scenario(), config).unwrap()
}

/// Benchmark per-trial stream setup and sampling.
fn bench_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams");
    let factory = StreamFactory::new(42);

    group.bench_function("stream_setup", |b| {
        let mut trial = 0u64;
        b.iter(|| {
            trial = trial.wrapping_add(1);
            black_box(factory.stream(black_box(trial)))
        });
    });

    for n_samples in [1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = factory.stream(0);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark full runs of each scenario.
fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios");
    group.sample_size(20);

    let trials = ScenarioConfig::new(10_000, 50, 4, 42).unwrap();
    let configs: Vec<ScenarioSpecificConfig> = vec![
        PiEstimationConfig::new(trials.clone(), 1.0, 0.01).into(),
        OptionPricingConfig::new(trials.clone(), 100.0, 100.0, 0.05, 0.2, 1.0).into(),
        RandomWalkConfig::new(trials.clone(), None).into(),
        RiskAnalysisConfig::new(trials, 100.0, 100.0, 0.05, 0.2, 1.0).into(),
    ];

    for config in configs {
        let scenario = config.scenario();
        let engine = engine(config);
        group.bench_function(scenario.as_str(), |b| {
            b.iter(|| engine.run(black_box(10_000)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark option pricing across worker counts.
fn bench_thread_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_scalability");
    group.sample_size(20);

    for threads in [1, 2, 4, 8] {
        let trials = ScenarioConfig::new(20_000, 100, threads, 42).unwrap();
        let engine = engine(OptionPricingConfig::new(trials, 100.0, 100.0, 0.05, 0.2, 1.0).into());
        group.bench_with_input(BenchmarkId::new("option_pricing", threads), &threads, |b, _| {
            b.iter(|| engine.run_configured().unwrap())
        });
    }

    group.finish();
}

/// Benchmark VaR / ES over a sorted copy of the losses.
fn bench_risk_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_metrics");

    for n in [10_000, 100_000] {
        let factory = StreamFactory::new(7);
        let mut rng = factory.stream(0);
        let mut losses = vec![0.0; n];
        rng.fill_normal(&mut losses);

        group.bench_with_input(BenchmarkId::new("var_es", n), &losses, |b, losses| {
            b.iter(|| risk_metrics(black_box(losses), &[0.95, 0.99]))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_streams,
    bench_scenarios,
    bench_thread_scalability,
    bench_risk_metrics
);
criterion_main!(benches);
