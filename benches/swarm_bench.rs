//! Criterion benchmarks for the u-swarm algorithm families.
//!
//! Uses a synthetic heterogeneous assignment problem and the Sphere function
//! to measure per-family overhead at several problem scales.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_swarm::operators::LevySampler;
use u_swarm::{Algorithm, LscboParams, Objective, Optimizer, OptimizerConfig};

// ===========================================================================
// Synthetic assignment problem
// ===========================================================================

fn synthetic_jobs(m: usize) -> Vec<f64> {
    (0..m).map(|j| 1000.0 + 250.0 * ((j * 7) % 13) as f64).collect()
}

fn synthetic_rates(n: usize) -> Vec<f64> {
    (0..n).map(|r| 500.0 + 125.0 * (r % 4) as f64).collect()
}

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

struct Sphere {
    dim: usize,
}

impl Objective for Sphere {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_schedule_families(c: &mut Criterion) {
    let jobs = synthetic_jobs(100);
    let rates = synthetic_rates(20);

    let mut group = c.benchmark_group("schedule_m100");
    group.sample_size(10);
    for algorithm in Algorithm::all() {
        let config = OptimizerConfig::default()
            .with_algorithm(algorithm.clone())
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm.name()),
            &config,
            |b, config| {
                b.iter(|| {
                    let result = Optimizer::schedule(black_box(&jobs), black_box(&rates), config);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_schedule_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_edcbo_scale");
    group.sample_size(10);
    for &m in &[100, 500, 1000] {
        let jobs = synthetic_jobs(m);
        let rates = synthetic_rates(m / 5);
        let config = OptimizerConfig::default().with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(m), &config, |b, config| {
            b.iter(|| {
                let result = Optimizer::schedule(black_box(&jobs), black_box(&rates), config);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_lscbo_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("lscbo_sphere");
    group.sample_size(10);
    for &dim in &[10, 30] {
        let problem = Sphere { dim };
        let config = OptimizerConfig::default()
            .with_algorithm(Algorithm::Lscbo(LscboParams::phased()))
            .with_bounds(-100.0, 100.0)
            .with_max_iterations(1000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(dim),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = Optimizer::minimize(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_levy_sampler(c: &mut Criterion) {
    let sampler = LevySampler::new(1.5);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("levy_sample", |b| {
        b.iter(|| black_box(sampler.sample(&mut rng)))
    });
}

criterion_group!(
    benches,
    bench_schedule_families,
    bench_schedule_scale,
    bench_lscbo_sphere,
    bench_levy_sampler
);
criterion_main!(benches);
