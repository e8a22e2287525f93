//! Fixed-input scenarios with known outcomes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use u_swarm::operators::{standard_normal, LevySampler};
use u_swarm::{Algorithm, ConfigError, Optimizer, OptimizerConfig};

#[test]
fn single_job_single_resource_is_exact() {
    // 10000 / 1000 = 10 regardless of where the coordinate lands.
    for (i, algorithm) in Algorithm::all().into_iter().enumerate() {
        for seed in [0, 17, 9_999] {
            let config = OptimizerConfig::default()
                .with_algorithm(algorithm.clone())
                .with_seed(seed + i as u64)
                .with_max_iterations(25);
            let result = Optimizer::schedule(&[10_000.0], &[1000.0], &config).unwrap();
            assert_eq!(result.best_fitness(), 10.0, "{} seed {seed}", algorithm.name());
            assert_eq!(result.assignment().resources(), &[0]);
            assert!(result
                .convergence_trace()
                .fitness_values()
                .iter()
                .all(|&f| f == 10.0));
        }
    }
}

#[test]
fn equal_jobs_cannot_beat_perfect_split() {
    let jobs = [100.0; 4];
    let rates = [1.0, 1.0];
    for seed in 0..20 {
        let config = OptimizerConfig::default()
            .with_seed(seed)
            .with_max_iterations(0);
        let result = Optimizer::schedule(&jobs, &rates, &config).unwrap();
        assert!(result.best_fitness() >= 200.0);
        assert!(result.best_fitness() >= 100.0);
    }

    // With a budget the search reaches the 2-2 split.
    let config = OptimizerConfig::default().with_seed(1).with_max_iterations(100);
    let result = Optimizer::schedule(&jobs, &rates, &config).unwrap();
    assert_eq!(result.best_fitness(), 200.0);
    assert_eq!(result.assignment().jobs_on(0).len(), 2);
}

fn excess_kurtosis(samples: &[f64]) -> f64 {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let m2 = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let m4 = samples.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;
    m4 / (m2 * m2) - 3.0
}

fn tail_ratio(samples: &[f64]) -> f64 {
    let mut abs: Vec<f64> = samples.iter().map(|x| x.abs()).collect();
    abs.sort_by(|a, b| a.total_cmp(b));
    let median = abs[abs.len() / 2];
    let q999 = abs[abs.len() * 999 / 1000];
    q999 / median
}

#[test]
fn levy_steps_have_heavier_tails_than_gaussian() {
    const DRAWS: usize = 100_000;
    let sampler = LevySampler::new(1.5);
    let mut rng = StdRng::seed_from_u64(2024);

    let levy: Vec<f64> = (0..DRAWS).map(|_| sampler.sample(&mut rng)).collect();
    let mean = levy.iter().sum::<f64>() / DRAWS as f64;
    let sd = (levy.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / DRAWS as f64).sqrt();
    let gaussian: Vec<f64> = (0..DRAWS).map(|_| sd * standard_normal(&mut rng)).collect();

    let k_levy = excess_kurtosis(&levy);
    let k_gauss = excess_kurtosis(&gaussian);
    assert!(k_gauss.abs() < 0.5, "gaussian excess kurtosis {k_gauss}");
    assert!(k_levy > 10.0, "levy excess kurtosis {k_levy}");

    // |x| at the 99.9th percentile relative to the median: about 4.9 for a
    // Gaussian, far larger for a heavy-tailed law.
    let r_gauss = tail_ratio(&gaussian);
    let r_levy = tail_ratio(&levy);
    assert!(r_gauss < 6.0, "gaussian tail ratio {r_gauss}");
    assert!(r_levy > 2.0 * r_gauss, "levy tail ratio {r_levy}");
}

#[test]
fn zero_iterations_report_initial_population() {
    let jobs: Vec<f64> = (1..=12).map(|j| 10.0 * j as f64).collect();
    let rates = [1.0, 2.0, 3.0];
    for algorithm in Algorithm::all() {
        let config = OptimizerConfig::default()
            .with_algorithm(algorithm)
            .with_seed(77)
            .with_max_iterations(0);
        let result = Optimizer::schedule(&jobs, &rates, &config).unwrap();
        let trace = result.convergence_trace();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.points()[0].iteration, 0);
        assert_eq!(trace.final_fitness(), Some(result.best_fitness()));
        assert_eq!(result.assignment().makespan(), result.best_fitness());
    }

    // Same seed, so every family starts from the same population.
    let initial: Vec<f64> = Algorithm::all()
        .into_iter()
        .map(|algorithm| {
            let config = OptimizerConfig::default()
                .with_algorithm(algorithm)
                .with_seed(77)
                .with_max_iterations(0);
            Optimizer::schedule(&jobs, &rates, &config)
                .unwrap()
                .best_fitness()
        })
        .collect();
    assert!(initial.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn configuration_errors_surface_before_running() {
    let config = OptimizerConfig::default();
    assert_eq!(
        Optimizer::schedule(&[] as &[f64], &[1.0], &config).unwrap_err(),
        ConfigError::NoJobs
    );
    assert_eq!(
        Optimizer::schedule(&[1.0], &[] as &[f64], &config).unwrap_err(),
        ConfigError::NoResources
    );
    assert_eq!(
        Optimizer::schedule(&[1.0, -2.0], &[1.0], &config).unwrap_err(),
        ConfigError::InvalidJobSize {
            index: 1,
            value: -2.0
        }
    );
    assert_eq!(
        Optimizer::schedule(&[1.0], &[0.0], &config).unwrap_err(),
        ConfigError::InvalidResourceRate {
            index: 0,
            value: 0.0
        }
    );
    assert_eq!(
        Optimizer::schedule(&[1.0], &[1.0], &config.with_population_size(0)).unwrap_err(),
        ConfigError::InvalidPopulationSize(0)
    );
}
