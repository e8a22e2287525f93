//! Run loop execution.
//!
//! [`Optimizer`] orchestrates a complete run:
//! validate → initialize → evaluate → `T × step` → decode.

use super::config::OptimizerConfig;
use crate::error::ConfigError;
use crate::fitness::{
    validate_descriptors, Assignment, JobSizeProvider, MakespanEvaluator, Objective,
    ResourceRateProvider,
};
use crate::population::{Bounds, Population};
use crate::strategy::Strategy;
use crate::trace::ConvergenceTrace;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a continuous minimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    best_position: Vec<f64>,
    best_fitness: f64,
    trace: ConvergenceTrace,
}

impl SearchResult {
    /// Best vector found during the run.
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Objective value of [`best_position`](Self::best_position).
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Global-best fitness after initialization and after each iteration.
    pub fn convergence_trace(&self) -> &ConvergenceTrace {
        &self.trace
    }

    pub fn into_trace(self) -> ConvergenceTrace {
        self.trace
    }
}

/// Result of a job-to-resource assignment run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleResult {
    assignment: Assignment,
    search: SearchResult,
}

impl ScheduleResult {
    /// Resource index per job, decoded from the best vector.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Makespan of [`assignment`](Self::assignment) as computed during the
    /// search.
    pub fn best_fitness(&self) -> f64 {
        self.search.best_fitness
    }

    pub fn best_position(&self) -> &[f64] {
        &self.search.best_position
    }

    /// Global-best makespan after initialization and after each iteration
    /// (`T + 1` points).
    pub fn convergence_trace(&self) -> &ConvergenceTrace {
        &self.search.trace
    }

    /// Splits into the assignment and the underlying search result.
    pub fn into_parts(self) -> (Assignment, SearchResult) {
        (self.assignment, self.search)
    }
}

/// Executes optimization runs.
///
/// Every run owns its population, random stream and trace; nothing is shared
/// across calls, so identical inputs with a fixed seed give bit-identical
/// results.
///
/// # Usage
///
/// ```
/// use u_swarm::driver::{Optimizer, OptimizerConfig};
///
/// let jobs = vec![400.0, 250.0, 300.0, 150.0, 500.0];
/// let rates = vec![1.0, 2.0];
/// let config = OptimizerConfig::default().with_seed(42).with_max_iterations(50);
///
/// let result = Optimizer::schedule(&jobs, &rates, &config).unwrap();
/// assert_eq!(result.assignment().job_count(), 5);
/// assert_eq!(result.convergence_trace().len(), 51);
/// ```
pub struct Optimizer;

impl Optimizer {
    /// Assigns jobs to resources, minimizing the makespan.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] before allocating anything if the
    /// descriptors or the configuration are invalid.
    pub fn schedule<J, R>(
        jobs: &J,
        resources: &R,
        config: &OptimizerConfig,
    ) -> Result<ScheduleResult, ConfigError>
    where
        J: JobSizeProvider + ?Sized,
        R: ResourceRateProvider + ?Sized,
    {
        validate_descriptors(jobs.job_sizes(), resources.resource_rates())?;
        config.validate()?;
        let evaluator = MakespanEvaluator::from_providers(jobs, resources)?;
        Self::schedule_with_evaluator(&evaluator, config)
    }

    /// Runs every configuration against the same descriptors.
    ///
    /// Results are returned in the order of `configs`. All configurations are
    /// validated before the first run starts. With the `parallel` feature the
    /// runs execute on the rayon thread pool.
    pub fn schedule_batch<J, R>(
        jobs: &J,
        resources: &R,
        configs: &[OptimizerConfig],
    ) -> Result<Vec<ScheduleResult>, ConfigError>
    where
        J: JobSizeProvider + ?Sized,
        R: ResourceRateProvider + ?Sized,
    {
        validate_descriptors(jobs.job_sizes(), resources.resource_rates())?;
        for config in configs {
            config.validate()?;
        }
        let evaluator = MakespanEvaluator::from_providers(jobs, resources)?;

        #[cfg(feature = "parallel")]
        let results = configs
            .par_iter()
            .map(|config| Self::schedule_with_evaluator(&evaluator, config))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = configs
            .iter()
            .map(|config| Self::schedule_with_evaluator(&evaluator, config))
            .collect();

        results
    }

    /// Minimizes an arbitrary objective over `config.bounds`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration is invalid or the
    /// objective has no variables.
    pub fn minimize<O: Objective + ?Sized>(
        objective: &O,
        config: &OptimizerConfig,
    ) -> Result<SearchResult, ConfigError> {
        config.validate()?;
        let strategy = config.algorithm.instantiate()?;
        Self::minimize_with(objective, &strategy, config)
    }

    /// Minimizes with an already built strategy, which may be a custom
    /// [`Strategy`] implementation. `config.algorithm` is ignored.
    pub fn minimize_with<O, S>(
        objective: &O,
        strategy: &S,
        config: &OptimizerConfig,
    ) -> Result<SearchResult, ConfigError>
    where
        O: Objective + ?Sized,
        S: Strategy,
    {
        if config.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(config.population_size));
        }
        config.bounds.validate()?;
        if objective.dimension() == 0 {
            return Err(ConfigError::parameter(
                "dimension",
                "objective must have at least one variable",
            ));
        }
        Ok(run(objective, strategy, config, config.bounds))
    }

    fn schedule_with_evaluator(
        evaluator: &MakespanEvaluator,
        config: &OptimizerConfig,
    ) -> Result<ScheduleResult, ConfigError> {
        let strategy = config.algorithm.instantiate()?;
        let search = run(evaluator, &strategy, config, Bounds::unit());
        let assignment = evaluator.assignment(&search.best_position)?;
        Ok(ScheduleResult { assignment, search })
    }
}

/// The shared run loop. Inputs are already validated.
fn run<O, S>(objective: &O, strategy: &S, config: &OptimizerConfig, bounds: Bounds) -> SearchResult
where
    O: Objective + ?Sized,
    S: Strategy,
{
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let total = config.max_iterations;

    tracing::debug!(
        algorithm = strategy.name(),
        population = config.population_size,
        iterations = total,
        dimension = objective.dimension(),
        seed,
        "run started"
    );

    // 1. Initialize and evaluate
    let mut population =
        Population::initialize_random(config.population_size, objective.dimension(), bounds, &mut rng);
    population.evaluate_all(objective);

    let mut trace = ConvergenceTrace::with_capacity(strategy.name(), seed, total);
    if let Some(label) = &config.label {
        trace = trace.with_label(label.clone());
    }
    trace.record(0, population.best_fitness());

    // 2. Iterate
    for t in 1..=total {
        strategy.step(t, total, &mut population, objective, &mut rng);
        trace.record(t, population.best_fitness());
        tracing::trace!(iteration = t, best = population.best_fitness(), "iteration");
    }

    let (best_position, best_fitness) = population.into_best();
    tracing::debug!(algorithm = strategy.name(), best_fitness, "run finished");

    SearchResult {
        best_position,
        best_fitness,
        trace,
    }
}
