//! Population-based metaheuristics for makespan-minimizing job assignment.
//!
//! `M` jobs of known size are assigned to `N` resources of known processing
//! rate. Each candidate solution is a vector in `[0, 1]^M` whose coordinates
//! are bucketed into resource indices; the search minimizes the makespan of
//! the decoded assignment.
//!
//! Five algorithm families share one driver, one population and one
//! evaluator and differ only in their per-iteration [`Strategy`]:
//!
//! - **AOA**: Arithmetic Optimization Algorithm
//! - **HHO**: Harris Hawks Optimization
//! - **GTO**: Gorilla Troops Optimizer
//! - **EDCBO**: Lévy search, logarithmic spiral and adaptive attack with
//!   sparse Gaussian mutation
//! - **LSCBO**: Lévy search, pairwise rotation and attack
//!
//! Every run threads an explicit seeded random stream, so identical inputs
//! and seed give bit-identical traces and assignments. The global best only
//! improves (strict `<`), so every convergence trace is non-increasing.
//!
//! # Example
//!
//! ```
//! use u_swarm::{Algorithm, HhoParams, Optimizer, OptimizerConfig};
//!
//! let jobs = vec![1200.0, 800.0, 450.0, 950.0, 300.0, 700.0];
//! let rates = vec![1.0, 1.5, 2.0];
//! let config = OptimizerConfig::default()
//!     .with_algorithm(Algorithm::Hho(HhoParams::default()))
//!     .with_seed(7);
//!
//! let result = Optimizer::schedule(&jobs, &rates, &config).unwrap();
//! assert_eq!(result.assignment().job_count(), jobs.len());
//! assert!(result.convergence_trace().is_monotone());
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` on configs, parameters, traces and
//!   results
//! - `parallel`: runs [`Optimizer::schedule_batch`] on the rayon pool

pub mod driver;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod strategy;
pub mod trace;

pub use driver::{Optimizer, OptimizerConfig, ScheduleResult, SearchResult};
pub use error::{ConfigError, Result};
pub use fitness::{Assignment, MakespanEvaluator, Objective};
pub use population::Bounds;
pub use strategy::{
    Algorithm, AoaParams, EdcboParams, GtoParams, HhoParams, LscboParams, Strategy,
};
pub use trace::ConvergenceTrace;
