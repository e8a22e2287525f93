//! Run orchestration.
//!
//! The driver owns the outer loop shared by every algorithm family:
//! validate the configuration, initialize and score a random population,
//! record iteration 0, call [`Strategy::step`](crate::strategy::Strategy::step)
//! `T` times while recording the global best, then decode the result.
//!
//! # Key Types
//!
//! - [`OptimizerConfig`]: population size, budget, seed, algorithm, bounds
//! - [`Optimizer`]: entry points for assignment and continuous runs
//! - [`ScheduleResult`] / [`SearchResult`]: final best, decoded assignment and
//!   convergence trace

mod config;
mod runner;

pub use config::OptimizerConfig;
pub use runner::{Optimizer, ScheduleResult, SearchResult};
