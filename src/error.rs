//! Configuration errors.
//!
//! Every failure this crate reports is a caller error detected before any
//! population is allocated. Numeric degeneracy during the search (near-zero
//! divisors, out-of-range positions) is absorbed locally by epsilon guards
//! and clamping and never surfaces here.

use thiserror::Error;

/// Error returned when a run cannot start.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no jobs to assign")]
    NoJobs,

    #[error("no resources to assign jobs to")]
    NoResources,

    #[error("population_size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("job {index} has invalid size {value} (must be positive and finite)")]
    InvalidJobSize { index: usize, value: f64 },

    #[error("resource {index} has invalid rate {value} (must be positive and finite)")]
    InvalidResourceRate { index: usize, value: f64 },

    #[error("job {job} is assigned to resource {resource}, but only {count} resources exist")]
    ResourceOutOfRange {
        job: usize,
        resource: usize,
        count: usize,
    },

    #[error("invalid bounds [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
