//! Run configuration.
//!
//! [`OptimizerConfig`] holds everything that controls one run except the
//! problem itself.

use crate::error::ConfigError;
use crate::population::Bounds;
use crate::strategy::Algorithm;

/// Configuration for one optimization run.
///
/// # Defaults
///
/// ```
/// use u_swarm::driver::OptimizerConfig;
///
/// let config = OptimizerConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.algorithm.name(), "EDCBO");
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_swarm::driver::OptimizerConfig;
/// use u_swarm::strategy::{Algorithm, GtoParams};
///
/// let config = OptimizerConfig::default()
///     .with_algorithm(Algorithm::Gto(GtoParams::default()))
///     .with_population_size(50)
///     .with_max_iterations(200)
///     .with_seed(42)
///     .with_label("M500");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Number of individuals (P).
    pub population_size: usize,

    /// Iteration budget (T). Zero is allowed: the result is then decoded
    /// straight from the initial population.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed; the seed actually used is recorded in the
    /// convergence trace.
    pub seed: Option<u64>,

    /// Algorithm family and its parameters.
    pub algorithm: Algorithm,

    /// Search box for [`Optimizer::minimize`](super::Optimizer::minimize).
    ///
    /// Assignment runs always search `[0, 1]`.
    pub bounds: Bounds,

    /// Free-form tag copied into the convergence trace (e.g. `"M100"`).
    pub label: Option<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_iterations: 100,
            seed: None,
            algorithm: Algorithm::default(),
            bounds: Bounds::unit(),
            label: None,
        }
    }
}

impl OptimizerConfig {
    /// Budget used for continuous benchmark functions (T = 10,000).
    pub fn continuous() -> Self {
        Self {
            max_iterations: 10_000,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Bounds::new(lower, upper);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidPopulationSize`] if `population_size == 0`
    /// - [`ConfigError::InvalidBounds`] unless `lower < upper`, both finite
    /// - any parameter error of the selected algorithm
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        self.bounds.validate()?;
        self.algorithm.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AoaParams, HhoParams};

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.seed, None);
        assert_eq!(config.bounds, Bounds::unit());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_continuous_preset() {
        let config = OptimizerConfig::continuous();
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.population_size, 30);
    }

    #[test]
    fn test_builder() {
        let config = OptimizerConfig::default()
            .with_population_size(12)
            .with_max_iterations(0)
            .with_seed(7)
            .with_algorithm(Algorithm::Hho(HhoParams::default()))
            .with_bounds(-5.0, 5.0)
            .with_label("M40");
        assert_eq!(config.population_size, 12);
        assert_eq!(config.max_iterations, 0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.algorithm.name(), "HHO");
        assert_eq!(config.bounds, Bounds::new(-5.0, 5.0));
        assert_eq!(config.label.as_deref(), Some("M40"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_errors() {
        assert_eq!(
            OptimizerConfig::default().with_population_size(0).validate(),
            Err(ConfigError::InvalidPopulationSize(0))
        );
        assert!(matches!(
            OptimizerConfig::default().with_bounds(1.0, 1.0).validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));
        assert!(matches!(
            OptimizerConfig::default()
                .with_algorithm(Algorithm::Aoa(AoaParams::default().with_alpha(-2.0)))
                .validate(),
            Err(ConfigError::InvalidParameter { name: "alpha", .. })
        ));
    }
}
