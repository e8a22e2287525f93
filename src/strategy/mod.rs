//! Pluggable per-algorithm iteration steps.
//!
//! Every family shares the same outer loop, owned by the driver: for
//! `t = 1..=T` it calls [`Strategy::step`] once. A step computes the
//! iteration's control parameters, builds one or more candidate positions
//! per individual from [`operators`](crate::operators) primitives and the
//! current global best, scores them and offers them to
//! [`Population::accept_if_better`]. That is the only mutation a strategy
//! may perform.
//!
//! # Families
//!
//! | Family | Type | Control schedule |
//! |---|---|---|
//! | Arithmetic optimization | [`Aoa`] | `MOA(t)`, `MOP(t)` |
//! | Escaping energy (Harris hawks) | [`Hho`] | `E(t) = 2·E0·(1−t/T)` |
//! | Gorilla troops | [`Gto`] | `p = (cos 2r + 1)/2`, `β(t)` |
//! | Lévy / spiral / attack hybrid | [`Edcbo`] | `w(t)`, `σ(t)` |
//! | Lévy / rotation / attack hybrid | [`Lscbo`] | `θ(t) = 2πt/T`, `α(t)` |
//!
//! [`Algorithm`] selects a family and its parameters as plain data;
//! [`Algorithm::instantiate`] turns it into a ready [`AnyStrategy`].

mod aoa;
mod edcbo;
mod gto;
mod hho;
mod lscbo;

pub use aoa::{Aoa, AoaParams};
pub use edcbo::{Edcbo, EdcboParams};
pub use gto::{Gto, GtoParams};
pub use hho::{Hho, HhoParams};
pub use lscbo::{Lscbo, LscboMode, LscboParams, OddDimensionRule};

use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::population::Population;
use rand::Rng;

/// One iteration of a population-based search.
///
/// Implementations hold only immutable per-run state (parameters and
/// precomputed constants such as Lévy σ_u), so a single instance can drive
/// every iteration of a run.
///
/// # Contract
///
/// - `iteration` runs from 1 to `total_iterations` inclusive.
/// - Every candidate must be clamped into `population.bounds()` before it is
///   offered.
/// - The population changes only through `accept_if_better`.
pub trait Strategy: Send + Sync {
    /// Short family label used in traces and logs.
    fn name(&self) -> &'static str;

    /// Performs one iteration over every individual.
    fn step<O: Objective + ?Sized, R: Rng>(
        &self,
        iteration: usize,
        total_iterations: usize,
        population: &mut Population,
        objective: &O,
        rng: &mut R,
    );
}

/// Fraction `t / T` of the iteration budget consumed.
#[inline]
pub(crate) fn progress(iteration: usize, total_iterations: usize) -> f64 {
    if total_iterations == 0 {
        return 1.0;
    }
    iteration as f64 / total_iterations as f64
}

/// Requires a finite, strictly positive parameter.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::parameter(
            name,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Requires a parameter inside `[0, 1]`.
pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::parameter(
            name,
            format!("must lie in [0, 1], got {value}"),
        ))
    }
}

/// Requires a Lévy stability index in `(0, 2]`.
pub(crate) fn check_levy_lambda(value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 2.0 {
        Ok(())
    } else {
        Err(ConfigError::parameter(
            "levy_lambda",
            format!("must lie in (0, 2], got {value}"),
        ))
    }
}

/// Algorithm family selection with its parameters.
///
/// # Examples
///
/// ```
/// use u_swarm::strategy::{Algorithm, HhoParams};
///
/// let algo = Algorithm::Hho(HhoParams::default());
/// assert_eq!(algo.name(), "HHO");
/// assert!(algo.instantiate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Aoa(AoaParams),
    Edcbo(EdcboParams),
    Lscbo(LscboParams),
    Hho(HhoParams),
    Gto(GtoParams),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Edcbo(EdcboParams::default())
    }
}

impl Algorithm {
    /// Every family with its published default parameters.
    pub fn all() -> Vec<Algorithm> {
        vec![
            Algorithm::Aoa(AoaParams::default()),
            Algorithm::Edcbo(EdcboParams::default()),
            Algorithm::Lscbo(LscboParams::default()),
            Algorithm::Hho(HhoParams::default()),
            Algorithm::Gto(GtoParams::default()),
        ]
    }

    /// Family label.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Aoa(_) => Aoa::NAME,
            Algorithm::Edcbo(_) => Edcbo::NAME,
            Algorithm::Lscbo(_) => Lscbo::NAME,
            Algorithm::Hho(_) => Hho::NAME,
            Algorithm::Gto(_) => Gto::NAME,
        }
    }

    /// Validates the parameters of the selected family.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Algorithm::Aoa(p) => p.validate(),
            Algorithm::Edcbo(p) => p.validate(),
            Algorithm::Lscbo(p) => p.validate(),
            Algorithm::Hho(p) => p.validate(),
            Algorithm::Gto(p) => p.validate(),
        }
    }

    /// Builds the strategy, precomputing per-instance constants.
    pub fn instantiate(&self) -> Result<AnyStrategy, ConfigError> {
        Ok(match self {
            Algorithm::Aoa(p) => AnyStrategy::Aoa(Aoa::new(p.clone())?),
            Algorithm::Edcbo(p) => AnyStrategy::Edcbo(Edcbo::new(p.clone())?),
            Algorithm::Lscbo(p) => AnyStrategy::Lscbo(Lscbo::new(p.clone())?),
            Algorithm::Hho(p) => AnyStrategy::Hho(Hho::new(p.clone())?),
            Algorithm::Gto(p) => AnyStrategy::Gto(Gto::new(p.clone())?),
        })
    }
}

/// A built strategy of any family, dispatching [`Strategy`] by match.
#[derive(Debug, Clone)]
pub enum AnyStrategy {
    Aoa(Aoa),
    Edcbo(Edcbo),
    Lscbo(Lscbo),
    Hho(Hho),
    Gto(Gto),
}

impl Strategy for AnyStrategy {
    fn name(&self) -> &'static str {
        match self {
            AnyStrategy::Aoa(s) => s.name(),
            AnyStrategy::Edcbo(s) => s.name(),
            AnyStrategy::Lscbo(s) => s.name(),
            AnyStrategy::Hho(s) => s.name(),
            AnyStrategy::Gto(s) => s.name(),
        }
    }

    fn step<O: Objective + ?Sized, R: Rng>(
        &self,
        iteration: usize,
        total_iterations: usize,
        population: &mut Population,
        objective: &O,
        rng: &mut R,
    ) {
        match self {
            AnyStrategy::Aoa(s) => s.step(iteration, total_iterations, population, objective, rng),
            AnyStrategy::Edcbo(s) => s.step(iteration, total_iterations, population, objective, rng),
            AnyStrategy::Lscbo(s) => s.step(iteration, total_iterations, population, objective, rng),
            AnyStrategy::Hho(s) => s.step(iteration, total_iterations, population, objective, rng),
            AnyStrategy::Gto(s) => s.step(iteration, total_iterations, population, objective, rng),
        }
    }
}

// ============================================================================
// Shared test fixtures
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 10), 0.0);
        assert_eq!(progress(5, 10), 0.5);
        assert_eq!(progress(10, 10), 1.0);
        assert_eq!(progress(3, 0), 1.0);
    }

    #[test]
    fn test_parameter_checks() {
        assert!(check_positive("x", 1.0).is_ok());
        assert!(check_positive("x", 0.0).is_err());
        assert!(check_positive("x", f64::INFINITY).is_err());
        assert!(check_unit("p", 0.0).is_ok());
        assert!(check_unit("p", 1.0).is_ok());
        assert!(check_unit("p", 1.1).is_err());
        assert!(check_unit("p", f64::NAN).is_err());
    }

    #[test]
    fn test_all_families_instantiate() {
        let names: Vec<&str> = Algorithm::all().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["AOA", "EDCBO", "LSCBO", "HHO", "GTO"]);
        for algo in Algorithm::all() {
            let strategy = algo.instantiate().unwrap();
            assert_eq!(strategy.name(), algo.name());
        }
    }

    #[test]
    fn test_any_strategy_invariants() {
        for algo in Algorithm::all() {
            let strategy = algo.instantiate().unwrap();
            testing::check_invariants(&strategy, 15);
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let algo = Algorithm::Aoa(AoaParams::default().with_alpha(0.0));
        assert!(algo.validate().is_err());
        assert!(algo.instantiate().is_err());
    }
}
