//! Gorilla Troops Optimizer (GTO).
//!
//! Once per iteration a migration probability is drawn:
//!
//! ```text
//! p = (cos 2r + 1)/2,   r ~ U(−π, π)
//! β(t) = β0·(1 − t/T)
//! ```
//!
//! With `p < 0.5` every gorilla migrates (each coordinate either jumps to a
//! uniform point in the box or moves relative to a random troop member).
//! Otherwise each gorilla draws `C = F·(2r − 1)`, `F = cos 2r + 1`, and
//! follows the silverback (the global best) when `|C| < W`, or competes for
//! an adult female (a random troop member) when `|C| ≥ W`.
//!
//! # References
//!
//! Abdollahzadeh et al. (2021), "Artificial gorilla troops optimizer: A new
//! nature-inspired metaheuristic algorithm for global optimization problems",
//! *Int. J. Intelligent Systems* 36(10), 5887-5958

use super::{check_positive, progress, Strategy};
use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::operators::clamp;
use crate::population::Population;
use rand::Rng;
use std::f64::consts::PI;

/// Migration is chosen when `p` falls below this.
const MIGRATION_THRESHOLD: f64 = 0.5;

/// Follow-the-silverback bound on `|C|`.
const FOLLOW_WEIGHT: f64 = 0.8;

/// GTO parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GtoParams {
    /// β at `t = 0`.
    pub beta_initial: f64,

    /// Guard added to the divisor of the competition magnitude.
    pub epsilon: f64,
}

impl Default for GtoParams {
    fn default() -> Self {
        Self {
            beta_initial: 3.0,
            epsilon: 1e-6,
        }
    }
}

impl GtoParams {
    pub fn with_beta_initial(mut self, beta: f64) -> Self {
        self.beta_initial = beta;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Competition scale at iteration `t` of `total`.
    pub fn beta(&self, t: usize, total: usize) -> f64 {
        self.beta_initial * (1.0 - progress(t, total))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("beta_initial", self.beta_initial)?;
        check_positive("epsilon", self.epsilon)
    }
}

/// Migration probability for an angle `r`.
#[inline]
pub(crate) fn migration_probability(r: f64) -> f64 {
    ((2.0 * r).cos() + 1.0) / 2.0
}

/// Gorilla troops strategy.
#[derive(Debug, Clone)]
pub struct Gto {
    params: GtoParams,
}

impl Gto {
    pub const NAME: &'static str = "GTO";

    pub fn new(params: GtoParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GtoParams {
        &self.params
    }
}

impl Strategy for Gto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn step<O: Objective + ?Sized, R: Rng>(
        &self,
        iteration: usize,
        total_iterations: usize,
        population: &mut Population,
        objective: &O,
        rng: &mut R,
    ) {
        let beta = self.params.beta(iteration, total_iterations);
        let p = migration_probability(rng.random_range(-PI..PI));
        let bounds = population.bounds();
        let (lo, hi) = (bounds.lower, bounds.upper);
        let size = population.size();
        let mut candidate = vec![0.0; population.dimension()];

        for i in 0..size {
            let best = population.best_position();
            let current = population.position(i);

            if p < MIGRATION_THRESHOLD {
                for (d, y) in candidate.iter_mut().enumerate() {
                    let r2: f64 = rng.random_range(0.0..1.0);
                    let r3: f64 = rng.random_range(0.0..1.0);
                    let r4: f64 = rng.random_range(0.0..1.0);
                    let x = if r2 < 0.5 {
                        lo + (hi - lo) * r3
                    } else {
                        let l: f64 = rng.random_range(-1.0..1.0);
                        let peer = population.position(rng.random_range(0..size));
                        best[d] - l * (2.0 * r4 - 1.0) * (best[d] - peer[d]).abs()
                    };
                    *y = clamp(x, lo, hi);
                }
            } else {
                let r: f64 = rng.random_range(0.0..1.0);
                let c = ((2.0 * r).cos() + 1.0) * (2.0 * r - 1.0);

                if c.abs() < FOLLOW_WEIGHT {
                    // Follow the silverback
                    for (d, y) in candidate.iter_mut().enumerate() {
                        let l: f64 = rng.random_range(-1.0..1.0);
                        *y = clamp(l * c * (best[d] - current[d]) + current[d], lo, hi);
                    }
                } else {
                    // Compete for an adult female
                    let female = population.position(rng.random_range(0..size));
                    for (d, y) in candidate.iter_mut().enumerate() {
                        let r6: f64 = rng.random_range(0.0..1.0);
                        let r7: f64 = rng.random_range(0.0..1.0);
                        let a = beta * (-r6 / (r7 + self.params.epsilon)).exp();
                        let z: f64 = rng.random_range(-1.0..1.0);
                        let x = if r6 < 0.5 {
                            a * (best[d] - current[d]) + female[d]
                        } else {
                            best[d] - a * z * (c * best[d] - female[d]).abs()
                        };
                        *y = clamp(x, lo, hi);
                    }
                }
            }

            let fitness = objective.evaluate(&candidate);
            population.accept_if_better(i, &candidate, fitness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing;

    #[test]
    fn test_beta_schedule() {
        let p = GtoParams::default();
        assert!((p.beta(0, 100) - 3.0).abs() < 1e-12);
        assert!((p.beta(50, 100) - 1.5).abs() < 1e-12);
        assert!(p.beta(100, 100).abs() < 1e-12);
    }

    #[test]
    fn test_migration_probability_range() {
        assert!((migration_probability(0.0) - 1.0).abs() < 1e-12);
        assert!(migration_probability(PI / 2.0).abs() < 1e-12);
        for k in -20..=20 {
            let p = migration_probability(k as f64 * PI / 20.0);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_validate() {
        assert!(GtoParams::default().validate().is_ok());
        assert!(GtoParams::default().with_beta_initial(0.0).validate().is_err());
        assert!(Gto::new(GtoParams::default().with_epsilon(-1.0)).is_err());
    }

    #[test]
    fn test_step_invariants() {
        let gto = Gto::new(GtoParams::default()).unwrap();
        assert_eq!(gto.name(), "GTO");
        testing::check_invariants(&gto, 20);
    }
}
