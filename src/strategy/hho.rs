//! Harris Hawks Optimization (HHO).
//!
//! The escaping energy of the prey (the global best) drives the choice of
//! move for each hawk:
//!
//! ```text
//! E(t) = 2·E0·(1 − t/T),   E0 ~ U(−1, 1) per iteration
//! ```
//!
//! - `|E| ≥ 1`: exploration, perching on a random hawk or relative to the
//!   flock mean
//! - `|E| < 1`, `r ≥ 0.5`: soft (`|E| ≥ 0.5`) or hard besiege
//! - `|E| < 1`, `r < 0.5`: soft or hard besiege with progressive rapid dives,
//!   where a Lévy-flight dive is tried only if the plain dive fails
//!
//! # References
//!
//! Heidari et al. (2019), "Harris hawks optimization: Algorithm and
//! applications", *Future Generation Computer Systems* 97, 849-872

use super::{check_levy_lambda, progress, Strategy};
use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::operators::{clamp_slice, GammaMethod, LevySampler};
use crate::population::Population;
use rand::Rng;

/// HHO parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HhoParams {
    /// Lévy stability index for the dive step.
    pub levy_lambda: f64,

    /// Gamma evaluator for σ_u.
    pub gamma_method: GammaMethod,
}

impl Default for HhoParams {
    fn default() -> Self {
        Self {
            levy_lambda: 1.5,
            gamma_method: GammaMethod::Stirling,
        }
    }
}

impl HhoParams {
    pub fn with_levy_lambda(mut self, lambda: f64) -> Self {
        self.levy_lambda = lambda;
        self
    }

    pub fn with_gamma_method(mut self, method: GammaMethod) -> Self {
        self.gamma_method = method;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_levy_lambda(self.levy_lambda)
    }
}

/// Escaping energy `2·e0·(1 − t/T)` for a draw `e0 ∈ (−1, 1)`.
#[inline]
pub(crate) fn escaping_energy(e0: f64, t: usize, total: usize) -> f64 {
    2.0 * e0 * (1.0 - progress(t, total))
}

/// Harris hawks strategy.
#[derive(Debug, Clone)]
pub struct Hho {
    params: HhoParams,
    levy: LevySampler,
}

impl Hho {
    pub const NAME: &'static str = "HHO";

    pub fn new(params: HhoParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let levy = LevySampler::with_gamma(params.levy_lambda, params.gamma_method);
        Ok(Self { params, levy })
    }

    pub fn params(&self) -> &HhoParams {
        &self.params
    }

    /// Exploration move written into `out`.
    fn explore<R: Rng>(&self, population: &Population, i: usize, out: &mut [f64], rng: &mut R) {
        let size = population.size();
        let current = population.position(i);

        if rng.random_range(0.0..1.0) >= 0.5 {
            // Perch relative to a random hawk
            let peer = population.position(rng.random_range(0..size));
            for (d, y) in out.iter_mut().enumerate() {
                let r3: f64 = rng.random_range(0.0..1.0);
                let r4: f64 = rng.random_range(0.0..1.0);
                *y = peer[d] - r3 * (peer[d] - 2.0 * r4 * current[d]).abs();
            }
        } else {
            // Perch relative to the flock mean
            let best = population.best_position();
            for (d, y) in out.iter_mut().enumerate() {
                let mean = population.mean_coordinate(d);
                let r1: f64 = rng.random_range(0.0..1.0);
                let r2: f64 = rng.random_range(0.0..1.0);
                *y = (best[d] - mean) - r1 * (0.1 + 2.0 * r2) * mean;
            }
        }
    }

    /// Rapid dive: try `Y`, then `Z = Y + S·Lévy`. Returns once one of them
    /// improves slot `i`, or after both fail.
    #[allow(clippy::too_many_arguments)]
    fn dive<O: Objective + ?Sized, R: Rng>(
        &self,
        population: &mut Population,
        i: usize,
        energy: f64,
        use_mean: bool,
        objective: &O,
        y: &mut [f64],
        z: &mut [f64],
        rng: &mut R,
    ) {
        let bounds = population.bounds();
        {
            let best = population.best_position();
            let current = population.position(i);
            for (d, slot) in y.iter_mut().enumerate() {
                let anchor = if use_mean {
                    population.mean_coordinate(d)
                } else {
                    current[d]
                };
                let jump = 2.0 * (1.0 - rng.random_range(0.0..1.0));
                *slot = best[d] - energy * (jump * best[d] - anchor).abs();
            }
        }
        clamp_slice(y, bounds);
        let fy = objective.evaluate(y);
        if population.accept_if_better(i, y, fy) {
            return;
        }

        for (d, slot) in z.iter_mut().enumerate() {
            let s: f64 = rng.random_range(0.0..1.0);
            *slot = y[d] + s * self.levy.sample(rng);
        }
        clamp_slice(z, bounds);
        let fz = objective.evaluate(z);
        population.accept_if_better(i, z, fz);
    }
}

impl Strategy for Hho {
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
        let bounds = population.bounds();
        let dim = population.dimension();
        let mut candidate = vec![0.0; dim];
        let mut dive_buffer = vec![0.0; dim];

        let e0 = rng.random_range(-1.0..1.0);
        let energy = escaping_energy(e0, iteration, total_iterations);
        let magnitude = energy.abs();

        for i in 0..population.size() {
            if magnitude >= 1.0 {
                self.explore(population, i, &mut candidate, rng);
            } else if rng.random_range(0.0..1.0) >= 0.5 {
                let best = population.best_position();
                let current = population.position(i);
                if magnitude >= 0.5 {
                    // Soft besiege
                    for (d, y) in candidate.iter_mut().enumerate() {
                        let jump = 2.0 * (1.0 - rng.random_range(0.0..1.0));
                        let gap = best[d] - current[d];
                        *y = gap - energy * (jump * best[d] - current[d]).abs();
                    }
                } else {
                    // Hard besiege
                    for (d, y) in candidate.iter_mut().enumerate() {
                        *y = best[d] - energy * (best[d] - current[d]).abs();
                    }
                }
            } else {
                let hard = magnitude < 0.5;
                self.dive(
                    population,
                    i,
                    energy,
                    hard,
                    objective,
                    &mut candidate,
                    &mut dive_buffer,
                    rng,
                );
                continue;
            }

            clamp_slice(&mut candidate, bounds);
            let fitness = objective.evaluate(&candidate);
            population.accept_if_better(i, &candidate, fitness);
        }
    }
}
