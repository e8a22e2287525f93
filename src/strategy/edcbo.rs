//! Lévy / spiral / adaptive-attack hybrid (EDCBO).
//!
//! Each individual passes through three phases per iteration:
//!
//! 1. **Lévy search**: `y_d = x_d + α·|best_d − x_d|·L`, `L ~ Lévy(λ)`
//! 2. **Spiral encircling**: `y_d = r·e^{bθ}·cos θ·|best_d − y_d| + best_d`
//!    with one `r ~ U[0,1)`, `θ ~ U[0,2π)` per individual
//! 3. **Adaptive attack**: `y_d = w(t)·y_d + (1 − w(t))·best_d`, plus sparse
//!    Gaussian noise `N(0, σ(t)²)` with probability `p` per coordinate
//!
//! ```text
//! w(t) = w_min + (w_max − w_min)(1 − t/T)²
//! σ(t) = σ_max(1 − t/T)
//! ```
//!
//! Positions are clamped after every phase.

use super::{check_levy_lambda, check_positive, check_unit, progress, Strategy};
use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::operators::{clamp, spiral_radius, standard_normal, GammaMethod, LevySampler};
use crate::population::Population;
use rand::Rng;
use std::f64::consts::PI;

/// EDCBO parameters.
///
/// [`Default`] is the assignment-tuned configuration; [`EdcboParams::continuous`]
/// is the configuration tuned for continuous benchmark functions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdcboParams {
    /// Lévy stability index λ.
    pub levy_lambda: f64,

    /// Lévy step coefficient α.
    pub levy_alpha: f64,

    /// Gamma evaluator for σ_u.
    pub gamma_method: GammaMethod,

    /// Logarithmic spiral shape constant b.
    pub spiral_b: f64,

    /// Inertia weight at `t = 0`.
    pub w_max: f64,

    /// Inertia weight at `t = T`.
    pub w_min: f64,

    /// Gaussian mutation scale at `t = 0`.
    pub sigma_max: f64,

    /// Per-coordinate probability of Gaussian mutation.
    pub gaussian_prob: f64,
}

impl Default for EdcboParams {
    fn default() -> Self {
        Self {
            levy_lambda: 1.5,
            levy_alpha: 0.05,
            gamma_method: GammaMethod::Stirling,
            spiral_b: 0.5,
            w_max: 0.8,
            w_min: 0.1,
            sigma_max: 0.15,
            gaussian_prob: 0.1,
        }
    }
}

impl EdcboParams {
    /// Configuration tuned for continuous benchmark functions.
    pub fn continuous() -> Self {
        Self {
            levy_lambda: 1.5,
            levy_alpha: 0.20,
            gamma_method: GammaMethod::Lanczos,
            spiral_b: 1.0,
            w_max: 0.9,
            w_min: 0.1,
            sigma_max: 0.25,
            gaussian_prob: 0.20,
        }
    }

    pub fn with_levy(mut self, lambda: f64, alpha: f64) -> Self {
        self.levy_lambda = lambda;
        self.levy_alpha = alpha;
        self
    }

    pub fn with_gamma_method(mut self, method: GammaMethod) -> Self {
        self.gamma_method = method;
        self
    }

    pub fn with_spiral_b(mut self, b: f64) -> Self {
        self.spiral_b = b;
        self
    }

    pub fn with_weight_range(mut self, w_min: f64, w_max: f64) -> Self {
        self.w_min = w_min;
        self.w_max = w_max;
        self
    }

    pub fn with_gaussian(mut self, sigma_max: f64, prob: f64) -> Self {
        self.sigma_max = sigma_max;
        self.gaussian_prob = prob;
        self
    }

    /// Inertia weight at iteration `t` of `total` (quadratic decay).
    pub fn weight(&self, t: usize, total: usize) -> f64 {
        let remaining = 1.0 - progress(t, total);
        self.w_min + (self.w_max - self.w_min) * remaining * remaining
    }

    /// Gaussian mutation scale at iteration `t` of `total` (linear decay).
    pub fn sigma(&self, t: usize, total: usize) -> f64 {
        self.sigma_max * (1.0 - progress(t, total))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_levy_lambda(self.levy_lambda)?;
        check_positive("levy_alpha", self.levy_alpha)?;
        check_positive("spiral_b", self.spiral_b)?;
        check_unit("w_min", self.w_min)?;
        check_unit("w_max", self.w_max)?;
        if self.w_min > self.w_max {
            return Err(ConfigError::parameter("w_min", "must not exceed w_max"));
        }
        if !self.sigma_max.is_finite() || self.sigma_max < 0.0 {
            return Err(ConfigError::parameter("sigma_max", "must be non-negative"));
        }
        check_unit("gaussian_prob", self.gaussian_prob)
    }
}

/// Lévy / spiral / adaptive-attack strategy.
#[derive(Debug, Clone)]
pub struct Edcbo {
    params: EdcboParams,
    levy: LevySampler,
}

impl Edcbo {
    pub const NAME: &'static str = "EDCBO";

    /// Validates `params` and precomputes the Lévy σ_u.
    pub fn new(params: EdcboParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let levy = LevySampler::with_gamma(params.levy_lambda, params.gamma_method);
        Ok(Self { params, levy })
    }

    pub fn params(&self) -> &EdcboParams {
        &self.params
    }

    pub fn levy(&self) -> &LevySampler {
        &self.levy
    }
}

impl Strategy for Edcbo {
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
        let p = &self.params;
        let w = p.weight(iteration, total_iterations);
        let sigma = p.sigma(iteration, total_iterations);
        let bounds = population.bounds();
        let (lo, hi) = (bounds.lower, bounds.upper);
        let mut candidate = vec![0.0; population.dimension()];

        for i in 0..population.size() {
            let best = population.best_position();
            let current = population.position(i);

            // Phase 1: Lévy search towards the best
            for (d, y) in candidate.iter_mut().enumerate() {
                let step = self.levy.sample(rng);
                let alpha = p.levy_alpha * (best[d] - current[d]).abs();
                *y = clamp(current[d] + alpha * step, lo, hi);
            }

            // Phase 2: logarithmic spiral around the best
            let r = rng.random_range(0.0..1.0);
            let theta = 2.0 * PI * rng.random_range(0.0..1.0);
            let coil = r * spiral_radius(p.spiral_b, theta) * theta.cos();
            for (d, y) in candidate.iter_mut().enumerate() {
                *y = clamp(coil * (best[d] - *y).abs() + best[d], lo, hi);
            }

            // Phase 3: weighted attack with sparse Gaussian mutation
            for (d, y) in candidate.iter_mut().enumerate() {
                let mut x = w * *y + (1.0 - w) * best[d];
                if rng.random_range(0.0..1.0) < p.gaussian_prob {
                    x += standard_normal(rng) * sigma;
                }
                *y = clamp(x, lo, hi);
            }

            let fitness = objective.evaluate(&candidate);
            population.accept_if_better(i, &candidate, fitness);
        }
    }
}
