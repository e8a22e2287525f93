//! Lévy / rotation / attack hybrid (LSCBO).
//!
//! Three moves drawn from coyote-and-badger style hunting:
//!
//! - **Lévy search**: `y = x + α(t)·L·(prey − x)`, where the prey is the
//!   best slot with probability `prey_prob` and a random slot otherwise,
//!   and `α(t) = α₀(1 − t/T)`
//! - **Rotation encircling**: adjacent coordinate pairs are rotated by
//!   `θ(t) = 2πt/T` relative to the global best; a trailing odd coordinate
//!   uses an [`OddDimensionRule`]
//! - **Attack**: `y = w·y + (1 − w)·best`
//!
//! [`LscboMode::Sequential`] chains all three moves for every individual each
//! iteration (the assignment-tuned form). [`LscboMode::Phased`] applies one
//! move per iteration chosen by budget progress: Lévy search for the first
//! third, rotation for the second, attack for the rest (the continuous
//! benchmark form).

use super::{check_levy_lambda, check_positive, check_unit, progress, Strategy};
use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::operators::{clamp_slice, rotate, rotate_pair, GammaMethod, LevySampler};
use crate::population::Population;
use rand::Rng;
use std::f64::consts::PI;

/// Progress boundaries between phases in [`LscboMode::Phased`].
const SEARCH_PHASE_END: f64 = 0.33;
const ENCIRCLE_PHASE_END: f64 = 0.66;

/// How moves are scheduled within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LscboMode {
    /// Lévy search, then rotation, then attack, every iteration.
    Sequential,
    /// One move per iteration, selected by `t/T`.
    Phased,
}

/// Update for the trailing coordinate when the dimension is odd and the
/// rotation operator has no partner for it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddDimensionRule {
    /// `A = c − c·t/T`, `C = A(2r − 1)`, `y ← y + C(best − y)`.
    LinearConvergence { coefficient: f64 },
    /// `y ← y + r(best − y)` with `r ~ U[0, 1)`.
    RandomPull,
}

impl OddDimensionRule {
    /// Moves `current` towards `best` according to the rule.
    pub fn apply<R: Rng>(&self, current: f64, best: f64, t: usize, total: usize, rng: &mut R) -> f64 {
        match *self {
            OddDimensionRule::LinearConvergence { coefficient } => {
                let a = coefficient * (1.0 - progress(t, total));
                let c = a * (2.0 * rng.random_range(0.0..1.0) - 1.0);
                current + c * (best - current)
            }
            OddDimensionRule::RandomPull => {
                current + rng.random_range(0.0..1.0) * (best - current)
            }
        }
    }
}

/// LSCBO parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LscboParams {
    pub mode: LscboMode,

    /// Lévy stability index λ.
    pub levy_lambda: f64,

    /// Initial Lévy step coefficient α₀.
    pub levy_alpha: f64,

    /// Gamma evaluator for σ_u.
    pub gamma_method: GammaMethod,

    /// Truncation of each Lévy step to `[-limit, limit]` (`None` = untruncated).
    pub step_limit: Option<f64>,

    /// Probability that the Lévy prey is the best slot rather than a random one.
    pub prey_prob: f64,

    /// Weight of the current position in the attack move.
    pub attack_weight: f64,

    /// Trailing-coordinate rule for odd dimensions.
    pub odd_rule: OddDimensionRule,
}

impl Default for LscboParams {
    fn default() -> Self {
        Self::sequential()
    }
}

impl LscboParams {
    /// Assignment-tuned configuration: all moves every iteration.
    pub fn sequential() -> Self {
        Self {
            mode: LscboMode::Sequential,
            levy_lambda: 1.5,
            levy_alpha: 0.05,
            gamma_method: GammaMethod::Lanczos,
            step_limit: Some(1.0),
            prey_prob: 0.5,
            attack_weight: 0.5,
            odd_rule: OddDimensionRule::LinearConvergence { coefficient: 2.0 },
        }
    }

    /// Continuous-benchmark configuration: one move per phase of the budget.
    pub fn phased() -> Self {
        Self {
            mode: LscboMode::Phased,
            step_limit: None,
            odd_rule: OddDimensionRule::RandomPull,
            ..Self::sequential()
        }
    }

    pub fn with_levy(mut self, lambda: f64, alpha: f64) -> Self {
        self.levy_lambda = lambda;
        self.levy_alpha = alpha;
        self
    }

    pub fn with_step_limit(mut self, limit: Option<f64>) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn with_prey_prob(mut self, p: f64) -> Self {
        self.prey_prob = p;
        self
    }

    pub fn with_attack_weight(mut self, w: f64) -> Self {
        self.attack_weight = w;
        self
    }

    pub fn with_odd_rule(mut self, rule: OddDimensionRule) -> Self {
        self.odd_rule = rule;
        self
    }

    /// Lévy step coefficient at iteration `t` of `total`.
    pub fn alpha(&self, t: usize, total: usize) -> f64 {
        self.levy_alpha * (1.0 - progress(t, total))
    }

    /// Rotation angle at iteration `t` of `total`.
    pub fn theta(&self, t: usize, total: usize) -> f64 {
        2.0 * PI * progress(t, total)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_levy_lambda(self.levy_lambda)?;
        check_positive("levy_alpha", self.levy_alpha)?;
        if let Some(limit) = self.step_limit {
            check_positive("step_limit", limit)?;
        }
        check_unit("prey_prob", self.prey_prob)?;
        check_unit("attack_weight", self.attack_weight)?;
        if let OddDimensionRule::LinearConvergence { coefficient } = self.odd_rule {
            check_positive("odd_rule.coefficient", coefficient)?;
        }
        Ok(())
    }
}

/// Lévy / rotation / attack strategy.
#[derive(Debug, Clone)]
pub struct Lscbo {
    params: LscboParams,
    levy: LevySampler,
}

impl Lscbo {
    pub const NAME: &'static str = "LSCBO";

    /// Validates `params` and precomputes the Lévy σ_u.
    pub fn new(params: LscboParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let levy = LevySampler::with_gamma(params.levy_lambda, params.gamma_method);
        Ok(Self { params, levy })
    }

    pub fn params(&self) -> &LscboParams {
        &self.params
    }

    fn levy_step<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.params.step_limit {
            Some(limit) => self.levy.sample_clamped(rng, limit),
            None => self.levy.sample(rng),
        }
    }

    fn pick_prey<R: Rng>(&self, population: &Population, rng: &mut R) -> usize {
        if rng.random_range(0.0..1.0) < self.params.prey_prob {
            population.best_index()
        } else {
            rng.random_range(0..population.size())
        }
    }

    /// `out = x + α·L·(prey − x)` per coordinate.
    fn levy_search<R: Rng>(
        &self,
        population: &Population,
        i: usize,
        alpha: f64,
        out: &mut [f64],
        rng: &mut R,
    ) {
        let prey = population.position(self.pick_prey(population, rng));
        let current = population.position(i);
        for (d, y) in out.iter_mut().enumerate() {
            let step = self.levy_step(rng);
            *y = current[d] + alpha * step * (prey[d] - current[d]);
        }
    }

    /// Sequential rotation: swing `y` around the best in place.
    fn rotate_around_best<R: Rng>(
        &self,
        y: &mut [f64],
        best: &[f64],
        t: usize,
        total: usize,
        rng: &mut R,
    ) {
        let theta = self.params.theta(t, total);
        let m = y.len();
        for d in (0..m.saturating_sub(1)).step_by(2) {
            let (a, b) = rotate_pair(y[d], y[d + 1], best[d], best[d + 1], theta);
            y[d] = a;
            y[d + 1] = b;
        }
        if m % 2 == 1 {
            let last = m - 1;
            y[last] = self.params.odd_rule.apply(y[last], best[last], t, total, rng);
        }
    }

    /// Phased rotation: `out = x + R(θ)·(best − x)` per coordinate pair.
    fn rotate_towards_best<R: Rng>(
        &self,
        current: &[f64],
        best: &[f64],
        t: usize,
        total: usize,
        out: &mut [f64],
        rng: &mut R,
    ) {
        let theta = self.params.theta(t, total);
        let m = out.len();
        for d in (0..m.saturating_sub(1)).step_by(2) {
            let (a, b) = rotate(best[d] - current[d], best[d + 1] - current[d + 1], theta);
            out[d] = current[d] + a;
            out[d + 1] = current[d + 1] + b;
        }
        if m % 2 == 1 {
            let last = m - 1;
            out[last] = self
                .params
                .odd_rule
                .apply(current[last], best[last], t, total, rng);
        }
    }

    fn attack(&self, base: &mut [f64], best: &[f64]) {
        let w = self.params.attack_weight;
        for (y, &b) in base.iter_mut().zip(best) {
            *y = w * *y + (1.0 - w) * b;
        }
    }
}

impl Strategy for Lscbo {
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
        let alpha = self.params.alpha(iteration, total_iterations);
        let phase = progress(iteration, total_iterations);
        let mut candidate = vec![0.0; population.dimension()];

        for i in 0..population.size() {
            match self.params.mode {
                LscboMode::Sequential => {
                    self.levy_search(population, i, alpha, &mut candidate, rng);
                    clamp_slice(&mut candidate, bounds);

                    let best = population.best_position();
                    self.rotate_around_best(&mut candidate, best, iteration, total_iterations, rng);
                    clamp_slice(&mut candidate, bounds);

                    self.attack(&mut candidate, best);
                }
                LscboMode::Phased if phase < SEARCH_PHASE_END => {
                    self.levy_search(population, i, alpha, &mut candidate, rng);
                }
                LscboMode::Phased if phase < ENCIRCLE_PHASE_END => {
                    self.rotate_towards_best(
                        population.position(i),
                        population.best_position(),
                        iteration,
                        total_iterations,
                        &mut candidate,
                        rng,
                    );
                }
                LscboMode::Phased => {
                    candidate.copy_from_slice(population.position(i));
                    self.attack(&mut candidate, population.best_position());
                }
            }
            clamp_slice(&mut candidate, bounds);

            let fitness = objective.evaluate(&candidate);
            population.accept_if_better(i, &candidate, fitness);
        }
    }
}
