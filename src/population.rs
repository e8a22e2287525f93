//! Population state and elitist acceptance.
//!
//! [`Population`] owns the `P × M` position table, a per-slot fitness cache
//! and the global best. The only way a strategy can change it is
//! [`Population::accept_if_better`], which implements greedy per-slot
//! replacement with strict-improvement elitism.

use crate::error::ConfigError;
use crate::fitness::Objective;
use rand::Rng;

/// Closed box `[lower, upper]` applied to every coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Creates bounds without validation (see [`Bounds::validate`]).
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The unit interval `[0, 1]` used for assignment encoding.
    pub const fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `x` lies inside the bounds.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Requires finite bounds with `lower < upper`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unit()
    }
}

/// Pool of candidate vectors with cached fitness and global-best tracking.
///
/// # Invariants
///
/// - Every stored coordinate lies inside [`bounds`](Population::bounds).
/// - `best_fitness() <= fitness(i)` for every slot once evaluated.
/// - The global best only changes on strict improvement; equal fitness
///   never replaces it.
#[derive(Debug, Clone)]
pub struct Population {
    positions: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    best_position: Vec<f64>,
    best_fitness: f64,
    bounds: Bounds,
}

impl Population {
    /// Draws `size` individuals of `dimension` coordinates uniformly in `bounds`.
    ///
    /// Fitness values start at `+∞` until [`evaluate_all`](Population::evaluate_all).
    ///
    /// # Panics
    /// Panics if `size == 0` or `bounds` is degenerate. The driver validates
    /// both before calling.
    pub fn initialize_random<R: Rng>(
        size: usize,
        dimension: usize,
        bounds: Bounds,
        rng: &mut R,
    ) -> Self {
        assert!(size > 0, "population must not be empty");
        assert!(bounds.lower < bounds.upper, "bounds must satisfy lower < upper");

        let positions: Vec<Vec<f64>> = (0..size)
            .map(|_| {
                (0..dimension)
                    .map(|_| rng.random_range(bounds.lower..bounds.upper))
                    .collect()
            })
            .collect();

        Self {
            best_position: positions[0].clone(),
            positions,
            fitness: vec![f64::INFINITY; size],
            best_fitness: f64::INFINITY,
            bounds,
        }
    }

    /// Scores every slot and seeds the global best.
    ///
    /// Scans slots in order with strict `<`, so the first of several equally
    /// good individuals becomes the global best.
    pub fn evaluate_all<O: Objective + ?Sized>(&mut self, objective: &O) {
        for (i, position) in self.positions.iter().enumerate() {
            let f = objective.evaluate(position);
            self.fitness[i] = f;
            if f < self.best_fitness {
                self.best_fitness = f;
                self.best_position.clone_from(position);
            }
        }
    }

    /// Offers `candidate` for slot `i`.
    ///
    /// The slot is overwritten only if `candidate_fitness < fitness(i)`; the
    /// global best is then replaced only if `candidate_fitness` is also
    /// strictly below the current best. Returns whether the slot changed.
    ///
    /// # Panics
    /// Panics if `candidate` has the wrong dimension.
    pub fn accept_if_better(&mut self, i: usize, candidate: &[f64], candidate_fitness: f64) -> bool {
        assert_eq!(
            candidate.len(),
            self.dimension(),
            "candidate dimension must match population"
        );
        if candidate_fitness.is_nan() || candidate_fitness >= self.fitness[i] {
            return false;
        }
        self.positions[i].copy_from_slice(candidate);
        self.fitness[i] = candidate_fitness;
        if candidate_fitness < self.best_fitness {
            self.best_fitness = candidate_fitness;
            self.best_position.copy_from_slice(candidate);
        }
        true
    }

    /// Slot with the lowest cached fitness (lowest index on ties).
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, &f) in self.fitness.iter().enumerate().skip(1) {
            if f < self.fitness[best] {
                best = i;
            }
        }
        best
    }

    /// Number of individuals.
    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Number of coordinates per individual.
    pub fn dimension(&self) -> usize {
        self.best_position.len()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn position(&self, i: usize) -> &[f64] {
        &self.positions[i]
    }

    pub fn fitness(&self, i: usize) -> f64 {
        self.fitness[i]
    }

    pub fn positions(&self) -> &[Vec<f64>] {
        &self.positions
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Mean of coordinate `d` across all individuals.
    pub fn mean_coordinate(&self, d: usize) -> f64 {
        let sum: f64 = self.positions.iter().map(|p| p[d]).sum();
        sum / self.size() as f64
    }

    /// Per-coordinate mean position of the population.
    pub fn mean_position(&self) -> Vec<f64> {
        (0..self.dimension()).map(|d| self.mean_coordinate(d)).collect()
    }

    pub(crate) fn into_best(self) -> (Vec<f64>, f64) {
        (self.best_position, self.best_fitness)
    }
}
