//! Convergence recording.
//!
//! A [`ConvergenceTrace`] is the append-only history of the global-best
//! fitness: one point for the initial population (iteration 0) and one per
//! completed iteration. Because the global best only improves, the recorded
//! fitness sequence is non-increasing. Export to files is left to callers;
//! with the `serde` feature the trace serializes directly.

/// One recorded iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracePoint {
    pub iteration: usize,
    pub best_fitness: f64,
}

/// Append-only `(iteration, best fitness)` log of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceTrace {
    algorithm: String,
    label: Option<String>,
    seed: u64,
    points: Vec<TracePoint>,
}

impl ConvergenceTrace {
    /// Creates an empty trace for `algorithm` run with `seed`.
    pub fn new(algorithm: impl Into<String>, seed: u64) -> Self {
        Self {
            algorithm: algorithm.into(),
            label: None,
            seed,
            points: Vec::new(),
        }
    }

    /// Pre-allocates room for `iterations + 1` points.
    pub fn with_capacity(algorithm: impl Into<String>, seed: u64, iterations: usize) -> Self {
        let mut trace = Self::new(algorithm, seed);
        trace.points.reserve(iterations.saturating_add(1));
        trace
    }

    /// Attaches a free-form label such as a problem-scale tag (`"M100"`).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Appends a point.
    ///
    /// # Panics
    /// Panics (in debug builds) if `iteration` does not follow the previous
    /// point.
    pub fn record(&mut self, iteration: usize, best_fitness: f64) {
        debug_assert!(
            self.points
                .last()
                .is_none_or(|p| p.iteration < iteration),
            "iterations must be recorded in increasing order"
        );
        self.points.push(TracePoint {
            iteration,
            best_fitness,
        });
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fitness values in iteration order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.best_fitness).collect()
    }

    /// Fitness after initialization.
    pub fn initial_fitness(&self) -> Option<f64> {
        self.points.first().map(|p| p.best_fitness)
    }

    /// Fitness after the last recorded iteration.
    pub fn final_fitness(&self) -> Option<f64> {
        self.points.last().map(|p| p.best_fitness)
    }

    /// Whether fitness never increases between consecutive points.
    pub fn is_monotone(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].best_fitness <= w[0].best_fitness)
    }

    /// Relative improvement from the first to the last point.
    ///
    /// Returns 0.0 for an empty trace or a zero initial fitness.
    pub fn improvement_ratio(&self) -> f64 {
        match (self.initial_fitness(), self.final_fitness()) {
            (Some(first), Some(last)) if first.abs() > 0.0 => (first - last) / first.abs(),
            _ => 0.0,
        }
    }

    /// First iteration at which the final best fitness was reached.
    pub fn iteration_of_best(&self) -> Option<usize> {
        let best = self.final_fitness()?;
        self.points
            .iter()
            .find(|p| p.best_fitness <= best)
            .map(|p| p.iteration)
    }
}
