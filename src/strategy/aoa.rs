//! Arithmetic Optimization Algorithm (AOA).
//!
//! Candidates are built coordinate by coordinate from the global best and a
//! random peer using the four arithmetic operators. Two schedules steer the
//! search:
//!
//! ```text
//! MOA(t) = MOA_min + t·(MOA_max − MOA_min)/T     explore/exploit switch
//! MOP(t) = 1 − (t/T)^(1/α)                        operator magnitude
//! ```
//!
//! With `r1 > MOA` a coordinate explores (division or multiplication),
//! otherwise it exploits (subtraction or addition).
//!
//! # References
//!
//! Abualigah et al. (2021), "The arithmetic optimization algorithm",
//! *Comput. Methods Appl. Mech. Eng.* 376, 113609

use super::{check_positive, check_unit, progress, Strategy};
use crate::error::ConfigError;
use crate::fitness::Objective;
use crate::operators::clamp;
use crate::population::Population;
use rand::Rng;

/// Operator-choice threshold inside each phase.
const OPERATOR_SPLIT: f64 = 0.5;

/// Applies one arithmetic operator to `best_d` and the scaled peer value.
///
/// `guard` is added to the divisor so a zero peer never divides by zero.
#[inline]
pub(crate) fn arithmetic_operator(
    explore: bool,
    split: bool,
    best_d: f64,
    scaled: f64,
    guard: f64,
) -> f64 {
    match (explore, split) {
        (true, true) => best_d / (scaled + guard),
        (true, false) => best_d * scaled,
        (false, true) => best_d - scaled,
        (false, false) => best_d + scaled,
    }
}

/// AOA parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoaParams {
    /// MOA at `t = 0`.
    pub moa_min: f64,

    /// MOA at `t = T`.
    pub moa_max: f64,

    /// Sensitivity exponent of the MOP schedule.
    pub alpha: f64,

    /// Guard added (twice) to the division operator's divisor.
    pub epsilon: f64,
}

impl Default for AoaParams {
    fn default() -> Self {
        Self {
            moa_min: 0.2,
            moa_max: 1.0,
            alpha: 5.0,
            epsilon: 1e-6,
        }
    }
}

impl AoaParams {
    pub fn with_moa_range(mut self, min: f64, max: f64) -> Self {
        self.moa_min = min;
        self.moa_max = max;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Math Optimizer Accelerated at iteration `t` of `total`.
    pub fn moa(&self, t: usize, total: usize) -> f64 {
        self.moa_min + progress(t, total) * (self.moa_max - self.moa_min)
    }

    /// Math Optimizer Probability at iteration `t` of `total`.
    pub fn mop(&self, t: usize, total: usize) -> f64 {
        1.0 - progress(t, total).powf(1.0 / self.alpha)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("moa_min", self.moa_min)?;
        check_unit("moa_max", self.moa_max)?;
        if self.moa_min > self.moa_max {
            return Err(ConfigError::parameter("moa_min", "must not exceed moa_max"));
        }
        check_positive("alpha", self.alpha)?;
        check_positive("epsilon", self.epsilon)
    }
}

/// Arithmetic Optimization Algorithm strategy.
#[derive(Debug, Clone)]
pub struct Aoa {
    params: AoaParams,
}

impl Aoa {
    pub const NAME: &'static str = "AOA";

    pub fn new(params: AoaParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &AoaParams {
        &self.params
    }
}

impl Strategy for Aoa {
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
        let moa = self.params.moa(iteration, total_iterations);
        let mop = self.params.mop(iteration, total_iterations);
        let guard = 2.0 * self.params.epsilon;
        let bounds = population.bounds();
        let size = population.size();
        let mut candidate = vec![0.0; population.dimension()];

        for i in 0..size {
            let best = population.best_position();
            for (d, slot) in candidate.iter_mut().enumerate() {
                let explore = rng.random_range(0.0..1.0) > moa;
                let split = rng.random_range(0.0..1.0) > OPERATOR_SPLIT;
                let peer = population.position(rng.random_range(0..size))[d];
                let x = arithmetic_operator(explore, split, best[d], mop * peer, guard);
                *slot = clamp(x, bounds.lower, bounds.upper);
            }

            let fitness = objective.evaluate(&candidate);
            population.accept_if_better(i, &candidate, fitness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Bounds;
    use crate::strategy::testing;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Sum of coordinates; the origin is the unique minimum on `[0, 1]^m`.
    struct Sum(usize);

    impl Objective for Sum {
        fn dimension(&self) -> usize {
            self.0
        }
        fn evaluate(&self, x: &[f64]) -> f64 {
            x.iter().sum()
        }
    }

    #[test]
    fn test_schedules() {
        let p = AoaParams::default();
        assert!((p.moa(0, 100) - 0.2).abs() < 1e-12);
        assert!((p.moa(50, 100) - 0.6).abs() < 1e-12);
        assert!((p.moa(100, 100) - 1.0).abs() < 1e-12);
        assert!((p.mop(0, 100) - 1.0).abs() < 1e-12);
        assert!(p.mop(100, 100).abs() < 1e-12);
        assert!((p.mop(32, 100) - (1.0 - 0.32f64.powf(0.2))).abs() < 1e-12);
    }

    #[test]
    fn test_mop_decreasing() {
        let p = AoaParams::default();
        let values: Vec<f64> = (0..=10).map(|t| p.mop(t, 10)).collect();
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_validate() {
        assert!(AoaParams::default().validate().is_ok());
        assert!(AoaParams::default().with_moa_range(0.9, 0.1).validate().is_err());
        assert!(AoaParams::default().with_alpha(-1.0).validate().is_err());
        assert!(AoaParams::default().with_epsilon(0.0).validate().is_err());
        assert!(Aoa::new(AoaParams::default().with_alpha(f64::NAN)).is_err());
    }

    #[test]
    fn test_division_guard_on_zero_peer() {
        let guard = 2.0 * AoaParams::default().epsilon;
        for best_d in [0.0, 0.7, 1.0] {
            let x = arithmetic_operator(true, true, best_d, 0.0, guard);
            assert!(x.is_finite(), "division produced {x}");
            let clamped = clamp(x, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&clamped));
        }
        assert_eq!(arithmetic_operator(true, true, 0.0, 0.0, guard), 0.0);
    }

    #[test]
    fn test_step_with_all_zero_peers() {
        let objective = Sum(6);
        let mut rng = StdRng::seed_from_u64(13);
        let mut pop = Population::initialize_random(10, 6, Bounds::unit(), &mut rng);
        pop.evaluate_all(&objective);
        let zeros = vec![0.0; 6];
        for i in 0..pop.size() {
            pop.accept_if_better(i, &zeros, 0.0);
        }

        // t = 0 gives MOP = 1, so every divisor is exactly the guard.
        let aoa = Aoa::new(AoaParams::default()).unwrap();
        assert_eq!(aoa.params().mop(0, 10), 1.0);
        aoa.step(0, 10, &mut pop, &objective, &mut rng);

        for i in 0..pop.size() {
            assert!(pop
                .position(i)
                .iter()
                .all(|&x| x.is_finite() && (0.0..=1.0).contains(&x)));
            assert_eq!(pop.fitness(i), 0.0);
        }
        assert_eq!(pop.best_fitness(), 0.0);
    }

    #[test]
    fn test_step_invariants() {
        let aoa = Aoa::new(AoaParams::default()).unwrap();
        assert_eq!(aoa.name(), "AOA");
        testing::check_invariants(&aoa, 20);
    }
}
