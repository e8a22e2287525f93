//! Stateless numeric primitives shared by every search strategy.
//!
//! All functions are pure over their arguments and the caller's random
//! stream. Strategies compose them into position updates; nothing here
//! touches a population.
//!
//! # Primitives
//!
//! - [`clamp`] / [`clamp_slice`]: keep positions inside the search domain
//! - [`LevySampler`]: heavy-tailed Lévy-flight steps (Mantegna's method)
//! - [`rotate`] / [`rotate_pair`]: 2D rotation of coordinate pairs
//! - [`spiral_radius`]: logarithmic-spiral radius `exp(b·θ)`
//! - [`gamma`] / [`stirling_gamma`]: Gamma function evaluation
//!
//! # References
//!
//! - Mantegna (1994), "Fast, accurate algorithm for numerical simulation of
//!   Lévy stable stochastic processes", *Phys. Rev. E* 49(5), 4677–4683
//! - Lanczos (1964), "A Precision Approximation of the Gamma Function"

use crate::population::Bounds;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

/// Additive guard on `|v|` in the Lévy denominator.
const LEVY_EPSILON: f64 = 1e-10;

// ============================================================================
// Domain bounds
// ============================================================================

/// Clamps `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`], a `NaN` input maps to `lo` instead of propagating,
/// so a degenerate update can never leave the domain.
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Clamps every coordinate of `position` into `bounds`.
pub fn clamp_slice(position: &mut [f64], bounds: Bounds) {
    for x in position.iter_mut() {
        *x = clamp(*x, bounds.lower, bounds.upper);
    }
}

// ============================================================================
// Random draws
// ============================================================================

/// Draws from the standard normal distribution `N(0, 1)`.
#[inline]
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

// ============================================================================
// Gamma function
// ============================================================================

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function Γ(x) via the Lanczos approximation (g = 7, n = 9).
///
/// Uses the reflection formula `Γ(x)Γ(1−x) = π / sin(πx)` for `x < 0.5`.
/// Relative error is below 1e-13 over the positive reals used here.
/// Returns an infinite or `NaN` value at the poles (non-positive integers).
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, &c)| acc + c / (x + i as f64));
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
}

/// Stirling-style Gamma approximation with exact half-integer anchors.
///
/// Returns exact values for `x ∈ {0.5, 1, 1.5, 2}` and
/// `sqrt(2π/x)·(x/e)^x` otherwise. Coarser than [`gamma`]; the default
/// for [`HhoParams`](crate::strategy::HhoParams) and
/// [`EdcboParams`](crate::strategy::EdcboParams).
pub fn stirling_gamma(x: f64) -> f64 {
    if x == 0.5 {
        PI.sqrt()
    } else if x == 1.0 || x == 2.0 {
        1.0
    } else if x == 1.5 {
        0.5 * PI.sqrt()
    } else {
        (2.0 * PI / x).sqrt() * (x / std::f64::consts::E).powf(x)
    }
}

/// Which Gamma evaluator to use when precomputing Lévy σ_u.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GammaMethod {
    /// Accurate Lanczos evaluation ([`gamma`]).
    #[default]
    Lanczos,
    /// Stirling approximation with exact anchors ([`stirling_gamma`]).
    Stirling,
}

impl GammaMethod {
    /// Evaluates Γ(x) with this method.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            GammaMethod::Lanczos => gamma(x),
            GammaMethod::Stirling => stirling_gamma(x),
        }
    }
}

// ============================================================================
// Lévy flight
// ============================================================================

/// Lévy-flight step sampler using Mantegna's method.
///
/// `σ_u` is computed once at construction:
///
/// ```text
/// σ_u = [ Γ(1+λ)·sin(πλ/2) / (Γ((1+λ)/2)·λ·2^((λ−1)/2)) ]^(1/λ)
/// ```
///
/// Each [`sample`](LevySampler::sample) draws `u ~ N(0, σ_u²)` and
/// `v ~ N(0, 1)` and returns `u / (|v| + ε)^(1/λ)` with `ε = 1e-10`, so a
/// zero `v` yields a large finite step rather than infinity.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_swarm::operators::LevySampler;
///
/// let levy = LevySampler::new(1.5);
/// assert!((levy.sigma_u() - 0.6966).abs() < 1e-3);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let step = levy.sample(&mut rng);
/// assert!(step.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevySampler {
    lambda: f64,
    sigma_u: f64,
}

impl LevySampler {
    /// Creates a sampler with stability index `lambda`, using Lanczos Gamma.
    ///
    /// # Panics
    /// Panics if `lambda` is not in `(0, 2]`.
    pub fn new(lambda: f64) -> Self {
        Self::with_gamma(lambda, GammaMethod::Lanczos)
    }

    /// Creates a sampler with an explicit Gamma evaluator.
    ///
    /// # Panics
    /// Panics if `lambda` is not in `(0, 2]`.
    pub fn with_gamma(lambda: f64, method: GammaMethod) -> Self {
        assert!(
            lambda > 0.0 && lambda <= 2.0,
            "Lévy lambda must be in (0, 2], got {lambda}"
        );
        let numerator = method.eval(1.0 + lambda) * (PI * lambda / 2.0).sin();
        let denominator =
            method.eval((1.0 + lambda) / 2.0) * lambda * 2f64.powf((lambda - 1.0) / 2.0);
        let sigma_u = (numerator / denominator).powf(1.0 / lambda);
        Self { lambda, sigma_u }
    }

    /// Stability index λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Precomputed scale of the numerator normal draw.
    pub fn sigma_u(&self) -> f64 {
        self.sigma_u
    }

    /// Draws one Lévy step, `u / (|v| + 1e-10)^(1/λ)`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let u = standard_normal(rng) * self.sigma_u;
        let v = standard_normal(rng);
        mantegna_ratio(u, v, self.lambda)
    }

    /// Draws one Lévy step truncated to `[-limit, limit]`.
    pub fn sample_clamped<R: Rng>(&self, rng: &mut R, limit: f64) -> f64 {
        clamp(self.sample(rng), -limit, limit)
    }

    /// Fills `out` with independent Lévy steps.
    pub fn fill<R: Rng>(&self, rng: &mut R, out: &mut [f64]) {
        for s in out.iter_mut() {
            *s = self.sample(rng);
        }
    }
}

/// `u / (|v| + ε)^(1/λ)`.
#[inline]
fn mantegna_ratio(u: f64, v: f64, lambda: f64) -> f64 {
    u / (v.abs() + LEVY_EPSILON).powf(1.0 / lambda)
}

// ============================================================================
// Geometric operators
// ============================================================================

/// Rotates the vector `(dx, dy)` by `theta` radians.
#[inline]
pub fn rotate(dx: f64, dy: f64, theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Rotates the point `(x, y)` by `theta` around the centre `(cx, cy)`.
///
/// Used to swing a pair of adjacent coordinates around the global best.
#[inline]
pub fn rotate_pair(x: f64, y: f64, cx: f64, cy: f64, theta: f64) -> (f64, f64) {
    let (rx, ry) = rotate(x - cx, y - cy, theta);
    (cx + rx, cy + ry)
}

/// Logarithmic-spiral radius `exp(b·θ)`.
#[inline]
pub fn spiral_radius(b: f64, theta: f64) -> f64 {
    (b * theta).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mantegna_ratio_guards_zero_denominator() {
        let step = mantegna_ratio(1.0, 0.0, 1.5);
        assert!(step.is_finite());
        assert_eq!(step, 1.0 / LEVY_EPSILON.powf(1.0 / 1.5));
        assert_eq!(mantegna_ratio(0.5, -1.0, 2.0), 0.5 / (1.0 + LEVY_EPSILON).sqrt());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(f64::INFINITY, -5.0, 5.0), 5.0);
    }

    #[test]
    fn test_clamp_slice() {
        let mut xs = vec![-3.0, 0.5, 7.0];
        clamp_slice(&mut xs, Bounds::new(-1.0, 1.0));
        assert_eq!(xs, vec![-1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_gamma_known_values() {
        assert!((gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((gamma(5.0) - 24.0).abs() < 1e-9);
        assert!((gamma(0.5) - PI.sqrt()).abs() < 1e-12);
        assert!((gamma(2.5) - 1.329_340_388_179_137).abs() < 1e-12);
        assert!((gamma(1.25) - 0.906_402_477_055_477).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_reflection() {
        // Γ(-0.5) = -2·sqrt(π)
        assert!((gamma(-0.5) + 2.0 * PI.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_stirling_anchors() {
        assert_eq!(stirling_gamma(1.0), 1.0);
        assert_eq!(stirling_gamma(2.0), 1.0);
        assert!((stirling_gamma(0.5) - PI.sqrt()).abs() < 1e-15);
        assert!((stirling_gamma(1.5) - 0.5 * PI.sqrt()).abs() < 1e-15);
        // Off-anchor values are approximate but in the right neighbourhood
        let approx = stirling_gamma(2.5);
        assert!((approx - gamma(2.5)).abs() < 0.1);
    }

    #[test]
    fn test_levy_sigma_lanczos() {
        let levy = LevySampler::new(1.5);
        assert!((levy.sigma_u() - 0.696_574_502_557_697_5).abs() < 1e-9);
        assert_eq!(levy.lambda(), 1.5);
    }

    #[test]
    fn test_levy_sigma_stirling_differs() {
        let accurate = LevySampler::new(1.5);
        let coarse = LevySampler::with_gamma(1.5, GammaMethod::Stirling);
        assert!(coarse.sigma_u() > 0.0);
        assert!((coarse.sigma_u() - accurate.sigma_u()).abs() > 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_levy_rejects_bad_lambda() {
        let _ = LevySampler::new(2.5);
    }

    #[test]
    fn test_levy_clamped() {
        let levy = LevySampler::new(1.5);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let s = levy.sample_clamped(&mut rng, 1.0);
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_levy_deterministic() {
        let levy = LevySampler::new(1.5);
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let mut xs = [0.0; 16];
        let mut ys = [0.0; 16];
        levy.fill(&mut a, &mut xs);
        levy.fill(&mut b, &mut ys);
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (x, y) = rotate(1.0, 0.0, PI / 2.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_pair_preserves_distance() {
        let (x, y) = rotate_pair(0.9, 0.2, 0.5, 0.5, 1.234);
        let before = ((0.9f64 - 0.5).powi(2) + (0.2f64 - 0.5).powi(2)).sqrt();
        let after = ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt();
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let (x, y) = rotate_pair(0.3, 0.7, 0.1, 0.4, 2.0 * PI);
        assert!((x - 0.3).abs() < 1e-12);
        assert!((y - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_spiral_radius() {
        assert_eq!(spiral_radius(0.5, 0.0), 1.0);
        assert!((spiral_radius(0.5, 2.0) - 1f64.exp()).abs() < 1e-12);
    }
}
