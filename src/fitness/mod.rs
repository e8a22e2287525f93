//! Decode-and-score fitness evaluation.
//!
//! A candidate is a vector in `[0, 1]^M`. Coordinate `d` selects the
//! resource for job `d` by uniform bucketing, and the candidate's fitness is
//! the makespan of the resulting assignment: the largest total processing
//! time any single resource accumulates.
//!
//! [`Objective`] is the seam between the search core and the problem. The
//! assignment problem is [`MakespanEvaluator`]; continuous benchmark
//! functions plug in by implementing the same trait.

mod assignment;
mod providers;

pub use assignment::Assignment;
pub use providers::{JobSizeProvider, ResourceRateProvider};

use crate::error::ConfigError;

/// A function to minimize over a continuous box.
///
/// Implementations must be pure: identical input always yields identical
/// output. Lower is better.
///
/// # Examples
///
/// ```
/// use u_swarm::fitness::Objective;
///
/// struct Sphere(usize);
///
/// impl Objective for Sphere {
///     fn dimension(&self) -> usize { self.0 }
///     fn evaluate(&self, x: &[f64]) -> f64 { x.iter().map(|v| v * v).sum() }
/// }
///
/// assert_eq!(Sphere(2).evaluate(&[3.0, 4.0]), 25.0);
/// ```
pub trait Objective: Send + Sync {
    /// Number of decision variables.
    fn dimension(&self) -> usize;

    /// Scores a position. Lower is better.
    fn evaluate(&self, position: &[f64]) -> f64;
}

/// Maps a unit-interval coordinate to a bucket index in `[0, buckets)`.
///
/// `floor(x · buckets)` clamped so that `x == 1.0` lands in the last
/// bucket and negative or `NaN` input lands in bucket 0.
///
/// # Panics
/// Panics if `buckets == 0`.
#[inline]
pub fn discretize(x: f64, buckets: usize) -> usize {
    assert!(buckets > 0, "cannot discretize into zero buckets");
    let idx = (x * buckets as f64).floor();
    if idx >= buckets as f64 {
        buckets - 1
    } else if idx > 0.0 {
        idx as usize
    } else {
        0
    }
}

/// Makespan of a job→resource assignment encoded as a `[0, 1]^M` vector.
///
/// Job `d` runs on resource `discretize(x_d, N)` and takes
/// `job_sizes[d] / resource_rates[r]` time units. Jobs on the same resource
/// run back to back; the fitness is the busiest resource's total.
///
/// # Examples
///
/// ```
/// use u_swarm::fitness::{MakespanEvaluator, Objective};
///
/// let eval = MakespanEvaluator::new(vec![100.0, 100.0], vec![1.0, 2.0]).unwrap();
/// // job 0 → resource 0 (100 / 1), job 1 → resource 1 (100 / 2)
/// assert_eq!(eval.evaluate(&[0.1, 0.9]), 100.0);
/// // both on resource 1
/// assert_eq!(eval.evaluate(&[0.6, 1.0]), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct MakespanEvaluator {
    job_sizes: Vec<f64>,
    resource_rates: Vec<f64>,
}

impl MakespanEvaluator {
    /// Builds an evaluator after validating both descriptor sets.
    ///
    /// # Errors
    /// - [`ConfigError::NoJobs`] / [`ConfigError::NoResources`] on empty input
    /// - [`ConfigError::InvalidJobSize`] / [`ConfigError::InvalidResourceRate`]
    ///   on a non-positive or non-finite entry
    pub fn new(job_sizes: Vec<f64>, resource_rates: Vec<f64>) -> Result<Self, ConfigError> {
        validate_descriptors(&job_sizes, &resource_rates)?;
        Ok(Self {
            job_sizes,
            resource_rates,
        })
    }

    /// Builds an evaluator from external descriptor providers.
    pub fn from_providers<J, R>(jobs: &J, resources: &R) -> Result<Self, ConfigError>
    where
        J: JobSizeProvider + ?Sized,
        R: ResourceRateProvider + ?Sized,
    {
        Self::new(jobs.job_sizes().to_vec(), resources.resource_rates().to_vec())
    }

    pub fn job_count(&self) -> usize {
        self.job_sizes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resource_rates.len()
    }

    pub fn job_sizes(&self) -> &[f64] {
        &self.job_sizes
    }

    pub fn resource_rates(&self) -> &[f64] {
        &self.resource_rates
    }

    /// Discretizes a position into a resource index per job.
    ///
    /// # Errors
    /// [`ConfigError::DimensionMismatch`] unless `position` has one
    /// coordinate per job.
    pub fn decode(&self, position: &[f64]) -> Result<Vec<usize>, ConfigError> {
        self.check_dimension(position.len())?;
        let n = self.resource_count();
        Ok(position.iter().map(|&x| discretize(x, n)).collect())
    }

    /// Total processing time per resource for a discrete assignment.
    ///
    /// # Errors
    /// - [`ConfigError::DimensionMismatch`] unless there is one entry per job
    /// - [`ConfigError::ResourceOutOfRange`] for an index `>= N`
    pub fn loads(&self, resources: &[usize]) -> Result<Vec<f64>, ConfigError> {
        self.check_dimension(resources.len())?;
        let n = self.resource_count();
        let mut loads = vec![0.0; n];
        for (job, &r) in resources.iter().enumerate() {
            if r >= n {
                return Err(ConfigError::ResourceOutOfRange {
                    job,
                    resource: r,
                    count: n,
                });
            }
            loads[r] += self.job_sizes[job] / self.resource_rates[r];
        }
        Ok(loads)
    }

    /// Decodes a position into an [`Assignment`] with its loads.
    ///
    /// # Errors
    /// [`ConfigError::DimensionMismatch`] unless `position` has one
    /// coordinate per job.
    pub fn assignment(&self, position: &[f64]) -> Result<Assignment, ConfigError> {
        let resources = self.decode(position)?;
        let loads = self.loads(&resources)?;
        Ok(Assignment::new(resources, loads))
    }

    fn check_dimension(&self, actual: usize) -> Result<(), ConfigError> {
        if actual == self.job_count() {
            Ok(())
        } else {
            Err(ConfigError::DimensionMismatch {
                expected: self.job_count(),
                actual,
            })
        }
    }
}

impl Objective for MakespanEvaluator {
    fn dimension(&self) -> usize {
        self.job_count()
    }

    /// # Panics
    /// Panics unless `position` has one coordinate per job. Use
    /// [`MakespanEvaluator::assignment`] for a checked decode.
    fn evaluate(&self, position: &[f64]) -> f64 {
        assert_eq!(
            position.len(),
            self.job_count(),
            "position must have one coordinate per job"
        );
        let n = self.resource_count();
        let mut loads = vec![0.0; n];
        for (job, &x) in position.iter().enumerate() {
            let r = discretize(x, n);
            loads[r] += self.job_sizes[job] / self.resource_rates[r];
        }
        loads.into_iter().fold(0.0, f64::max)
    }
}

pub(crate) fn validate_descriptors(
    job_sizes: &[f64],
    resource_rates: &[f64],
) -> Result<(), ConfigError> {
    if job_sizes.is_empty() {
        return Err(ConfigError::NoJobs);
    }
    if resource_rates.is_empty() {
        return Err(ConfigError::NoResources);
    }
    if let Some((index, &value)) = job_sizes
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(ConfigError::InvalidJobSize { index, value });
    }
    if let Some((index, &value)) = resource_rates
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(ConfigError::InvalidResourceRate { index, value });
    }
    Ok(())
}
