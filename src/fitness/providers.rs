//! Read-only job and resource descriptors.
//!
//! The optimizer never owns the workload or the resource pool; it borrows
//! them for the duration of one run through these two traits. Plain slices
//! and vectors implement both, so most callers pass `&[f64]` directly.

/// Ordered sequence of M positive job workloads.
pub trait JobSizeProvider {
    /// Workload magnitude of each job, indexed by job.
    fn job_sizes(&self) -> &[f64];
}

/// Ordered sequence of N positive resource processing rates.
pub trait ResourceRateProvider {
    /// Processing rate of each resource, indexed by resource.
    fn resource_rates(&self) -> &[f64];
}

impl JobSizeProvider for [f64] {
    fn job_sizes(&self) -> &[f64] {
        self
    }
}

impl JobSizeProvider for Vec<f64> {
    fn job_sizes(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> JobSizeProvider for [f64; N] {
    fn job_sizes(&self) -> &[f64] {
        self
    }
}

impl<T: JobSizeProvider + ?Sized> JobSizeProvider for &T {
    fn job_sizes(&self) -> &[f64] {
        (**self).job_sizes()
    }
}

impl ResourceRateProvider for [f64] {
    fn resource_rates(&self) -> &[f64] {
        self
    }
}

impl ResourceRateProvider for Vec<f64> {
    fn resource_rates(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> ResourceRateProvider for [f64; N] {
    fn resource_rates(&self) -> &[f64] {
        self
    }
}

impl<T: ResourceRateProvider + ?Sized> ResourceRateProvider for &T {
    fn resource_rates(&self) -> &[f64] {
        (**self).resource_rates()
    }
}
