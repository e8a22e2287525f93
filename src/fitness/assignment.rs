//! Discrete job→resource assignment.

/// A total mapping from job index to resource index, with the per-resource
/// loads it induces.
///
/// Produced once per run from the global-best position; never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    resources: Vec<usize>,
    loads: Vec<f64>,
}

impl Assignment {
    pub(crate) fn new(resources: Vec<usize>, loads: Vec<f64>) -> Self {
        Self { resources, loads }
    }

    /// Resource index for each job. Length equals the job count.
    pub fn resources(&self) -> &[usize] {
        &self.resources
    }

    /// Resource assigned to `job`.
    ///
    /// # Panics
    /// Panics if `job` is out of range.
    pub fn resource_of(&self, job: usize) -> usize {
        self.resources[job]
    }

    /// Number of jobs covered.
    pub fn job_count(&self) -> usize {
        self.resources.len()
    }

    /// Total processing time on each resource.
    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    /// Completion time of the busiest resource.
    pub fn makespan(&self) -> f64 {
        self.loads.iter().copied().fold(0.0, f64::max)
    }

    /// Jobs placed on `resource`, in job order.
    pub fn jobs_on(&self, resource: usize) -> Vec<usize> {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, &r)| r == resource)
            .map(|(job, _)| job)
            .collect()
    }

    /// Ratio of the busiest load to the mean load (1.0 is perfectly even).
    pub fn imbalance(&self) -> f64 {
        let mean = self.loads.iter().sum::<f64>() / self.loads.len() as f64;
        if mean <= 0.0 {
            return 1.0;
        }
        self.makespan() / mean
    }

    /// Consumes the assignment, returning the job→resource vector.
    pub fn into_resources(self) -> Vec<usize> {
        self.resources
    }
}
