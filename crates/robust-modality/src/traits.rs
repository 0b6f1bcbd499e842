//! Core traits for location estimation

use crate::types::ModeEstimate;

/// A point estimator of the location of a sample
///
/// Implementations accept unsorted input and panic on an empty sample.
pub trait LocationEstimator {
    /// Stable name of the estimator, used as an annotation key
    fn name(&self) -> &str;

    /// Estimate the location of `sample`
    fn estimate(&self, sample: &[f64]) -> ModeEstimate;
}
