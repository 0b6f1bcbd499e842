//! Non-robust reference estimators

use crate::traits::LocationEstimator;
use crate::types::ModeEstimate;
use robust_core::utils::{median_sorted, quantile_sorted, sorted};
use robust_spread::{coefficient_of_variation, quartile_coefficient, OnlineMoments};

/// Arithmetic mean; variation is the coefficient of variation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleMean;

impl LocationEstimator for SampleMean {
    fn name(&self) -> &str {
        "mean"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        assert!(!sample.is_empty(), "Mean of an empty sample");
        let moments = OnlineMoments::from_slice(sample);
        ModeEstimate::new(
            moments.mean(),
            (0, sample.len() - 1),
            coefficient_of_variation(moments.mean(), moments.std(1)),
        )
    }
}

/// Sample median; variation is the quartile coefficient of dispersion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleMedian;

impl LocationEstimator for SampleMedian {
    fn name(&self) -> &str {
        "median"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        assert!(!sample.is_empty(), "Median of an empty sample");
        let sorted = sorted(sample);
        let n = sorted.len();
        let bound = ((n - 1) / 2, n / 2);
        ModeEstimate::new(
            median_sorted(&sorted),
            bound,
            quartile_coefficient(quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75)),
        )
    }
}
