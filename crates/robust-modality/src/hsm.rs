//! Half-sample mode (HSM)
//!
//! Bickel and Frühwirth's recursive estimator: repeatedly keep the shortest
//! window holding half of the remaining observations until only
//! `min_interval` of them are left, then take the midpoint of that window.

use crate::interval::modal_search;
use crate::traits::LocationEstimator;
use crate::types::ModeEstimate;
use robust_core::utils::sorted;
use robust_spread::quartile_coefficient;

/// Half-sample mode estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSampleMode {
    min_interval: usize,
}

impl Default for HalfSampleMode {
    fn default() -> Self {
        Self { min_interval: 2 }
    }
}

impl HalfSampleMode {
    /// Create an estimator that stops at two observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size of the final window
    ///
    /// # Panics
    /// Panics if `min_interval` is zero.
    pub fn with_min_interval(mut self, min_interval: usize) -> Self {
        assert!(min_interval > 0, "Minimum interval must be at least 1");
        self.min_interval = min_interval;
        self
    }

    /// Size of the final window
    pub fn min_interval(&self) -> usize {
        self.min_interval
    }

    /// Estimate the mode of an already sorted sample
    ///
    /// `variation` is the quartile coefficient of the first half-sample
    /// window (or of the whole sample when it is already no larger than the
    /// final window).
    ///
    /// # Panics
    /// Panics on an empty sample.
    pub fn estimate_sorted(&self, sorted: &[f64]) -> ModeEstimate {
        assert!(!sorted.is_empty(), "Half-sample mode of an empty sample");
        if sorted.len() == 1 {
            return ModeEstimate::new(sorted[0], (0, 0), 0.0);
        }

        let mut lo = 0;
        let mut size = sorted.len();
        let mut variation = None;
        while size > self.min_interval {
            let k = size.div_ceil(2).max(self.min_interval);
            let (l, h) = modal_search(&sorted[lo..lo + size], k);
            if variation.is_none() {
                variation = Some(quartile_coefficient(sorted[lo + l], sorted[lo + h]));
            }
            lo += l;
            size = k;
        }

        let hi = lo + size - 1;
        let variation = variation.unwrap_or_else(|| quartile_coefficient(sorted[lo], sorted[hi]));
        ModeEstimate::new((sorted[lo] + sorted[hi]) / 2.0, (lo, hi), variation)
    }
}

impl LocationEstimator for HalfSampleMode {
    fn name(&self) -> &str {
        "hsm"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        self.estimate_sorted(&sorted(sample))
    }
}

/// Half-sample mode with the default final window of two observations
pub fn hsm(sample: &[f64]) -> ModeEstimate {
    HalfSampleMode::default().estimate(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_vectors() {
        let mode = hsm(&[4.0, 5.0]);
        assert_eq!(mode.value, 4.5);
        assert_eq!(mode.bound, (0, 1));

        let mode = hsm(&[3.0, 10.0, 11.0]);
        assert_eq!(mode.value, 10.5);
        assert_eq!(mode.bound, (1, 2));

        let mode = hsm(&[3.0, 4.0, 11.0]);
        assert_eq!(mode.value, 3.5);
        assert_eq!(mode.bound, (0, 1));
    }

    #[test]
    fn test_unsorted_input() {
        let mode = hsm(&[11.0, 3.0, 10.0]);
        assert_eq!(mode.value, 10.5);
        assert_eq!(mode.bound, (1, 2));
    }

    #[test]
    fn test_single_observation() {
        let mode = hsm(&[42.0]);
        assert_eq!(mode.value, 42.0);
        assert_eq!(mode.bound, (0, 0));
        assert_eq!(mode.variation, 0.0);
    }

    #[test]
    fn test_variation_of_first_window() {
        // First half-sample window is [10, 11]
        let mode = hsm(&[3.0, 10.0, 11.0]);
        assert_relative_eq!(mode.variation, 1.0 / 21.0);
    }

    #[test]
    fn test_converges_on_dense_cluster() {
        let data = [1.0, 9.8, 9.9, 10.0, 10.0, 10.1, 10.2, 25.0, 40.0];
        let mode = hsm(&data);
        assert!((9.8..=10.2).contains(&mode.value), "mode {}", mode.value);
        assert_eq!(mode.support(), 2);
    }

    #[test]
    fn test_mode_stays_in_dense_pair() {
        // Two equally tight pairs separated by a gap
        let mode = hsm(&[0.0, 1.0, 5.0, 6.0]);
        assert_eq!(mode.value, 0.5);
        assert_eq!(mode.bound, (0, 1));
    }

    #[test]
    fn test_min_interval() {
        let data = [1.0, 2.0, 2.1, 2.2, 9.0];
        let mode = HalfSampleMode::new().with_min_interval(3).estimate(&data);
        assert_eq!(mode.bound, (1, 3));
        assert_relative_eq!(mode.value, 2.1);

        let single = HalfSampleMode::new().with_min_interval(1).estimate(&data);
        assert_eq!(single.support(), 1);
    }

    #[test]
    fn test_all_equal() {
        let mode = hsm(&[7.0; 6]);
        assert_eq!(mode.value, 7.0);
        assert_eq!(mode.variation, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_empty_panics() {
        hsm(&[]);
    }
}
