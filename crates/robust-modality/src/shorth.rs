//! Fixed-fraction shortest-interval estimators
//!
//! Both estimators take the shortest window holding `ceil(N * alpha)`
//! observations. [`Shorth`] reports the mean of that window through a
//! [`MomentAccumulator`], [`LeastMedianSquares`] its midpoint.

use crate::interval::modal_search;
use crate::traits::LocationEstimator;
use crate::types::ModeEstimate;
use robust_core::utils::sorted;
use robust_spread::{quartile_coefficient, LogNormalMoments, MomentAccumulator};
use std::marker::PhantomData;

/// Default coverage of the shortest window
pub const DEFAULT_COVERAGE: f64 = 0.5;

fn window_size(n: usize, alpha: f64) -> usize {
    ((n as f64 * alpha).ceil() as usize).clamp(1, n)
}

fn check_coverage(alpha: f64) {
    assert!(
        alpha > 0.0 && alpha <= 1.0,
        "Window coverage must be in (0, 1], got {alpha}"
    );
}

/// Mean of the shortest window covering a fraction `alpha` of the sample
///
/// The window is averaged with the accumulator `M`; the default log-normal
/// accumulator requires strictly positive observations.
#[derive(Debug, Clone, Copy)]
pub struct Shorth<M: MomentAccumulator = LogNormalMoments> {
    alpha: f64,
    _accumulator: PhantomData<M>,
}

impl<M: MomentAccumulator> Default for Shorth<M> {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE)
    }
}

impl<M: MomentAccumulator> Shorth<M> {
    /// Create an estimator covering a fraction `alpha` of the sample
    ///
    /// # Panics
    /// Panics unless `0 < alpha <= 1`.
    pub fn new(alpha: f64) -> Self {
        check_coverage(alpha);
        Self {
            alpha,
            _accumulator: PhantomData,
        }
    }

    /// Window coverage
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Estimate from an already sorted sample
    ///
    /// # Panics
    /// Panics on an empty sample.
    pub fn estimate_sorted(&self, sorted: &[f64]) -> ModeEstimate {
        assert!(!sorted.is_empty(), "Shorth of an empty sample");
        let (lo, hi) = modal_search(sorted, window_size(sorted.len(), self.alpha));
        let mut accumulator = M::default();
        accumulator.extend_from_slice(&sorted[lo..=hi]);
        ModeEstimate::new(
            accumulator.mean(),
            (lo, hi),
            quartile_coefficient(sorted[lo], sorted[hi]),
        )
    }
}

impl<M: MomentAccumulator> LocationEstimator for Shorth<M> {
    fn name(&self) -> &str {
        "shorth"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        self.estimate_sorted(&sorted(sample))
    }
}

/// Midpoint of the shortest window covering a fraction `alpha` of the sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastMedianSquares {
    alpha: f64,
}

impl Default for LeastMedianSquares {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE)
    }
}

impl LeastMedianSquares {
    /// Create an estimator covering a fraction `alpha` of the sample
    ///
    /// # Panics
    /// Panics unless `0 < alpha <= 1`.
    pub fn new(alpha: f64) -> Self {
        check_coverage(alpha);
        Self { alpha }
    }

    /// Estimate from an already sorted sample
    ///
    /// # Panics
    /// Panics on an empty sample.
    pub fn estimate_sorted(&self, sorted: &[f64]) -> ModeEstimate {
        assert!(!sorted.is_empty(), "LMS of an empty sample");
        let (lo, hi) = modal_search(sorted, window_size(sorted.len(), self.alpha));
        ModeEstimate::new(
            (sorted[lo] + sorted[hi]) / 2.0,
            (lo, hi),
            quartile_coefficient(sorted[lo], sorted[hi]),
        )
    }
}

impl LocationEstimator for LeastMedianSquares {
    fn name(&self) -> &str {
        "lms"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        self.estimate_sorted(&sorted(sample))
    }
}

/// Shorth with the log-normal accumulator
pub fn shorth(sample: &[f64], alpha: f64) -> ModeEstimate {
    Shorth::<LogNormalMoments>::new(alpha).estimate(sample)
}

/// Shorth averaging the window with a caller-chosen accumulator
pub fn shorth_with<M: MomentAccumulator>(sample: &[f64], alpha: f64) -> ModeEstimate {
    Shorth::<M>::new(alpha).estimate(sample)
}

/// Least-median-of-squares location
pub fn lms(sample: &[f64], alpha: f64) -> ModeEstimate {
    LeastMedianSquares::new(alpha).estimate(sample)
}
