//! Core types for location estimation

use std::fmt;

/// Result of a location estimator over one sample
///
/// `bound` holds inclusive indices into the *sorted* sample delimiting the
/// window the estimate was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeEstimate {
    /// The location (center) of the mode
    pub value: f64,
    /// Inclusive sorted-sample indices of the supporting window
    pub bound: (usize, usize),
    /// Relative width of the supporting window
    pub variation: f64,
}

impl ModeEstimate {
    /// Create a new estimate
    pub fn new(value: f64, bound: (usize, usize), variation: f64) -> Self {
        Self {
            value,
            bound,
            variation,
        }
    }

    /// Number of observations in the supporting window
    pub fn support(&self) -> usize {
        self.bound.1 - self.bound.0 + 1
    }
}

impl fmt::Display for ModeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode(value={:.3}, bounds=[{}, {}], variation={:.3})",
            self.value, self.bound.0, self.bound.1, self.variation
        )
    }
}

/// Full result of the kernel-density mode search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdeMode {
    /// Sorted-sample index of the first point of maximum density
    pub index: usize,
    /// Number of points sharing the maximum density
    pub ties: usize,
    /// Sample value at `index`
    pub mode: f64,
    /// Kernel bandwidth used
    pub bandwidth: f64,
    /// Sorted-sample indices where the density falls below half its maximum
    pub half_maximum: (usize, usize),
    /// Full width at half maximum around the mode
    pub fwhm: f64,
    /// `fwhm / (2 * mode)`
    pub variation: f64,
}

impl From<KdeMode> for ModeEstimate {
    fn from(kde: KdeMode) -> Self {
        ModeEstimate::new(kde.mode, kde.half_maximum, kde.variation)
    }
}
