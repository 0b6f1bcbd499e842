//! Kernel-density mode
//!
//! Evaluates a Gaussian kernel density estimate at every sample point and
//! reports the point of maximum density with the full width at half maximum
//! (FWHM) around it. The bandwidth follows Silverman's rule of thumb or
//! minimizes the least-squares cross-validation cost by golden-section search.

use crate::traits::LocationEstimator;
use crate::types::{KdeMode, ModeEstimate};
use robust_core::math::distributions::normal;
use robust_core::utils::{quantile_sorted, sorted, std_dev};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

/// Relative tolerance for densities to count as tied with the maximum
const DENSITY_TIE_TOLERANCE: f64 = 1e-12;

/// Bandwidth selection rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// `0.9 * min(sigma, IQR / 1.34) * n^(-1/5)`
    Silverman,
    /// Least-squares cross-validation over `[0.1 h, 2 h]` around Silverman's `h`
    CrossValidated,
    /// Caller-supplied bandwidth
    Fixed(f64),
}

impl Default for Bandwidth {
    fn default() -> Self {
        Self::CrossValidated
    }
}

/// Silverman's rule-of-thumb bandwidth for a sorted sample
///
/// Falls back to the standard deviation when the IQR is zero; returns 0.0
/// for samples without spread.
pub fn silverman_bandwidth(sorted: &[f64]) -> f64 {
    let sigma = std_dev(sorted);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let spread = if iqr > 0.0 { sigma.min(iqr / 1.34) } else { sigma };
    0.9 * spread * (sorted.len() as f64).powf(-0.2)
}

/// Least-squares cross-validation cost of bandwidth `h`
///
/// `integral(f_h^2) - 2/n * sum_i f_{h,-i}(x_i)` for the Gaussian kernel,
/// which equals the integrated squared error up to a constant.
pub fn mise(sample: &[f64], h: f64) -> f64 {
    let n = sample.len() as f64;
    let mut convolved = 0.0;
    let mut leave_one_out = 0.0;
    for (i, &xi) in sample.iter().enumerate() {
        for &xj in &sample[i + 1..] {
            let u = (xi - xj) / h;
            convolved += (-u * u / 4.0).exp();
            leave_one_out += (-u * u / 2.0).exp();
        }
    }
    // Pairs were counted once; the diagonal adds n terms of exp(0) to the convolution
    let convolved = (n + 2.0 * convolved) / (n * n * h * (4.0 * PI).sqrt());
    let leave_one_out = 2.0 * leave_one_out / (n * (n - 1.0) * h * (2.0 * PI).sqrt());
    convolved - 2.0 * leave_one_out
}

/// Minimize `f` over `[lo, hi]` by golden-section search
pub fn golden_section<F: Fn(f64) -> f64>(f: F, mut lo: f64, mut hi: f64, tolerance: f64) -> f64 {
    let ratio = (5f64.sqrt() - 1.0) / 2.0;
    let mut c = hi - ratio * (hi - lo);
    let mut d = lo + ratio * (hi - lo);
    let mut fc = f(c);
    let mut fd = f(d);

    let mut iterations = 0;
    while (hi - lo).abs() > tolerance && iterations < 200 {
        if fc < fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - ratio * (hi - lo);
            fc = f(c);
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + ratio * (hi - lo);
            fd = f(d);
        }
        iterations += 1;
    }
    trace!(iterations, lo, hi, "golden-section search finished");
    (lo + hi) / 2.0
}

/// Cross-validated bandwidth for a sorted sample
pub fn cross_validated_bandwidth(sorted: &[f64]) -> f64 {
    let h = silverman_bandwidth(sorted);
    if h <= 0.0 || sorted.len() < 2 {
        return h;
    }
    golden_section(|b| mise(sorted, b), 0.1 * h, 2.0 * h, 1e-4 * h)
}

/// Gaussian kernel density of `sample` at `x`
pub fn density(sample: &[f64], h: f64, x: f64) -> f64 {
    let sum: f64 = sample.iter().map(|&xi| normal::pdf((x - xi) / h)).sum();
    sum / (sample.len() as f64 * h)
}

/// Kernel-density mode estimator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KernelDensityMode {
    bandwidth: Bandwidth,
}

impl KernelDensityMode {
    /// Create an estimator with the given bandwidth rule
    pub fn new(bandwidth: Bandwidth) -> Self {
        if let Bandwidth::Fixed(h) = bandwidth {
            assert!(h > 0.0, "Fixed bandwidth must be positive, got {h}");
        }
        Self { bandwidth }
    }

    /// Bandwidth rule in use
    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// Locate the density maximum of an already sorted sample
    ///
    /// # Panics
    /// Panics on an empty sample.
    pub fn locate_sorted(&self, sorted: &[f64]) -> KdeMode {
        assert!(!sorted.is_empty(), "KDE mode of an empty sample");
        let n = sorted.len();
        let h = match self.bandwidth {
            Bandwidth::Silverman => silverman_bandwidth(sorted),
            Bandwidth::CrossValidated => cross_validated_bandwidth(sorted),
            Bandwidth::Fixed(h) => h,
        };

        if h <= 0.0 {
            // No spread: every point is the mode
            return KdeMode {
                index: 0,
                ties: n,
                mode: sorted[0],
                bandwidth: 0.0,
                half_maximum: (0, n - 1),
                fwhm: 0.0,
                variation: 0.0,
            };
        }

        let densities: Vec<f64> = sorted.iter().map(|&x| density(sorted, h, x)).collect();
        let (index, max) = densities
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, d)| if d > best.1 { (i, d) } else { best });
        let ties = densities
            .iter()
            .filter(|&&d| (d - max).abs() <= DENSITY_TIE_TOLERANCE * max)
            .count();

        let half = max / 2.0;
        let mut left = index;
        while left > 0 && densities[left - 1] >= half {
            left -= 1;
        }
        let mut right = index;
        while right + 1 < n && densities[right + 1] >= half {
            right += 1;
        }

        let mode = sorted[index];
        let fwhm = sorted[right] - sorted[left];
        let variation = if mode == 0.0 { 0.0 } else { fwhm / (2.0 * mode.abs()) };
        KdeMode {
            index,
            ties,
            mode,
            bandwidth: h,
            half_maximum: (left, right),
            fwhm,
            variation,
        }
    }

    /// Locate the density maximum of an unsorted sample
    pub fn locate(&self, sample: &[f64]) -> KdeMode {
        self.locate_sorted(&sorted(sample))
    }
}

impl LocationEstimator for KernelDensityMode {
    fn name(&self) -> &str {
        "kde"
    }

    fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        self.locate(sample).into()
    }
}

/// Kernel-density mode with the given bandwidth rule
pub fn kde_mode(sample: &[f64], bandwidth: Bandwidth) -> KdeMode {
    KernelDensityMode::new(bandwidth).locate(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_silverman_bandwidth() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let sigma = std_dev(&data);
        // IQR with floor-index quantiles: data[7] - data[2] = 5
        let expected = 0.9 * sigma.min(5.0 / 1.34) * 10f64.powf(-0.2);
        assert_relative_eq!(silverman_bandwidth(&data), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_golden_section_parabola() {
        let x = golden_section(|x| (x - 1.7).powi(2), 0.0, 5.0, 1e-9);
        assert_relative_eq!(x, 1.7, epsilon = 1e-6);
    }

    #[test]
    fn test_cross_validated_within_search_interval() {
        let data = [1.0, 1.1, 1.3, 1.4, 1.45, 2.0, 2.2, 5.0, 5.1, 9.0];
        let h_s = silverman_bandwidth(&data);
        let h = cross_validated_bandwidth(&data);
        assert!(h >= 0.1 * h_s && h <= 2.0 * h_s, "h {h} outside [{}, {}]", 0.1 * h_s, 2.0 * h_s);
    }

    #[test]
    fn test_mode_of_cluster() {
        let data = [1.0, 4.8, 4.9, 5.0, 5.0, 5.1, 5.2, 9.0, 12.0];
        let kde = kde_mode(&data, Bandwidth::Silverman);
        assert!((4.8..=5.2).contains(&kde.mode), "mode {}", kde.mode);
        assert!(kde.fwhm > 0.0);
        assert!(kde.half_maximum.0 <= kde.index && kde.index <= kde.half_maximum.1);
        assert_relative_eq!(kde.variation, kde.fwhm / (2.0 * kde.mode), epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric_pair_ties() {
        let kde = kde_mode(&[1.0, 2.0], Bandwidth::Fixed(1.0));
        assert_eq!(kde.index, 0);
        assert_eq!(kde.ties, 2);
        assert_eq!(kde.half_maximum, (0, 1));
        assert_eq!(kde.fwhm, 1.0);
    }

    #[test]
    fn test_zero_spread() {
        let kde = kde_mode(&[3.0; 5], Bandwidth::CrossValidated);
        assert_eq!(kde.bandwidth, 0.0);
        assert_eq!(kde.fwhm, 0.0);
        assert_eq!(kde.mode, 3.0);
        assert_eq!(kde.ties, 5);
        assert_eq!(kde.variation, 0.0);
    }

    #[test]
    fn test_single_observation() {
        let kde = kde_mode(&[8.0], Bandwidth::Silverman);
        assert_eq!(kde.mode, 8.0);
        assert_eq!(kde.index, 0);
    }

    #[test]
    fn test_mise_prefers_reasonable_bandwidth() {
        let data = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
        // A vanishing bandwidth overfits and a huge one oversmooths
        assert!(mise(&data, 0.8) < mise(&data, 0.01));
        assert!(mise(&data, 0.8) < mise(&data, 50.0));
    }
}
