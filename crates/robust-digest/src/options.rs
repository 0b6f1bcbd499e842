//! Digest configuration

use crate::weight::OutlierWeight;
use robust_core::random::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

/// Window coverage of the shorth center
pub const CENTER_COVERAGE: f64 = 0.67;

/// Sizes, thresholds and seed governing a digest build
///
/// Deserialized options are checked by [`DigestOptions::validate`] when a
/// digest is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestOptions {
    /// Consistent estimates required before the digest is ready
    pub min_size: usize,
    /// Estimates kept after outlier rejection
    pub max_size: usize,
    /// Largest acceptable uncertainty (relative spread or MDE)
    pub threshold: f64,
    /// Statistical power of the MDE; relative spread is used when absent
    pub power: Option<f64>,
    /// Significance level of the MDE
    pub alpha: f64,
    /// Seed for the MAD selection and outlier draws
    pub seed: u64,
    /// Weight policy for outlier draws
    pub outlier_weight: OutlierWeight,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            min_size: 3,
            max_size: 10,
            threshold: 0.05,
            power: None,
            alpha: 0.05,
            seed: DEFAULT_SEED,
            outlier_weight: OutlierWeight::default(),
        }
    }
}

impl DigestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum and maximum digest sizes
    ///
    /// # Panics
    /// Panics if `min_size > max_size` or `max_size == 0`.
    pub fn with_sizes(mut self, min_size: usize, max_size: usize) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self.validate();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self.validate();
        self
    }

    /// Report the minimum detectable effect at this power instead of the
    /// relative spread
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = Some(power);
        self.validate();
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self.validate();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_outlier_weight(mut self, outlier_weight: OutlierWeight) -> Self {
        self.outlier_weight = outlier_weight;
        self
    }

    /// Check every option against its contract
    ///
    /// # Panics
    /// Panics on any out-of-range option.
    pub fn validate(&self) {
        assert!(self.max_size > 0, "max_size must be positive");
        assert!(
            self.min_size <= self.max_size,
            "min_size ({}) must not exceed max_size ({})",
            self.min_size,
            self.max_size
        );
        assert!(
            self.threshold >= 0.0,
            "threshold must be non-negative, got {}",
            self.threshold
        );
        assert!(
            self.alpha > 0.0 && self.alpha < 1.0,
            "alpha must be in (0, 1), got {}",
            self.alpha
        );
        if let Some(power) = self.power {
            assert!(
                power > 0.0 && power < 1.0,
                "power must be in (0, 1), got {power}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = DigestOptions::new()
            .with_sizes(2, 6)
            .with_threshold(0.1)
            .with_power(0.8)
            .with_seed(4);
        assert_eq!(options.min_size, 2);
        assert_eq!(options.max_size, 6);
        assert_eq!(options.power, Some(0.8));
        assert_eq!(options.seed, 4);
    }

    #[test]
    fn test_json_defaults() {
        let options: DigestOptions = serde_json::from_str(r#"{"max_size": 20, "power": 0.9}"#).unwrap();
        assert_eq!(options.max_size, 20);
        assert_eq!(options.power, Some(0.9));
        assert_eq!(options.min_size, 3);
        assert_eq!(options.outlier_weight, OutlierWeight::default());
        options.validate();
    }

    #[test]
    #[should_panic]
    fn test_min_above_max_panics() {
        DigestOptions::new().with_sizes(5, 4);
    }

    #[test]
    #[should_panic]
    fn test_invalid_power_panics() {
        DigestOptions::new().with_power(1.0);
    }
}
