//! Estimator selection by name

use crate::classical::{SampleMean, SampleMedian};
use crate::hsm::HalfSampleMode;
use crate::kde::KernelDensityMode;
use crate::shorth::{LeastMedianSquares, Shorth};
use crate::traits::LocationEstimator;
use crate::types::ModeEstimate;
use robust_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location estimation methods
///
/// The serialized form is the lowercase name, which is also the key a point
/// estimate is stored under in a sample's annotation bag.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKey {
    /// Half-sample mode
    #[default]
    Hsm,
    /// Log-normal mean of the shortest half
    Shorth,
    /// Midpoint of the shortest half
    Lms,
    /// Cross-validated kernel-density mode
    Kde,
    /// Arithmetic mean
    Mean,
    /// Sample median
    Median,
}

impl EstimatorKey {
    /// Every method, in declaration order
    pub const ALL: [EstimatorKey; 6] = [
        Self::Hsm,
        Self::Shorth,
        Self::Lms,
        Self::Kde,
        Self::Mean,
        Self::Median,
    ];

    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hsm => "hsm",
            Self::Shorth => "shorth",
            Self::Lms => "lms",
            Self::Kde => "kde",
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }

    /// Estimator with default parameters for this method
    pub fn estimator(&self) -> Box<dyn LocationEstimator + Send + Sync> {
        match self {
            Self::Hsm => Box::new(HalfSampleMode::default()),
            Self::Shorth => Box::new(Shorth::<robust_spread::LogNormalMoments>::default()),
            Self::Lms => Box::new(LeastMedianSquares::default()),
            Self::Kde => Box::new(KernelDensityMode::default()),
            Self::Mean => Box::new(SampleMean),
            Self::Median => Box::new(SampleMedian),
        }
    }

    /// Whether this method is defined for `sample`
    ///
    /// The log-normal shorth needs strictly positive observations.
    pub fn supports(&self, sample: &[f64]) -> bool {
        match self {
            Self::Shorth => sample.iter().all(|&x| x > 0.0),
            _ => true,
        }
    }

    /// Estimate the location of `sample` with this method
    pub fn estimate(&self, sample: &[f64]) -> ModeEstimate {
        self.estimator().estimate(sample)
    }
}

impl fmt::Display for EstimatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EstimatorKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("Unknown estimator '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for key in EstimatorKey::ALL {
            assert_eq!(key.name().parse::<EstimatorKey>().unwrap(), key);
            assert_eq!(key.estimator().name(), key.name());
        }
        assert!("mode".parse::<EstimatorKey>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&EstimatorKey::Kde).unwrap();
        assert_eq!(json, "\"kde\"");
        let key: EstimatorKey = serde_json::from_str("\"median\"").unwrap();
        assert_eq!(key, EstimatorKey::Median);
    }

    #[test]
    fn test_every_method_estimates() {
        let sample = [10.0, 10.2, 10.1, 9.9, 10.05, 30.0, 10.15];
        for key in EstimatorKey::ALL {
            let estimate = key.estimate(&sample);
            assert!(estimate.value > 9.0 && estimate.value < 14.0, "{key}: {estimate}");
        }
    }

    #[test]
    fn test_default_is_hsm() {
        assert_eq!(EstimatorKey::default(), EstimatorKey::Hsm);
    }

    #[test]
    fn test_shorth_needs_positive_values() {
        assert!(EstimatorKey::Shorth.supports(&[1.0, 2.0]));
        assert!(!EstimatorKey::Shorth.supports(&[0.0, 1.0, 2.0]));
        assert!(EstimatorKey::Hsm.supports(&[0.0, 1.0, 2.0]));
    }
}
