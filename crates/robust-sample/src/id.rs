//! Sample identity and the point estimates reduced from a sample

use robust_core::Error;
use robust_modality::EstimatorKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Named statistics stored alongside a sample, keyed by estimator name
pub type Annotations = BTreeMap<String, f64>;

/// Stable identity of one benchmark run's sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(Uuid);

impl SampleId {
    /// Fresh random (v4) identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SampleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SampleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidParameter(format!("Invalid sample id '{s}': {e}")))
    }
}

/// Location of one sample under one estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEstimate {
    value: f64,
    sample: SampleId,
    method: EstimatorKey,
}

impl PointEstimate {
    pub fn new(value: f64, sample: SampleId, method: EstimatorKey) -> Self {
        Self {
            value,
            sample,
            method,
        }
    }

    /// Estimated location, in microseconds for duration samples
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sample the estimate was computed from
    pub fn sample(&self) -> SampleId {
        self.sample
    }

    /// Estimator that produced the value
    pub fn method(&self) -> EstimatorKey {
        self.method
    }
}

impl fmt::Display for PointEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.3} ({})", self.method, self.value, self.sample)
    }
}
