//! Sampling configuration

use serde::{Deserialize, Serialize};

/// How a benchmark run collects its sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// Reservoir capacity
    pub capacity: usize,
    /// Hard cap on observations taken from a time source
    pub max_samples: usize,
    /// Retained observations required before stopping early
    pub min_samples: usize,
    /// Relative standard error of the mean at which sampling may stop
    pub max_relative_error: f64,
    /// Reservoir seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            capacity: 1000,
            max_samples: 100_000,
            min_samples: 30,
            max_relative_error: 0.01,
            seed: None,
        }
    }
}

impl SampleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Reservoir capacity must be positive");
        self.capacity = capacity;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    pub fn with_max_relative_error(mut self, max_relative_error: f64) -> Self {
        assert!(
            max_relative_error >= 0.0,
            "Relative error bound must be non-negative, got {max_relative_error}"
        );
        self.max_relative_error = max_relative_error;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
