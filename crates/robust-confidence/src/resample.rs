//! Nonparametric resampling
//!
//! A resample of size N is drawn as a multinomial count vector (N uniform
//! index draws tallied per position) and then replayed: value `i` is written
//! `count[i]` times, in the original order. Optional Gaussian smoothing adds
//! kernel jitter to every replayed value.

use rand::Rng;
use rand_distr::StandardNormal;
use robust_core::Generator;
use serde::{Deserialize, Serialize};

/// Jitter applied to replayed values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Replay the original values unchanged
    #[default]
    None,
    /// Add `N(0, h^2)` noise to each replayed value (smoothed bootstrap)
    Gaussian(f64),
}

/// Multinomial resampler
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resampler {
    smoothing: Smoothing,
}

impl Resampler {
    /// Create a resampler
    ///
    /// # Panics
    /// Panics if a Gaussian smoothing bandwidth is not finite and positive.
    pub fn new(smoothing: Smoothing) -> Self {
        if let Smoothing::Gaussian(h) = smoothing {
            assert!(
                h.is_finite() && h > 0.0,
                "Smoothing bandwidth must be finite and positive, got {h}"
            );
        }
        Self { smoothing }
    }

    /// Smoothing in use
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Draw how often each of `n` positions appears in a resample of size `n`
    pub fn counts(n: usize, rng: &mut Generator) -> Vec<u32> {
        let mut counts = vec![0u32; n];
        for _ in 0..n {
            counts[rng.next_index(n)] += 1;
        }
        counts
    }

    /// Write a resample of `sample` into `out`, replacing its contents
    pub fn resample_into(&self, sample: &[f64], rng: &mut Generator, out: &mut Vec<f64>) {
        out.clear();
        out.reserve(sample.len());
        let counts = Self::counts(sample.len(), rng);
        for (&value, &count) in sample.iter().zip(&counts) {
            for _ in 0..count {
                out.push(value);
            }
        }
        if let Smoothing::Gaussian(h) = self.smoothing {
            for value in out.iter_mut() {
                let noise: f64 = rng.sample(StandardNormal);
                *value += h * noise;
            }
        }
    }

    /// Draw a resample of `sample`
    pub fn resample(&self, sample: &[f64], rng: &mut Generator) -> Vec<f64> {
        let mut out = Vec::with_capacity(sample.len());
        self.resample_into(sample, rng, &mut out);
        out
    }
}
