//! Studentized bootstrap engine
//!
//! Every outer replicate `i` draws from `Generator::fork(i)` of the
//! configured seed, so an interval depends only on the data, the statistic
//! and the configuration. Enabling the `parallel` feature spreads the outer
//! loop over rayon without changing any result.

use crate::methods::{bootstrap_t_p_value, percentile_interval, studentized_interval};
use crate::resample::{Resampler, Smoothing};
use crate::studentized::{PairedStudentizedResampler, StudentizedResampler};
use crate::traits::Statistic;
use crate::types::{ConfidenceInterval, ConfidenceLevel, DifferenceTest};
use robust_core::random::DEFAULT_SEED;
use robust_core::{Error, Generator, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Studentized bootstrap configuration and entry points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentizedBootstrap {
    level: ConfidenceLevel,
    resamples: usize,
    inner: usize,
    smoothing: Smoothing,
    seed: u64,
}

impl Default for StudentizedBootstrap {
    fn default() -> Self {
        Self {
            level: ConfidenceLevel::NINETY_FIVE,
            resamples: 1000,
            inner: 25,
            smoothing: Smoothing::None,
            seed: DEFAULT_SEED,
        }
    }
}

impl StudentizedBootstrap {
    /// Create an engine with 1000 outer and 25 inner resamples at 95%
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.level = ConfidenceLevel::new(level);
        self
    }

    /// Set the number of outer resamples
    pub fn with_resamples(mut self, resamples: usize) -> Self {
        assert!(resamples > 0, "Number of resamples must be positive");
        self.resamples = resamples;
        self
    }

    /// Set the number of nested resamples per outer replicate
    pub fn with_inner_resamples(mut self, inner: usize) -> Self {
        assert!(inner >= 2, "Need at least 2 inner resamples, got {inner}");
        self.inner = inner;
        self
    }

    /// Set the smoothing applied to outer resamples
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        // Validates the bandwidth
        Resampler::new(smoothing);
        self.smoothing = smoothing;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.level
    }

    pub fn resamples(&self) -> usize {
        self.resamples
    }

    pub fn inner_resamples(&self) -> usize {
        self.inner
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn run<T, F>(&self, replicate: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&mut Generator) -> T + Sync,
    {
        let base = Generator::new(self.seed);
        let draw = |i: usize| replicate(&mut base.fork(i as u64));

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.resamples).into_par_iter().map(draw).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.resamples).map(draw).collect()
        }
    }

    /// Studentized confidence interval for `statistic` over `sample`
    #[instrument(skip(self, sample, statistic), fields(n = sample.len(), resamples = self.resamples, inner = self.inner))]
    pub fn confidence_interval<S>(&self, sample: &[f64], statistic: &S) -> Result<ConfidenceInterval>
    where
        S: Statistic + ?Sized,
    {
        if sample.is_empty() {
            return Err(Error::empty_input("bootstrap"));
        }

        let resampler =
            StudentizedResampler::new(sample, statistic, self.inner, Resampler::new(self.smoothing));
        let replicates = self.run(|rng| resampler.replicate(rng));
        let interval = studentized_interval(&replicates, resampler.point(), self.level);
        debug!(%interval, "studentized bootstrap interval");
        Ok(interval)
    }

    /// Percentile interval from plain (non-nested) resamples
    #[instrument(skip(self, sample, statistic), fields(n = sample.len(), resamples = self.resamples))]
    pub fn percentile_interval<S>(&self, sample: &[f64], statistic: &S) -> Result<ConfidenceInterval>
    where
        S: Statistic + ?Sized,
    {
        if sample.is_empty() {
            return Err(Error::empty_input("bootstrap"));
        }

        let resampler = Resampler::new(self.smoothing);
        let estimates = self.run(|rng| statistic.evaluate(&resampler.resample(sample, rng)));
        let interval = percentile_interval(&estimates, statistic.evaluate(sample), self.level)?;
        debug!(%interval, "percentile bootstrap interval");
        Ok(interval)
    }

    /// Test whether `statistic(b)` differs from `statistic(a)`
    ///
    /// The interval covers `statistic(b) - statistic(a)`; the difference is
    /// significant when the interval excludes zero.
    #[instrument(skip(self, a, b, statistic), fields(n_a = a.len(), n_b = b.len(), resamples = self.resamples))]
    pub fn difference_test<S>(&self, a: &[f64], b: &[f64], statistic: &S) -> Result<DifferenceTest>
    where
        S: Statistic + ?Sized,
    {
        if a.is_empty() || b.is_empty() {
            return Err(Error::empty_input("bootstrap difference test"));
        }

        let resampler = PairedStudentizedResampler::new(
            a,
            b,
            statistic,
            self.inner,
            Resampler::new(self.smoothing),
        );
        let replicates = self.run(|rng| resampler.replicate(rng));
        let difference = resampler.point();
        let interval = studentized_interval(&replicates, difference, self.level);
        let p_value = bootstrap_t_p_value(&replicates, difference);
        let significant = !interval.contains(0.0);

        let test = DifferenceTest {
            interval,
            difference,
            relative_difference: relative_difference(difference, resampler.baseline()),
            p_value,
            significant,
        };
        debug!(%test, "bootstrap difference test");
        Ok(test)
    }
}

fn relative_difference(difference: f64, baseline: f64) -> f64 {
    if baseline != 0.0 {
        difference / baseline.abs()
    } else if difference == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(difference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robust_core::utils::mean;

    #[test]
    fn test_bootstrap_construction() {
        let bootstrap = StudentizedBootstrap::new()
            .with_resamples(200)
            .with_inner_resamples(10)
            .with_confidence_level(0.9)
            .with_seed(42);

        assert_eq!(bootstrap.resamples(), 200);
        assert_eq!(bootstrap.inner_resamples(), 10);
        assert_eq!(bootstrap.confidence_level().value(), 0.9);
        assert_eq!(bootstrap.seed(), 42);
        assert_eq!(bootstrap.smoothing(), Smoothing::None);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(std::panic::catch_unwind(|| StudentizedBootstrap::new().with_confidence_level(1.5)).is_err());
        assert!(std::panic::catch_unwind(|| StudentizedBootstrap::new().with_resamples(0)).is_err());
        assert!(std::panic::catch_unwind(|| StudentizedBootstrap::new().with_inner_resamples(1)).is_err());
        assert!(std::panic::catch_unwind(|| {
            StudentizedBootstrap::new().with_smoothing(Smoothing::Gaussian(-1.0))
        })
        .is_err());
    }

    #[test]
    fn test_empty_sample_is_error() {
        let bootstrap = StudentizedBootstrap::new().with_resamples(10);
        assert!(bootstrap.confidence_interval(&[], &mean).is_err());
        assert!(bootstrap.percentile_interval(&[], &mean).is_err());
        assert!(bootstrap.difference_test(&[1.0], &[], &mean).is_err());
    }

    #[test]
    fn test_single_observation_collapses() {
        let bootstrap = StudentizedBootstrap::new().with_resamples(20).with_inner_resamples(5);
        let ci = bootstrap.confidence_interval(&[7.0], &mean).unwrap();
        assert_eq!(ci, ConfidenceInterval::point(7.0, 0.95));
    }

    #[test]
    fn test_relative_difference() {
        assert_eq!(relative_difference(2.0, 4.0), 0.5);
        assert_eq!(relative_difference(2.0, -4.0), 0.5);
        assert_eq!(relative_difference(0.0, 0.0), 0.0);
        assert_eq!(relative_difference(-1.0, 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_config_serde_defaults() {
        let bootstrap: StudentizedBootstrap =
            serde_json::from_str(r#"{"resamples": 50, "smoothing": {"gaussian": 0.5}}"#).unwrap();
        assert_eq!(bootstrap.resamples(), 50);
        assert_eq!(bootstrap.inner_resamples(), 25);
        assert_eq!(bootstrap.smoothing(), Smoothing::Gaussian(0.5));
        assert_eq!(bootstrap.seed(), DEFAULT_SEED);
    }
}
