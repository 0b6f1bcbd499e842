//! Per-run duration sample
//!
//! Every observation updates the streaming moments; only a reservoir-bounded
//! uniform subset is retained for the location estimators, normality test
//! and bootstrap.

use crate::id::{Annotations, PointEstimate, SampleId};
use crate::options::SampleOptions;
use crate::reservoir::ReservoirSampler;
use crate::source::TimeSource;
use robust_confidence::{ConfidenceInterval, StudentizedBootstrap};
use robust_core::{Error, Generator, Result};
use robust_hypothesis::{shapiro_wilk, ShapiroWilk};
use robust_modality::EstimatorKey;
use robust_spread::{coefficient_of_variation, OnlineMoments};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const NANOS_PER_MICRO: f64 = 1_000.0;

/// Observations of one benchmark run, in microseconds
#[derive(Debug, Clone)]
pub struct DurationSample {
    id: SampleId,
    reservoir: ReservoirSampler<f64>,
    moments: OnlineMoments,
}

impl DurationSample {
    /// Create an empty sample retaining at most `capacity` observations
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self::with_generator(capacity, Generator::new(seed))
    }

    /// Create an empty sample from options, seeding from entropy when the
    /// options carry no seed
    pub fn from_options(options: &SampleOptions) -> Self {
        let rng = options.seed.map_or_else(Generator::from_entropy, Generator::new);
        Self::with_generator(options.capacity, rng)
    }

    fn with_generator(capacity: usize, rng: Generator) -> Self {
        Self {
            id: SampleId::new(),
            reservoir: ReservoirSampler::new(capacity, rng),
            moments: OnlineMoments::new(),
        }
    }

    pub fn id(&self) -> SampleId {
        self.id
    }

    /// Record one elapsed duration
    pub fn push(&mut self, elapsed: Duration) {
        self.push_ticks(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Record one elapsed time given in nanosecond ticks
    pub fn push_ticks(&mut self, nanos: u64) {
        let micros = nanos as f64 / NANOS_PER_MICRO;
        self.moments.push(micros);
        self.reservoir.push(micros);
    }

    /// Drain up to `max` observations from `source`, returning how many were taken
    pub fn fill_from<S: TimeSource + ?Sized>(&mut self, source: &mut S, max: usize) -> usize {
        let mut taken = 0;
        while taken < max {
            match source.next_elapsed() {
                Some(elapsed) => self.push(elapsed),
                None => break,
            }
            taken += 1;
        }
        taken
    }

    /// Sample a time source until the early-stop predicate holds, the source
    /// runs dry, or `options.max_samples` observations have been taken
    #[instrument(skip(source, options), fields(capacity = options.capacity, max_samples = options.max_samples))]
    pub fn collect<S: TimeSource + ?Sized>(source: &mut S, options: &SampleOptions) -> Self {
        let mut sample = Self::from_options(options);
        while (sample.count() as usize) < options.max_samples
            && !sample.is_significant(options.min_samples, options.max_relative_error)
        {
            match source.next_elapsed() {
                Some(elapsed) => sample.push(elapsed),
                None => break,
            }
        }
        debug!(
            id = %sample.id,
            count = sample.count(),
            retained = sample.len(),
            relative_error = sample.relative_standard_error(),
            "sample collected"
        );
        sample
    }

    /// Retained observations
    pub fn values(&self) -> &[f64] {
        self.reservoir.items()
    }

    /// Number of retained observations
    pub fn len(&self) -> usize {
        self.reservoir.n()
    }

    pub fn is_empty(&self) -> bool {
        self.reservoir.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.reservoir.capacity()
    }

    /// Number of observations ever pushed
    pub fn count(&self) -> u64 {
        self.moments.count()
    }

    /// Moments over every observation, not only the retained ones
    pub fn moments(&self) -> &OnlineMoments {
        &self.moments
    }

    /// `std / (mean * sqrt(n))` over every observation
    pub fn relative_standard_error(&self) -> f64 {
        let n = self.moments.count();
        if n == 0 {
            return f64::INFINITY;
        }
        coefficient_of_variation(self.moments.mean(), self.moments.std(1)) / (n as f64).sqrt()
    }

    /// Early-stop predicate: enough retained observations and a precise mean
    pub fn is_significant(&self, min_samples: usize, max_relative_error: f64) -> bool {
        self.len() >= min_samples && self.relative_standard_error() <= max_relative_error
    }

    fn check_method(&self, method: EstimatorKey, operation: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::empty_input(operation));
        }
        if !method.supports(self.values()) {
            return Err(Error::InvalidInput(format!(
                "{operation}: {method} needs strictly positive durations"
            )));
        }
        Ok(())
    }

    /// Reduce the retained observations to a point estimate
    ///
    /// Fails on an empty sample, and for [`EstimatorKey::Shorth`] when any
    /// retained duration is zero.
    pub fn point_estimate(&self, method: EstimatorKey) -> Result<PointEstimate> {
        self.check_method(method, "point estimate")?;
        let estimate = method.estimate(self.values());
        Ok(PointEstimate::new(estimate.value, self.id, method))
    }

    /// Studentized bootstrap interval of `method` over the retained observations
    pub fn confidence_interval(
        &self,
        method: EstimatorKey,
        bootstrap: &StudentizedBootstrap,
    ) -> Result<ConfidenceInterval> {
        self.check_method(method, "confidence interval")?;
        let statistic = |sample: &[f64]| method.estimate(sample).value;
        bootstrap.confidence_interval(self.values(), &statistic)
    }

    /// Shapiro-Wilk test of the retained observations
    ///
    /// `None` when the sample is too small, too large or has no spread.
    pub fn normality(&self) -> Option<ShapiroWilk> {
        let values = self.values();
        if !(3..=5000).contains(&values.len()) {
            return None;
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        (max > min).then(|| shapiro_wilk(values))
    }

    /// Point estimates for `methods`, keyed by estimator name
    ///
    /// Methods undefined for the retained observations are left out.
    pub fn annotations(&self, methods: &[EstimatorKey]) -> Annotations {
        methods
            .iter()
            .filter_map(|&method| {
                let estimate = self.point_estimate(method).ok()?;
                Some((method.name().to_string(), estimate.value()))
            })
            .collect()
    }

    /// Serializable record of this sample
    pub fn record(&self, methods: &[EstimatorKey]) -> SampleRecord {
        SampleRecord {
            id: self.id,
            values: self.values().to_vec(),
            moments: self.moments,
            annotations: self.annotations(methods),
        }
    }
}

/// Frozen form of a [`DurationSample`] handed to the snapshot store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: SampleId,
    pub values: Vec<f64>,
    pub moments: OnlineMoments,
    pub annotations: Annotations,
}
