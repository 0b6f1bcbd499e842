//! Outlier-filtered, size-bounded sampling distribution of point estimates
//!
//! A digest gathers the point estimates of every stored run of a benchmark
//! plus the current one and decides whether they agree well enough to serve
//! as a baseline:
//!
//! 1. Center the estimates on the shorth mean of the densest 67% and scale
//!    them by the normalized MAD around that center.
//! 2. While more than `max_size` estimates remain, draw one with probability
//!    proportional to its outlier weight and reject it. Draws that land on a
//!    rejected estimate are redirected along the [`Tour`].
//! 3. Measure the survivors' uncertainty: relative spread, or the minimum
//!    detectable effect when a power is configured.
//! 4. Survivors are consistent when there are at least `min_size` of them
//!    and the uncertainty is within the threshold; otherwise they are
//!    outliers.

use crate::error::{DigestError, Result};
use crate::options::{DigestOptions, CENTER_COVERAGE};
use crate::status::Status;
use crate::store::AnnotationStore;
use crate::tour::Tour;
use crate::weight::OutlierWeight;
use robust_core::math::distributions::normal;
use robust_core::{lower_bound, Generator};
use robust_modality::{shorth_with, EstimatorKey};
use robust_sample::{DurationSample, PointEstimate, SampleId};
use robust_spread::{coefficient_of_variation, normalized_mad, OnlineMoments};
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

/// One estimate and its classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub estimate: PointEstimate,
    pub status: Status,
}

/// Classified sampling distribution of point estimates
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    id: Uuid,
    options: DigestOptions,
    entries: Vec<Entry>,
    center: f64,
    scale: f64,
    uncertainty: f64,
    ready: bool,
}

/// Weighted draws without replacement of the most outlying estimates
struct Rejection {
    weights: Vec<f64>,
    cumulative: Vec<f64>,
    rejected: Vec<bool>,
    tour: Option<Tour>,
}

impl Rejection {
    fn new(weights: Vec<f64>) -> Self {
        let cumulative = weights
            .iter()
            .scan(0.0, |sum, &w| {
                *sum += w;
                Some(*sum)
            })
            .collect();
        let rejected = vec![false; weights.len()];
        Self {
            weights,
            cumulative,
            rejected,
            tour: None,
        }
    }

    /// Reject one more index and return it
    fn draw(&mut self, rng: &mut Generator) -> usize {
        let n = self.weights.len();
        let total = self.cumulative[n - 1];
        let u = rng.next_f64() * total;
        let mut index = lower_bound(&self.cumulative, &u, |c, u| c <= u).min(n - 1);
        if self.rejected[index] {
            let weights = &self.weights;
            index = self
                .tour
                .get_or_insert_with(|| Tour::new(weights))
                .find(index, &self.rejected);
        }
        self.rejected[index] = true;
        index
    }
}

/// Relative spread of the survivors, or their minimum detectable effect
fn uncertainty(values: &[f64], options: &DigestOptions) -> f64 {
    let moments = OnlineMoments::from_slice(values);
    let (mean, std) = (moments.mean(), moments.std(1));
    match options.power {
        None => coefficient_of_variation(mean, std),
        Some(power) => {
            let z = normal::ppf(1.0 - options.alpha / 2.0) + normal::ppf(power);
            let n = values.len() as f64;
            coefficient_of_variation(mean, z * std * (1.0 + 1.0 / n).sqrt())
        }
    }
}

impl Digest {
    /// Classify `estimates` under `options`
    ///
    /// # Panics
    /// Panics if `options` violate their contracts.
    #[instrument(skip(estimates, options), fields(n = estimates.len(), max_size = options.max_size))]
    pub fn new(estimates: Vec<PointEstimate>, options: DigestOptions) -> Self {
        options.validate();
        let n = estimates.len();

        if n < 2 {
            let entries: Vec<Entry> = estimates
                .into_iter()
                .map(|estimate| Entry {
                    estimate,
                    status: Status::Consistent,
                })
                .collect();
            let ready = entries.len() >= options.min_size;
            let center = entries.first().map_or(0.0, |e| e.estimate.value());
            debug!(ready, "trivial digest");
            return Self {
                id: Uuid::new_v4(),
                options,
                entries,
                center,
                scale: 0.0,
                uncertainty: 0.0,
                ready,
            };
        }

        let values: Vec<f64> = estimates.iter().map(PointEstimate::value).collect();
        let mut rng = Generator::new(options.seed);
        let center = shorth_with::<OnlineMoments>(&values, CENTER_COVERAGE).value;
        let scale = normalized_mad(&values, center, &mut rng);
        debug!(center, scale, "digest center and scale");

        let mut rejected = vec![false; n];
        if n > options.max_size {
            let weights = options.outlier_weight.weights(&values, center, scale);
            let mut rejection = Rejection::new(weights);
            for _ in 0..n - options.max_size {
                let index = rejection.draw(&mut rng);
                trace!(
                    index,
                    value = values[index],
                    z = OutlierWeight::z_score(values[index], center, scale),
                    "rejected estimate"
                );
            }
            rejected = rejection.rejected;
        }

        let survivors: Vec<f64> = values
            .iter()
            .zip(&rejected)
            .filter(|&(_, &r)| !r)
            .map(|(&v, _)| v)
            .collect();
        let uncertainty = uncertainty(&survivors, &options);
        let ready = survivors.len() >= options.min_size && uncertainty <= options.threshold;
        let kept = if ready { Status::Consistent } else { Status::Outlier };
        debug!(
            survivors = survivors.len(),
            uncertainty,
            threshold = options.threshold,
            ready,
            "digest classified"
        );

        let entries = estimates
            .into_iter()
            .zip(rejected)
            .map(|(estimate, r)| Entry {
                estimate,
                status: if r { Status::Rejected } else { kept },
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            options,
            entries,
            center,
            scale,
            uncertainty,
            ready,
        }
    }

    /// Build from stored annotation bags, reading the `key` estimate of each
    /// sample
    pub fn from_annotations<S>(
        samples: &[SampleId],
        store: &S,
        key: EstimatorKey,
        options: DigestOptions,
    ) -> Result<Self>
    where
        S: AnnotationStore + ?Sized,
    {
        let estimates = samples
            .iter()
            .map(|&sample| {
                store
                    .annotations(&sample)
                    .and_then(|bag| bag.get(key.name()))
                    .map(|&value| PointEstimate::new(value, sample, key))
                    .ok_or(DigestError::MissingAnnotation { sample, key })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(estimates, options))
    }

    /// Build from live samples, estimating each with `key`
    pub fn from_samples(
        samples: &[&DurationSample],
        key: EstimatorKey,
        options: DigestOptions,
    ) -> Result<Self> {
        let estimates = samples
            .iter()
            .map(|sample| sample.point_estimate(key))
            .collect::<robust_core::Result<Vec<_>>>()?;
        Ok(Self::new(estimates, options))
    }

    /// Reassemble a digest from already classified parts
    pub(crate) fn from_parts(
        id: Uuid,
        options: DigestOptions,
        entries: Vec<Entry>,
        uncertainty: f64,
        ready: bool,
    ) -> Self {
        Self {
            id,
            options,
            entries,
            center: f64::NAN,
            scale: f64::NAN,
            uncertainty,
            ready,
        }
    }

    /// New digest over the non-rejected estimates plus `estimate`
    ///
    /// Rejected estimates are dropped for good.
    pub fn extend(&self, estimate: PointEstimate) -> Self {
        let estimates = self
            .entries
            .iter()
            .filter(|e| e.status != Status::Rejected)
            .map(|e| e.estimate)
            .chain(std::iter::once(estimate))
            .collect();
        Self::new(estimates, self.options)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &DigestOptions {
        &self.options
    }

    /// Every estimate in input order, rejected ones included
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shorth center of the estimates; NaN for a digest restored from the wire
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Normalized MAD of the estimates; NaN for a digest restored from the wire
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Relative spread or minimum detectable effect of the survivors
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Whether enough consistent estimates agree within the threshold
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Status of one sample, if the digest holds it
    pub fn status(&self, sample: &SampleId) -> Option<Status> {
        self.entries
            .iter()
            .find(|e| e.estimate.sample() == *sample)
            .map(|e| e.status)
    }

    /// Classification of every non-rejected sample
    pub fn stat(&self) -> BTreeMap<SampleId, Status> {
        self.entries
            .iter()
            .filter(|e| e.status != Status::Rejected)
            .map(|e| (e.estimate.sample(), e.status))
            .collect()
    }

    /// Samples rejected by this build
    pub fn rejected(&self) -> Vec<SampleId> {
        self.entries
            .iter()
            .filter(|e| e.status == Status::Rejected)
            .map(|e| e.estimate.sample())
            .collect()
    }

    /// Number of consistent estimates
    pub fn consistent(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == Status::Consistent)
            .count()
    }

    /// Values of the non-rejected estimates, in input order
    pub fn statistic(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|e| e.status != Status::Rejected)
            .map(|e| e.estimate.value())
            .collect()
    }
}
