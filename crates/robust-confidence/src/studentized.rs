//! Studentized (double) bootstrap replicates
//!
//! Each outer replicate resamples the data, evaluates the statistic and then
//! runs `inner` nested resamples of that replicate to estimate its own
//! standard error. The pivot `(estimate - point) / std_err` is what the
//! studentized interval is built from.

use crate::resample::Resampler;
use crate::traits::Statistic;
use robust_core::Generator;
use robust_spread::OnlineMoments;

/// One outer bootstrap replicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Replicate {
    /// Statistic of the resample
    pub estimate: f64,
    /// Nested-bootstrap standard error of `estimate`
    pub std_err: f64,
    /// `(estimate - point) / std_err`, or 0.0 when `std_err` is zero
    pub pivot: f64,
}

impl Replicate {
    pub fn new(estimate: f64, point: f64, std_err: f64) -> Self {
        let pivot = if std_err > 0.0 {
            (estimate - point) / std_err
        } else {
            0.0
        };
        Self {
            estimate,
            std_err,
            pivot,
        }
    }
}

fn check_inner(inner: usize) {
    assert!(inner >= 2, "Need at least 2 inner resamples, got {inner}");
}

/// Studentized replicates of a statistic over one sample
pub struct StudentizedResampler<'a, S: ?Sized> {
    sample: &'a [f64],
    statistic: &'a S,
    point: f64,
    inner: usize,
    resampler: Resampler,
}

impl<'a, S: Statistic + ?Sized> StudentizedResampler<'a, S> {
    /// # Panics
    /// Panics on an empty sample or fewer than 2 inner resamples.
    pub fn new(sample: &'a [f64], statistic: &'a S, inner: usize, resampler: Resampler) -> Self {
        assert!(!sample.is_empty(), "Cannot bootstrap an empty sample");
        check_inner(inner);
        Self {
            sample,
            statistic,
            point: statistic.evaluate(sample),
            inner,
            resampler,
        }
    }

    /// Statistic of the original sample
    pub fn point(&self) -> f64 {
        self.point
    }

    /// Draw one outer replicate
    ///
    /// Nested resamples replay the outer resample without further smoothing.
    pub fn replicate(&self, rng: &mut Generator) -> Replicate {
        let outer = self.resampler.resample(self.sample, rng);
        let estimate = self.statistic.evaluate(&outer);

        let plain = Resampler::default();
        let mut buffer = Vec::with_capacity(outer.len());
        let mut moments = OnlineMoments::new();
        for _ in 0..self.inner {
            plain.resample_into(&outer, rng, &mut buffer);
            moments.push(self.statistic.evaluate(&buffer));
        }
        Replicate::new(estimate, self.point, moments.std(1))
    }
}

/// Studentized replicates of `statistic(b) - statistic(a)` over two
/// independent samples
pub struct PairedStudentizedResampler<'a, S: ?Sized> {
    a: &'a [f64],
    b: &'a [f64],
    statistic: &'a S,
    baseline: f64,
    point: f64,
    inner: usize,
    resampler: Resampler,
}

impl<'a, S: Statistic + ?Sized> PairedStudentizedResampler<'a, S> {
    /// # Panics
    /// Panics if either sample is empty or on fewer than 2 inner resamples.
    pub fn new(
        a: &'a [f64],
        b: &'a [f64],
        statistic: &'a S,
        inner: usize,
        resampler: Resampler,
    ) -> Self {
        assert!(!a.is_empty() && !b.is_empty(), "Cannot bootstrap an empty sample");
        check_inner(inner);
        let baseline = statistic.evaluate(a);
        Self {
            a,
            b,
            statistic,
            baseline,
            point: statistic.evaluate(b) - baseline,
            inner,
            resampler,
        }
    }

    /// Statistic of the first sample
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Observed difference `statistic(b) - statistic(a)`
    pub fn point(&self) -> f64 {
        self.point
    }

    /// Draw one outer replicate of the difference
    pub fn replicate(&self, rng: &mut Generator) -> Replicate {
        let outer_a = self.resampler.resample(self.a, rng);
        let outer_b = self.resampler.resample(self.b, rng);
        let estimate = self.statistic.evaluate(&outer_b) - self.statistic.evaluate(&outer_a);

        let plain = Resampler::default();
        let mut inner_a = Vec::with_capacity(outer_a.len());
        let mut inner_b = Vec::with_capacity(outer_b.len());
        let mut moments = OnlineMoments::new();
        for _ in 0..self.inner {
            plain.resample_into(&outer_a, rng, &mut inner_a);
            plain.resample_into(&outer_b, rng, &mut inner_b);
            moments.push(self.statistic.evaluate(&inner_b) - self.statistic.evaluate(&inner_a));
        }
        Replicate::new(estimate, self.point, moments.std(1))
    }
}
