//! Streaming moments: mean, variance, skewness and excess kurtosis
//!
//! [`OnlineMoments`] keeps the first four central moments with the single-pass
//! update of Welford, West and Terriberry, so it never retains the raw data.
//! Partial accumulators can be combined with [`OnlineMoments::merge`] (Chan et
//! al. pairwise formulas). [`LogNormalMoments`] pushes `ln(x)` into an inner
//! accumulator and reports the log-normal moments of the original values.

use serde::{Deserialize, Serialize};

/// Common interface of the streaming accumulators
///
/// Location estimators that average a window (e.g. shorth) are generic over
/// this trait so callers can choose between Gaussian and log-normal summaries.
pub trait MomentAccumulator: Default + Clone {
    /// Add one observation
    fn push(&mut self, x: f64);

    /// Number of observations pushed so far
    fn count(&self) -> u64;

    /// Mean of the modelled distribution
    fn mean(&self) -> f64;

    /// Variance with `ddof` delta degrees of freedom
    fn variance(&self, ddof: u64) -> f64;

    /// Standard deviation with `ddof` delta degrees of freedom
    fn std(&self, ddof: u64) -> f64 {
        self.variance(ddof).sqrt()
    }

    /// Push every value of a slice
    fn extend_from_slice(&mut self, values: &[f64]) {
        for &x in values {
            self.push(x);
        }
    }
}

/// Single-pass accumulator of count, mean, central moments M2..M4, min and max
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OnlineMoments {
    count: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
    min: f64,
    max: f64,
}

impl Default for OnlineMoments {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlineMoments {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Accumulator over every value of `values`
    pub fn from_slice(values: &[f64]) -> Self {
        let mut moments = Self::new();
        moments.extend_from_slice(values);
        moments
    }

    /// Add one observation
    pub fn push(&mut self, x: f64) {
        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;

        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;

        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Combine `other` into `self` as if all of its observations had been pushed here
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let na = self.count as f64;
        let nb = other.count as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;
        let delta2 = delta * delta;
        let delta3 = delta2 * delta;
        let delta4 = delta2 * delta2;

        let m2 = self.m2 + other.m2 + delta2 * na * nb / n;
        let m3 = self.m3
            + other.m3
            + delta3 * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;
        let m4 = self.m4
            + other.m4
            + delta4 * na * nb * (na * na - na * nb + nb * nb) / (n * n * n)
            + 6.0 * delta2 * (na * na * other.m2 + nb * nb * self.m2) / (n * n)
            + 4.0 * delta * (na * other.m3 - nb * self.m3) / n;

        self.mean += delta * nb / n;
        self.m2 = m2;
        self.m3 = m3;
        self.m4 = m4;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of observations
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean (0.0 when empty)
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Variance `M2 / (n - ddof)`, zero when `n <= ddof`
    pub fn variance(&self, ddof: u64) -> f64 {
        if self.count <= ddof {
            return 0.0;
        }
        (self.m2 / (self.count - ddof) as f64).max(0.0)
    }

    /// Standard deviation with `ddof` delta degrees of freedom
    pub fn std(&self, ddof: u64) -> f64 {
        self.variance(ddof).sqrt()
    }

    /// Sample skewness `sqrt(n) * M3 / M2^1.5`, zero for a degenerate sample
    pub fn skewness(&self) -> f64 {
        if self.m2 <= 0.0 {
            return 0.0;
        }
        (self.count as f64).sqrt() * self.m3 / self.m2.powf(1.5)
    }

    /// Excess kurtosis `n * M4 / M2^2 - 3`, zero for a degenerate sample
    pub fn kurtosis(&self) -> f64 {
        if self.m2 <= 0.0 {
            return 0.0;
        }
        self.count as f64 * self.m4 / (self.m2 * self.m2) - 3.0
    }

    /// Smallest observation, `None` when empty
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest observation, `None` when empty
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Coefficient of variation `std(ddof) / |mean|`
    pub fn coefficient_of_variation(&self, ddof: u64) -> f64 {
        crate::dispersion::coefficient_of_variation(self.mean, self.std(ddof))
    }
}

impl MomentAccumulator for OnlineMoments {
    fn push(&mut self, x: f64) {
        OnlineMoments::push(self, x)
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self, ddof: u64) -> f64 {
        OnlineMoments::variance(self, ddof)
    }
}

/// Log-normal summary of strictly positive observations
///
/// The parameters `mu` and `sigma` are the mean and sample standard deviation
/// of `ln(x)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LogNormalMoments {
    log: OnlineMoments,
}

impl LogNormalMoments {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation
    ///
    /// # Panics
    /// Panics if `x <= 0`, which has no logarithm.
    pub fn push(&mut self, x: f64) {
        assert!(x > 0.0, "Log-normal moments require positive observations, got {x}");
        self.log.push(x.ln());
    }

    /// Location parameter `mu`
    pub fn mu(&self) -> f64 {
        self.log.mean()
    }

    /// Squared scale parameter `sigma^2`
    pub fn sigma2(&self) -> f64 {
        self.log.variance(1)
    }

    /// Accumulator of the log-transformed values
    pub fn log_moments(&self) -> &OnlineMoments {
        &self.log
    }

    /// `exp(mu + sigma^2 / 2)`
    pub fn mean(&self) -> f64 {
        if self.log.count() == 0 {
            return 0.0;
        }
        (self.mu() + self.sigma2() / 2.0).exp()
    }

    /// `(exp(sigma^2) - 1) * exp(2 mu + sigma^2)`
    pub fn variance(&self) -> f64 {
        if self.log.count() == 0 {
            return 0.0;
        }
        let s2 = self.sigma2();
        s2.exp_m1() * (2.0 * self.mu() + s2).exp()
    }

    /// `exp(mu - sigma^2)`
    pub fn mode(&self) -> f64 {
        if self.log.count() == 0 {
            return 0.0;
        }
        (self.mu() - self.sigma2()).exp()
    }

    /// `exp(mu)`
    pub fn median(&self) -> f64 {
        if self.log.count() == 0 {
            return 0.0;
        }
        self.mu().exp()
    }

    /// `exp(sigma)`
    pub fn geometric_std(&self) -> f64 {
        self.sigma2().sqrt().exp()
    }
}

impl MomentAccumulator for LogNormalMoments {
    fn push(&mut self, x: f64) {
        LogNormalMoments::push(self, x)
    }

    fn count(&self) -> u64 {
        self.log.count()
    }

    fn mean(&self) -> f64 {
        LogNormalMoments::mean(self)
    }

    // The log-normal variance already uses the sample estimate of sigma
    fn variance(&self, _ddof: u64) -> f64 {
        LogNormalMoments::variance(self)
    }
}
