//! Statistic abstraction used by every bootstrap in this crate

/// A scalar statistic of a sample
///
/// Bootstrap replicates may be evaluated on worker threads, so statistics
/// must be `Sync`. Any `Fn(&[f64]) -> f64 + Sync` closure is a statistic.
pub trait Statistic: Sync {
    /// Evaluate the statistic on a (possibly resampled) sample
    fn evaluate(&self, sample: &[f64]) -> f64;
}

impl<F> Statistic for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    #[inline]
    fn evaluate(&self, sample: &[f64]) -> f64 {
        self(sample)
    }
}
