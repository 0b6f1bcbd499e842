//! Interval construction from a bootstrap distribution

use crate::studentized::Replicate;
use crate::types::{ConfidenceInterval, ConfidenceLevel};
use robust_core::utils::{quantile_sorted, sorted};
use robust_core::{Error, Result};
use robust_spread::OnlineMoments;

fn estimate_std(replicates: &[Replicate]) -> f64 {
    let mut moments = OnlineMoments::new();
    for r in replicates {
        moments.push(r.estimate);
    }
    moments.std(1)
}

/// Studentized interval `[point - s q(1 - a/2), point - s q(a/2)]`
///
/// `s` is the standard deviation of the replicate estimates and `q` the
/// empirical quantile of the replicate pivots.
///
/// # Panics
/// Panics if `replicates` is empty.
pub fn studentized_interval(
    replicates: &[Replicate],
    point: f64,
    level: ConfidenceLevel,
) -> ConfidenceInterval {
    assert!(!replicates.is_empty(), "No bootstrap replicates");
    let s = estimate_std(replicates);
    let pivots = sorted(&replicates.iter().map(|r| r.pivot).collect::<Vec<_>>());
    let tail = level.tail_probability();
    let q_lo = quantile_sorted(&pivots, tail);
    let q_hi = quantile_sorted(&pivots, 1.0 - tail);
    ConfidenceInterval::new(point - s * q_hi, point - s * q_lo, point, level.value())
}

/// Two-sided bootstrap-t p-value for the hypothesis that the parameter is zero
///
/// The observed statistic `point / s` is located in the pivot distribution.
/// With no bootstrap spread the result is 1.0 for a zero point and 0.0
/// otherwise.
///
/// # Panics
/// Panics if `replicates` is empty.
pub fn bootstrap_t_p_value(replicates: &[Replicate], point: f64) -> f64 {
    assert!(!replicates.is_empty(), "No bootstrap replicates");
    let s = estimate_std(replicates);
    if s <= 0.0 {
        return if point == 0.0 { 1.0 } else { 0.0 };
    }
    let t = point / s;
    let at_most = replicates.iter().filter(|r| r.pivot <= t).count();
    let at_least = replicates.iter().filter(|r| r.pivot >= t).count();
    let tail = at_most.min(at_least) as f64 / replicates.len() as f64;
    (2.0 * tail).min(1.0)
}

/// Percentile interval: empirical quantiles of the bootstrap estimates
pub fn percentile_interval(
    bootstrap_estimates: &[f64],
    original_estimate: f64,
    level: ConfidenceLevel,
) -> Result<ConfidenceInterval> {
    if bootstrap_estimates.is_empty() {
        return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
    }
    let sorted = sorted(bootstrap_estimates);
    let tail = level.tail_probability();
    Ok(ConfidenceInterval::new(
        quantile_sorted(&sorted, tail),
        quantile_sorted(&sorted, 1.0 - tail),
        original_estimate,
        level.value(),
    ))
}
