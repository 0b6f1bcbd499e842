//! Median Absolute Deviation (MAD) estimators
//!
//! The raw MAD is `median(|x - center|)`. Multiplying by the normal
//! consistency factor makes it comparable to the standard deviation for
//! Gaussian data.

use robust_core::select::median;
use robust_core::Generator;

/// Consistency factor `1 / Phi^-1(3/4)` for normally distributed data
pub const NORMAL_CONSISTENCY: f64 = 1.482_602_218_505_602;

/// Median of the absolute deviations of `data` from `center`
///
/// Returns 0.0 for empty input. Selection uses `rng` for pivots only, so the
/// result does not depend on the generator state.
pub fn mad(data: &[f64], center: f64, rng: &mut Generator) -> f64 {
    let mut deviations: Vec<f64> = data.iter().map(|&x| (x - center).abs()).collect();
    median(&mut deviations, rng)
}

/// MAD scaled by [`NORMAL_CONSISTENCY`]
pub fn normalized_mad(data: &[f64], center: f64, rng: &mut Generator) -> f64 {
    NORMAL_CONSISTENCY * mad(data, center, rng)
}

/// Normalized MAD around the sample median
pub fn normalized_mad_about_median(data: &[f64], rng: &mut Generator) -> f64 {
    let mut view = data.to_vec();
    let center = median(&mut view, rng);
    normalized_mad(data, center, rng)
}
