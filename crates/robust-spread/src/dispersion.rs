//! Scale-free dispersion coefficients

/// Coefficient of variation `std / |mean|`
///
/// Zero spread gives 0.0 even when the mean is zero; a zero mean with
/// non-zero spread gives infinity.
pub fn coefficient_of_variation(mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        0.0
    } else if mean == 0.0 {
        f64::INFINITY
    } else {
        std / mean.abs()
    }
}

/// Quartile-style coefficient of dispersion `(hi - lo) / (hi + lo)`
///
/// Used for the relative width of an interval `[lo, hi]` of positive values;
/// 0.0 when `lo + hi == 0`.
pub fn quartile_coefficient(lo: f64, hi: f64) -> f64 {
    let sum = hi + lo;
    if sum == 0.0 {
        return 0.0;
    }
    (hi - lo) / sum
}
