//! Shortest interval search over a sorted sample

/// Find the shortest window of `k` consecutive observations in `sorted`
///
/// Returns inclusive indices `(lo, lo + k - 1)` minimizing
/// `sorted[hi] - sorted[lo]`. Widths equal to the minimum within machine
/// epsilon (relative to the widths) count as ties: the tied region is the
/// run of consecutive minimal windows starting at the first one, and the
/// returned window starts at the middle of that run. Minimal windows past a
/// wider one do not extend the region.
///
/// # Panics
/// Panics if `k == 0` or `k > sorted.len()`.
///
/// # Examples
///
/// ```rust
/// use robust_modality::modal_search;
///
/// assert_eq!(modal_search(&[3.0, 10.0, 11.0], 2), (1, 2));
/// // Three equally short windows: recentred on the middle one
/// assert_eq!(modal_search(&[1.0, 2.0, 3.0, 4.0], 2), (1, 2));
/// ```
pub fn modal_search(sorted: &[f64], k: usize) -> (usize, usize) {
    assert!(k > 0, "Window size must be positive");
    assert!(
        k <= sorted.len(),
        "Window size {k} exceeds sample size {}",
        sorted.len()
    );
    debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "Sample must be sorted");

    let span = k - 1;
    let mut best = f64::INFINITY;
    let mut first = 0;
    let mut last = 0;
    let mut open = false;

    for lo in 0..=sorted.len() - k {
        let width = sorted[lo + span] - sorted[lo];
        let tolerance = f64::EPSILON * width.abs().max(best.abs());
        if best.is_finite() && (width - best).abs() <= tolerance {
            if open {
                last = lo;
            }
        } else if width < best {
            best = width;
            first = lo;
            last = lo;
            open = true;
        } else {
            open = false;
        }
    }

    let lo = first + (last - first) / 2;
    (lo, lo + span)
}
