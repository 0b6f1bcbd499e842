//! Order-statistic kernel: partitioning, selection and binary search
//!
//! Every estimator that needs an order statistic (medians, MAD, shortest
//! intervals) goes through these three primitives. They work on mutable views
//! (`&mut [T]`) and reorder them in place.

use crate::Generator;

/// Lomuto partition of `view` around the element at index `pivot`
///
/// The pivot is swapped to the end, every element strictly less than it is
/// moved to the front, and the pivot is placed right after them. Elements equal
/// to the pivot stay on its right-hand side. Returns the pivot's final index.
///
/// # Panics
/// Panics if `pivot` is out of bounds.
pub fn partition<T: PartialOrd>(view: &mut [T], pivot: usize) -> usize {
    assert!(
        pivot < view.len(),
        "Pivot index {pivot} out of bounds for view of length {}",
        view.len()
    );
    let last = view.len() - 1;
    view.swap(pivot, last);

    let mut store = 0;
    for i in 0..last {
        if view[i] < view[last] {
            view.swap(i, store);
            store += 1;
        }
    }
    view.swap(store, last);
    store
}

/// Select the k-th smallest element of `view` in expected linear time
///
/// Returns the index at which the k-th order statistic now sits, or `None`
/// when `k` is out of bounds. The pivot is drawn uniformly from the active
/// range, so the expected cost is O(n) regardless of the input order.
///
/// # Examples
///
/// ```rust
/// use robust_core::{quickselect, Generator};
///
/// let mut data = vec![5.0, 3.0, 1.0, 4.0, 2.0];
/// let mut rng = Generator::new(0);
/// let idx = quickselect(&mut data, 0, &mut rng).unwrap();
/// assert_eq!(data[idx], 1.0);
/// assert!(quickselect(&mut data, 5, &mut rng).is_none());
/// ```
pub fn quickselect<T: PartialOrd>(view: &mut [T], k: usize, rng: &mut Generator) -> Option<usize> {
    if k >= view.len() {
        return None;
    }

    let mut lo = 0;
    let mut hi = view.len() - 1;
    loop {
        if lo == hi {
            return Some(lo);
        }
        let pivot = rng.next_index_between(lo, hi);
        let p = lo + partition(&mut view[lo..=hi], pivot - lo);
        match k.cmp(&p) {
            std::cmp::Ordering::Equal => return Some(p),
            std::cmp::Ordering::Less => hi = p - 1,
            std::cmp::Ordering::Greater => lo = p + 1,
        }
    }
}

/// Value of the k-th order statistic, reordering `view` as a side effect
pub fn select_nth<T: PartialOrd + Copy>(view: &mut [T], k: usize, rng: &mut Generator) -> Option<T> {
    quickselect(view, k, rng).map(|idx| view[idx])
}

/// Median of `view` via selection (average of the two middle values for even lengths)
///
/// Returns 0.0 for an empty view.
pub fn median(view: &mut [f64], rng: &mut Generator) -> f64 {
    let n = view.len();
    if n == 0 {
        return 0.0;
    }
    let upper = select_nth(view, n / 2, rng).unwrap_or(0.0);
    if n % 2 == 1 {
        return upper;
    }
    // After selecting n/2 everything left of it is <= upper
    let lower = view[..n / 2]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    (lower + upper) / 2.0
}

/// First index `i` such that `!less(&view[i], value)`
///
/// Classic lower-bound search over a view sorted with respect to `less`.
/// Returns `view.len()` when every element is less than `value` and `0` for
/// an empty view.
///
/// # Examples
///
/// ```rust
/// use robust_core::lower_bound;
///
/// let data = [1.0, 2.0, 2.0, 2.0, 3.0];
/// assert_eq!(lower_bound(&data, &2.0, |a, b| a < b), 1);
/// assert_eq!(lower_bound(&data, &9.0, |a, b| a < b), 5);
/// ```
pub fn lower_bound<T, V, F>(view: &[T], value: &V, mut less: F) -> usize
where
    F: FnMut(&T, &V) -> bool,
{
    let mut lo = 0;
    let mut hi = view.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if less(&view[mid], value) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
