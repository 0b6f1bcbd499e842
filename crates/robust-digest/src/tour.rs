//! Redirection of outlier draws that hit an already rejected point
//!
//! The tour orders indices from most to least outlying and links each to
//! its successor, wrapping around at the end. A draw that lands on a
//! rejected index follows the links to the first index still in play; the
//! visited links are then pointed straight at that index so later draws
//! skip the rejected stretch in one hop.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub(crate) struct Tour {
    next: Vec<usize>,
}

impl Tour {
    /// Build the tour for `weights`, heaviest first, ties by index
    pub(crate) fn new(weights: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| {
            weights[b]
                .partial_cmp(&weights[a])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mut next = vec![0; weights.len()];
        for (k, &i) in order.iter().enumerate() {
            next[i] = order[(k + 1) % order.len()];
        }
        Self { next }
    }

    /// First index at or after `start` along the tour that is not rejected
    ///
    /// # Panics
    /// Panics if every index is rejected.
    pub(crate) fn find(&mut self, start: usize, rejected: &[bool]) -> usize {
        assert!(rejected.iter().any(|&r| !r), "Every index is rejected");
        let mut root = start;
        while rejected[root] {
            root = self.next[root];
        }

        let mut cur = start;
        while cur != root {
            let following = self.next[cur];
            self.next[cur] = root;
            cur = following;
        }
        root
    }
}
