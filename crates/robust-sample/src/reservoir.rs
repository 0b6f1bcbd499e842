//! Bounded uniform sampling of an unbounded stream (Algorithm L)
//!
//! The first `capacity` items fill the reservoir. After that the sampler
//! jumps ahead by geometric skip distances instead of drawing once per item:
//! with `w = exp(ln(U) / capacity)` the next replacement happens after
//! `floor(ln(U) / ln_1p(-w)) + 1` further items, replaces a uniformly chosen
//! slot, and shrinks `w` by another factor of `exp(ln(U) / capacity)`.

use robust_core::Generator;

/// Fixed-capacity uniform random subset of a stream
#[derive(Debug, Clone)]
pub struct ReservoirSampler<T = f64> {
    capacity: usize,
    items: Vec<T>,
    total: u64,
    next: u64,
    w: f64,
    rng: Generator,
}

impl<T> ReservoirSampler<T> {
    /// Create an empty reservoir holding at most `capacity` items
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, rng: Generator) -> Self {
        assert!(capacity > 0, "Reservoir capacity must be positive");
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
            total: 0,
            next: 0,
            w: 1.0,
            rng,
        }
    }

    fn shrink_weight(&mut self) {
        self.w *= (self.rng.next_open01().ln() / self.capacity as f64).exp();
    }

    fn schedule_next(&mut self) {
        let skip = (self.rng.next_open01().ln() / (-self.w).ln_1p()).floor();
        // Saturating float-to-int conversion bounds absurdly long skips
        self.next = self.total.saturating_add(skip as u64).saturating_add(1);
    }

    /// Offer an item to the reservoir
    ///
    /// Returns `true` when a previously retained item was evicted.
    pub fn push(&mut self, item: T) -> bool {
        self.total += 1;
        if self.items.len() < self.capacity {
            self.items.push(item);
            if self.items.len() == self.capacity {
                self.shrink_weight();
                self.schedule_next();
            }
            return false;
        }

        if self.total < self.next {
            return false;
        }
        let slot = self.rng.next_index(self.capacity);
        self.items[slot] = item;
        self.shrink_weight();
        self.schedule_next();
        true
    }

    /// Number of retained items, `min(total, capacity)`
    pub fn n(&self) -> usize {
        self.items.len()
    }

    /// Maximum number of retained items
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items offered so far
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Retained items, in slot order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Extend<T> for ReservoirSampler<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
