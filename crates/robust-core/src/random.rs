//! Seedable random generator shared by every resampling algorithm
//!
//! All randomness in the workspace flows through [`Generator`], an explicit
//! value owned by the caller. Two generators built from the same seed produce
//! the same draw sequence on every platform (ChaCha8 is portable), and
//! [`Generator::fork`] derives independent sub-streams from the seed alone so
//! that work split across threads still consumes a fixed sequence per unit.

use rand::distributions::Open01;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when the caller does not provide one
pub const DEFAULT_SEED: u64 = 0x5EED_D16E_57;

/// Explicit, forkable pseudo-random generator
#[derive(Debug, Clone)]
pub struct Generator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Generator {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this generator was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the independent sub-stream `stream` of this generator's seed
    ///
    /// The result depends only on the seed and `stream`, never on how many
    /// values have already been drawn from `self`.
    pub fn fork(&self, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(stream.wrapping_add(1));
        Self {
            seed: self.seed,
            rng,
        }
    }

    /// Uniform draw in `[0, 1)`
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform draw in the open interval `(0, 1)`, safe to pass to `ln`
    #[inline]
    pub fn next_open01(&mut self) -> f64 {
        self.rng.sample(Open01)
    }

    /// Discrete uniform index in `[0, n)`
    ///
    /// # Panics
    /// Panics if `n == 0`
    #[inline]
    pub fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "Cannot draw an index from an empty range");
        self.rng.gen_range(0..n)
    }

    /// Discrete uniform index in `[lo, hi]`
    #[inline]
    pub fn next_index_between(&mut self, lo: usize, hi: usize) -> usize {
        assert!(lo <= hi, "Invalid index range [{lo}, {hi}]");
        self.rng.gen_range(lo..=hi)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Generator {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
