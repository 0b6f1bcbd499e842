//! Core kernels and types shared by the robust benchmark statistics crates
//!
//! This crate holds the leaf-level building blocks every estimator in the
//! workspace relies on:
//!
//! 1. **Selection kernel** - quickselect, Lomuto partitioning and lower-bound
//!    search over mutable numeric views ([`select`])
//! 2. **Seeded generators** - a portable, forkable random source so that every
//!    resampling algorithm reproduces the same draws for the same seed
//!    ([`random`])
//! 3. **Distributions** - normal CDF/PPF and chi-squared tail probabilities
//!    ([`math`])
//!
//! # Example
//!
//! ```rust
//! use robust_core::{select::quickselect, Generator};
//!
//! let mut data = vec![9.0, 1.0, 8.0, 2.0, 7.0];
//! let mut rng = Generator::new(42);
//!
//! let idx = quickselect(&mut data, 2, &mut rng).unwrap();
//! assert_eq!(data[idx], 7.0);
//! ```

pub mod error;
pub mod math;
pub mod random;
pub mod select;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};
pub use random::Generator;
pub use select::{lower_bound, partition, quickselect, select_nth};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::math::distributions::{chi_squared, normal};
    pub use crate::select::{lower_bound, partition, quickselect, select_nth};
    pub use crate::utils::{mean, sorted, std_dev};
    pub use crate::{Generator, Result};
}
