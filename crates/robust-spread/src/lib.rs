//! Spread measurements for benchmark timings
//!
//! This crate provides the scale side of the digest engine:
//! - Streaming moments ([`OnlineMoments`]) over every observation of a run,
//!   with a log-normal view ([`LogNormalMoments`])
//! - MAD (Median Absolute Deviation) with the normal consistency factor
//! - Scale-free coefficients (coefficient of variation, quartile coefficient)
//!
//! # Examples
//!
//! ```rust
//! use robust_spread::{OnlineMoments, normalized_mad};
//! use robust_core::Generator;
//!
//! let sample = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]; // Outlier!
//!
//! let moments = OnlineMoments::from_slice(&sample);
//! assert!(moments.std(1) > 30.0);
//!
//! // MAD ignores the outlier
//! let mut rng = Generator::new(0);
//! let scale = normalized_mad(&sample, 3.5, &mut rng);
//! assert!(scale < 3.0);
//! ```

pub mod dispersion;
pub mod mad;
pub mod moments;

// Re-exports
pub use dispersion::{coefficient_of_variation, quartile_coefficient};
pub use mad::{mad, normalized_mad, normalized_mad_about_median, NORMAL_CONSISTENCY};
pub use moments::{LogNormalMoments, MomentAccumulator, OnlineMoments};
