//! Bootstrap confidence intervals for robust estimators
//!
//! Robust location estimators such as the half-sample mode have skewed,
//! poorly understood sampling distributions. This crate quantifies their
//! uncertainty with the studentized (double) bootstrap:
//!
//! - **Resampling**: multinomial counts replayed in original order, with
//!   optional Gaussian smoothing ([`Resampler`])
//! - **Studentized replicates**: nested resamples estimate each replicate's
//!   standard error ([`StudentizedResampler`], [`PairedStudentizedResampler`])
//! - **Intervals and tests**: studentized and percentile intervals, plus a
//!   two-sample difference test ([`StudentizedBootstrap`])
//!
//! # Example
//!
//! ```rust
//! use robust_confidence::StudentizedBootstrap;
//! use robust_core::utils::mean;
//!
//! let sample: Vec<f64> = (1..=40).map(f64::from).collect();
//! let bootstrap = StudentizedBootstrap::new()
//!     .with_resamples(200)
//!     .with_inner_resamples(20)
//!     .with_seed(7);
//!
//! let ci = bootstrap.confidence_interval(&sample, &mean).unwrap();
//! assert!(ci.contains(20.5));
//! ```

mod bootstrap;
mod methods;
mod resample;
mod studentized;
mod traits;
mod types;

pub use bootstrap::StudentizedBootstrap;
pub use methods::{bootstrap_t_p_value, percentile_interval, studentized_interval};
pub use resample::{Resampler, Smoothing};
pub use studentized::{PairedStudentizedResampler, Replicate, StudentizedResampler};
pub use traits::Statistic;
pub use types::{ConfidenceInterval, ConfidenceLevel, DifferenceTest};
