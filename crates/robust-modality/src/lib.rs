//! Robust location estimators for benchmark samples
//!
//! Timing distributions are right-skewed and often multimodal, so the mean is
//! a poor summary of a benchmark run. This crate provides estimators that
//! target the densest region of the sample instead:
//!
//! - [`modal_search`]: the shortest window holding `k` sorted observations
//! - [`HalfSampleMode`]: recursive half-sample mode (HSM)
//! - [`Shorth`] / [`LeastMedianSquares`]: mean or midpoint of the shortest
//!   window covering a fixed fraction of the sample
//! - [`KernelDensityMode`]: Gaussian KDE maximum with a Silverman or
//!   cross-validated bandwidth
//!
//! Every estimator implements [`LocationEstimator`] and is addressable by an
//! [`EstimatorKey`].
//!
//! # Examples
//!
//! ```rust
//! use robust_modality::{hsm, EstimatorKey, LocationEstimator};
//!
//! let timings = [10.2, 10.1, 10.3, 10.2, 55.0, 10.25, 31.0];
//!
//! let mode = hsm(&timings);
//! assert!(mode.value > 10.0 && mode.value < 10.4);
//!
//! let estimator = EstimatorKey::Lms.estimator();
//! let lms = estimator.estimate(&timings);
//! assert!(lms.value < 11.0);
//! ```

pub mod classical;
pub mod hsm;
pub mod interval;
pub mod kde;
pub mod key;
pub mod shorth;
pub mod traits;
pub mod types;

// Re-exports
pub use classical::{SampleMean, SampleMedian};
pub use hsm::{hsm, HalfSampleMode};
pub use interval::modal_search;
pub use kde::{kde_mode, Bandwidth, KernelDensityMode};
pub use key::EstimatorKey;
pub use shorth::{lms, shorth, shorth_with, LeastMedianSquares, Shorth};
pub use traits::LocationEstimator;
pub use types::{KdeMode, ModeEstimate};
