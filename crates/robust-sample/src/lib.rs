//! Per-run benchmark samples
//!
//! A [`DurationSample`] collects the elapsed times of one benchmark run. It
//! keeps streaming moments over every observation and a bounded uniform
//! subset ([`ReservoirSampler`], Algorithm L) for the robust estimators, and
//! reduces itself to a [`PointEstimate`] tagged with its [`SampleId`].
//!
//! # Example
//!
//! ```rust
//! use robust_modality::EstimatorKey;
//! use robust_sample::DurationSample;
//! use std::time::Duration;
//!
//! let mut sample = DurationSample::new(256, 42);
//! let mut source = [120u64, 118, 121, 119, 250, 120].map(Duration::from_micros).into_iter();
//! sample.fill_from(&mut source, usize::MAX);
//!
//! let estimate = sample.point_estimate(EstimatorKey::Hsm).unwrap();
//! assert!((118.0..=121.0).contains(&estimate.value()));
//! ```

mod duration;
mod id;
mod options;
mod reservoir;
mod source;

pub use duration::{DurationSample, SampleRecord};
pub use id::{Annotations, PointEstimate, SampleId};
pub use options::SampleOptions;
pub use reservoir::ReservoirSampler;
pub use source::TimeSource;
