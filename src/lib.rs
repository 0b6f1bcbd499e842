//! Robust baselines for noisy benchmark timings
//!
//! This crate re-exports the workspace:
//!
//! - [`robust_core`]: selection, quantiles, distributions and the seeded generator
//! - [`robust_spread`]: streaming moments, MAD and relative spread
//! - [`robust_modality`]: mode and location estimators (HSM, shorth, KDE)
//! - [`robust_confidence`]: studentized bootstrap intervals and difference tests
//! - [`robust_hypothesis`]: rank tests and normality
//! - [`robust_sample`]: per-run duration samples and their point estimates
//! - [`robust_digest`]: outlier-filtered baselines over many runs
//!
//! # Example
//!
//! ```rust
//! use robust_bench::prelude::*;
//! use std::time::Duration;
//!
//! let runs: Vec<DurationSample> = (0..4)
//!     .map(|run| {
//!         let mut sample = DurationSample::new(64, run);
//!         let mut source = (0..40u64)
//!             .map(|i| Duration::from_micros(100 + (i * 7 + run) % 5))
//!             .collect::<Vec<_>>()
//!             .into_iter();
//!         sample.fill_from(&mut source, usize::MAX);
//!         sample
//!     })
//!     .collect();
//!
//! let refs: Vec<&DurationSample> = runs.iter().collect();
//! let digest = Digest::from_samples(&refs, EstimatorKey::Hsm, DigestOptions::new()).unwrap();
//! assert!(digest.is_ready());
//! ```

pub use robust_confidence;
pub use robust_core;
pub use robust_digest;
pub use robust_hypothesis;
pub use robust_modality;
pub use robust_sample;
pub use robust_spread;

/// Commonly used types
pub mod prelude {
    pub use robust_confidence::{
        ConfidenceInterval, ConfidenceLevel, DifferenceTest, Smoothing, StudentizedBootstrap,
    };
    pub use robust_core::{Error, Generator, Result};
    pub use robust_digest::{
        AnnotationStore, Digest, DigestError, DigestOptions, DigestRecord, RankConflation,
        Status,
    };
    pub use robust_modality::EstimatorKey;
    pub use robust_sample::{
        Annotations, DurationSample, PointEstimate, SampleId, SampleOptions, SampleRecord,
        TimeSource,
    };
    pub use robust_spread::OnlineMoments;
}
