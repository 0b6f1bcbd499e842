//! Baseline digests of benchmark point estimates
//!
//! Every stored run of a benchmark contributes one [`PointEstimate`]. A
//! [`Digest`] centers those estimates robustly, rejects the most outlying
//! ones until at most `max_size` remain, and marks the survivors
//! [`Status::Consistent`] once enough of them agree within the configured
//! uncertainty threshold. Digests serialize to a small JSON
//! [`DigestRecord`] that references samples by id, and are restored against
//! any [`AnnotationStore`].
//!
//! [`RankConflation`] is the older, rank-based way of reaching the same
//! verdict from the raw observations of each run.
//!
//! # Example
//!
//! ```rust
//! use robust_digest::{Digest, DigestOptions, Status};
//! use robust_modality::EstimatorKey;
//! use robust_sample::{PointEstimate, SampleId};
//!
//! let estimates: Vec<PointEstimate> = [100.0, 101.0, 99.5, 100.4, 180.0]
//!     .into_iter()
//!     .map(|v| PointEstimate::new(v, SampleId::new(), EstimatorKey::Hsm))
//!     .collect();
//!
//! let digest = Digest::new(estimates, DigestOptions::new().with_sizes(3, 4));
//! assert_eq!(digest.rejected().len(), 1);
//! assert_eq!(digest.stat().len(), 4);
//! assert!(digest.stat().values().all(|&s| s != Status::Rejected));
//! ```

mod conflation;
mod digest;
mod error;
mod options;
mod status;
mod store;
mod tour;
mod weight;
mod wire;

pub use conflation::{Conflation, RankConflation};
pub use digest::{Digest, Entry};
pub use error::{DigestError, Result};
pub use options::{DigestOptions, CENTER_COVERAGE};
pub use status::Status;
pub use store::AnnotationStore;
pub use weight::OutlierWeight;
pub use wire::{DigestRecord, SampleRef};

pub use robust_sample::{Annotations, PointEstimate, SampleId};
