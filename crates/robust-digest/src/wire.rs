//! JSON wire record of a digest
//!
//! ```json
//! {
//!   "@type": "robust-digest/0.1.0",
//!   "@uuid": "…",
//!   "samples": [{ "@ref": "…", "outlier": false }],
//!   "uncertainty": 0.012,
//!   "statistic": [101.2],
//!   "isReady": true
//! }
//! ```
//!
//! Only non-rejected samples are written. Their classification survives a
//! round trip; the center and scale do not.

use crate::digest::{Digest, Entry};
use crate::error::{DigestError, Result};
use crate::options::DigestOptions;
use crate::status::Status;
use crate::store::AnnotationStore;
use robust_modality::EstimatorKey;
use robust_sample::{PointEstimate, SampleId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

const TYPE_PREFIX: &str = "robust-digest/";

/// Reference to one retained sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRef {
    #[serde(rename = "@ref")]
    pub reference: String,
    pub outlier: bool,
}

/// Serialized form of a [`Digest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestRecord {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@uuid")]
    pub uuid: Uuid,
    pub samples: Vec<SampleRef>,
    /// Non-finite values are written as `f64::MAX`
    pub uncertainty: f64,
    pub statistic: Vec<f64>,
    #[serde(rename = "isReady")]
    pub is_ready: bool,
}

impl DigestRecord {
    /// Version-stamped type tag written by this crate
    pub fn current_type() -> String {
        format!("{TYPE_PREFIX}{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Digest {
    /// Wire record of the non-rejected samples
    pub fn to_wire(&self) -> DigestRecord {
        let kept: Vec<&Entry> = self
            .entries()
            .iter()
            .filter(|e| e.status != Status::Rejected)
            .collect();
        let uncertainty = if self.uncertainty().is_finite() {
            self.uncertainty()
        } else {
            f64::MAX
        };

        DigestRecord {
            kind: DigestRecord::current_type(),
            uuid: self.id(),
            samples: kept
                .iter()
                .map(|e| SampleRef {
                    reference: e.estimate.sample().to_string(),
                    outlier: e.status == Status::Outlier,
                })
                .collect(),
            uncertainty,
            statistic: kept.iter().map(|e| e.estimate.value()).collect(),
            is_ready: self.is_ready(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    /// Restore a digest, resolving every sample reference against `store`
    ///
    /// `key` names the estimator the statistic was computed with. An
    /// uncertainty of `f64::MAX` is read back as infinity.
    #[instrument(skip(record, store, options), fields(uuid = %record.uuid, samples = record.samples.len()))]
    pub fn from_wire<S>(
        record: &DigestRecord,
        store: &S,
        key: EstimatorKey,
        options: DigestOptions,
    ) -> Result<Self>
    where
        S: AnnotationStore + ?Sized,
    {
        if !record.kind.starts_with(TYPE_PREFIX) {
            return Err(DigestError::UnsupportedType(record.kind.clone()));
        }
        if record.samples.len() != record.statistic.len() {
            return Err(DigestError::MalformedRecord(format!(
                "{} samples but {} statistic values",
                record.samples.len(),
                record.statistic.len()
            )));
        }
        options.validate();

        let entries = record
            .samples
            .iter()
            .zip(&record.statistic)
            .map(|(sample, &value)| {
                let id: SampleId = sample
                    .reference
                    .parse()
                    .map_err(|_| DigestError::UnresolvedReference(sample.reference.clone()))?;
                if store.annotations(&id).is_none() {
                    return Err(DigestError::UnresolvedReference(sample.reference.clone()));
                }
                Ok(Entry {
                    estimate: PointEstimate::new(value, id, key),
                    status: if sample.outlier {
                        Status::Outlier
                    } else {
                        Status::Consistent
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let uncertainty = if record.uncertainty == f64::MAX {
            f64::INFINITY
        } else {
            record.uncertainty
        };
        debug!(ready = record.is_ready, "digest restored");
        Ok(Self::from_parts(
            record.uuid,
            options,
            entries,
            uncertainty,
            record.is_ready,
        ))
    }

    pub fn from_json<S>(
        json: &str,
        store: &S,
        key: EstimatorKey,
        options: DigestOptions,
    ) -> Result<Self>
    where
        S: AnnotationStore + ?Sized,
    {
        let record: DigestRecord = serde_json::from_str(json)?;
        Self::from_wire(&record, store, key, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robust_sample::Annotations;
    use std::collections::BTreeMap;

    fn stored(values: &[f64]) -> (Vec<SampleId>, BTreeMap<SampleId, Annotations>) {
        let ids: Vec<SampleId> = values.iter().map(|_| SampleId::new()).collect();
        let store = ids
            .iter()
            .zip(values)
            .map(|(&id, &v)| (id, [("hsm".to_string(), v)].into_iter().collect()))
            .collect();
        (ids, store)
    }

    #[test]
    fn test_record_shape() {
        let (ids, store) = stored(&[10.0, 10.1, 9.9]);
        let digest =
            Digest::from_annotations(&ids, &store, EstimatorKey::Hsm, DigestOptions::new())
                .unwrap();
        let json: serde_json::Value = serde_json::from_str(&digest.to_json().unwrap()).unwrap();

        assert_eq!(json["@type"], DigestRecord::current_type());
        assert_eq!(json["@uuid"], digest.id().to_string());
        assert_eq!(json["isReady"], true);
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
        assert_eq!(json["samples"][0]["@ref"], ids[0].to_string());
        assert_eq!(json["samples"][0]["outlier"], false);
        assert_eq!(json["statistic"][1], 10.1);
    }

    #[test]
    fn test_round_trip_keeps_classification() {
        let (ids, store) = stored(&[10.0, 12.0, 9.0, 30.0]);
        let options = DigestOptions::new().with_sizes(3, 10).with_threshold(0.01);
        let digest = Digest::from_annotations(&ids, &store, EstimatorKey::Hsm, options).unwrap();
        assert!(!digest.is_ready());

        let json = digest.to_json().unwrap();
        let restored = Digest::from_json(&json, &store, EstimatorKey::Hsm, options).unwrap();
        assert_eq!(restored.id(), digest.id());
        assert_eq!(restored.stat(), digest.stat());
        assert_eq!(restored.statistic(), digest.statistic());
        assert_relative_eq!(restored.uncertainty(), digest.uncertainty(), max_relative = 1e-12);
        assert!(restored.center().is_nan());
    }

    #[test]
    fn test_unresolved_reference() {
        let (ids, store) = stored(&[10.0, 10.1, 9.9]);
        let digest =
            Digest::from_annotations(&ids, &store, EstimatorKey::Hsm, DigestOptions::new())
                .unwrap();
        let mut record = digest.to_wire();

        let (_, other) = stored(&[1.0]);
        let err = Digest::from_wire(&record, &other, EstimatorKey::Hsm, DigestOptions::new())
            .unwrap_err();
        assert!(matches!(err, DigestError::UnresolvedReference(r) if r == ids[0].to_string()));

        record.samples[1].reference = "not-a-uuid".to_string();
        let err = Digest::from_wire(&record, &store, EstimatorKey::Hsm, DigestOptions::new())
            .unwrap_err();
        assert!(matches!(err, DigestError::UnresolvedReference(r) if r == "not-a-uuid"));
    }

    #[test]
    fn test_rejects_foreign_and_malformed_records() {
        let (ids, store) = stored(&[10.0, 10.1]);
        let digest =
            Digest::from_annotations(&ids, &store, EstimatorKey::Hsm, DigestOptions::new())
                .unwrap();

        let mut foreign = digest.to_wire();
        foreign.kind = "other-digest/1.0".to_string();
        assert!(matches!(
            Digest::from_wire(&foreign, &store, EstimatorKey::Hsm, DigestOptions::new()),
            Err(DigestError::UnsupportedType(_))
        ));

        let mut short = digest.to_wire();
        short.statistic.pop();
        assert!(matches!(
            Digest::from_wire(&short, &store, EstimatorKey::Hsm, DigestOptions::new()),
            Err(DigestError::MalformedRecord(_))
        ));

        assert!(matches!(
            Digest::from_json("{", &store, EstimatorKey::Hsm, DigestOptions::new()),
            Err(DigestError::Serialization(_))
        ));
    }

    #[test]
    fn test_infinite_uncertainty_on_the_wire() {
        // Zero mean makes the relative spread infinite
        let (ids, store) = stored(&[-1.0, 1.0, -1.0, 1.0]);
        let digest =
            Digest::from_annotations(&ids, &store, EstimatorKey::Hsm, DigestOptions::new())
                .unwrap();
        assert!(digest.uncertainty().is_infinite());

        let record = digest.to_wire();
        assert_eq!(record.uncertainty, f64::MAX);
        let restored =
            Digest::from_wire(&record, &store, EstimatorKey::Hsm, DigestOptions::new()).unwrap();
        assert!(restored.uncertainty().is_infinite());
        assert!(!restored.is_ready());
    }
}
