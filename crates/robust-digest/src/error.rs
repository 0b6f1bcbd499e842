//! Error types for digest construction and (de)serialization

use robust_modality::EstimatorKey;
use robust_sample::SampleId;
use thiserror::Error;

/// Recoverable failures while assembling or restoring a digest
#[derive(Error, Debug)]
pub enum DigestError {
    /// A sample has no annotation bag, or the bag lacks the estimator key
    #[error("Sample {sample} has no '{key}' annotation")]
    MissingAnnotation { sample: SampleId, key: EstimatorKey },

    /// A wire record refers to a sample the store cannot resolve
    #[error("Unresolved sample reference '{0}'")]
    UnresolvedReference(String),

    /// The wire record was written by something other than this engine
    #[error("Unsupported digest type '{0}'")]
    UnsupportedType(String),

    /// The wire record is internally inconsistent
    #[error("Malformed digest record: {0}")]
    MalformedRecord(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Core computation error
    #[error("Core computation error: {0}")]
    Core(#[from] robust_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DigestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let sample = SampleId::new();
        let err = DigestError::MissingAnnotation {
            sample,
            key: EstimatorKey::Hsm,
        };
        assert_eq!(err.to_string(), format!("Sample {sample} has no 'hsm' annotation"));

        let err = DigestError::UnresolvedReference("abc".to_string());
        assert_eq!(err.to_string(), "Unresolved sample reference 'abc'");
    }

    #[test]
    fn test_from_core_error() {
        let err: DigestError = robust_core::Error::empty_input("digest").into();
        assert!(matches!(err, DigestError::Core(_)));
    }
}
