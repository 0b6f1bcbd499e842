//! Error types for robust statistical analysis
//!
//! Provides a unified error type for all robust-bench crates. Caller contract
//! violations (negative sizes, out-of-range levels) panic instead; this type
//! covers the conditions a caller can recover from.

use thiserror::Error;

/// Core error type for robust statistical operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input to `operation`
    pub fn empty_input(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation}: empty input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::InvalidInput("data contains duplicates".to_string());
        assert_eq!(err.to_string(), "Invalid input: data contains duplicates");
    }

    #[test]
    fn test_empty_input_names_operation() {
        let err = Error::empty_input("bootstrap");
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: bootstrap: empty input");
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
