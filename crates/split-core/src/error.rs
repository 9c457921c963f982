//! Error types for split-time analysis
//!
//! Provides a unified error type for all split-analysis crates.

use thiserror::Error;

/// Core error type for split-time analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A class produced no segment with at least one valid split
    #[error("No valid segments in class {class}")]
    NoValidSegments { class: String },

    /// The run was cancelled before its results were merged
    #[error("Analysis cancelled")]
    Cancelled,

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a threshold outside its admissible range
    pub fn invalid_threshold(name: &str, value: f64, expectation: &str) -> Self {
        Self::Config(format!("{name} = {value} must be {expectation}"))
    }

    /// Create an error for thresholds that must be strictly ordered
    pub fn unordered_thresholds(lower: &str, upper: &str) -> Self {
        Self::Config(format!("{lower} must be strictly less than {upper}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("result list 4 has no class D10".to_string());
        assert_eq!(err.to_string(), "Invalid input: result list 4 has no class D10");

        let err = Error::NoValidSegments { class: "H21E".to_string() };
        assert_eq!(err.to_string(), "No valid segments in class H21E");

        let err = Error::Cancelled;
        assert_eq!(err.to_string(), "Analysis cancelled");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_threshold("anomaly.high", -0.5, "positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: anomaly.high = -0.5 must be positive"
        );

        let err = Error::unordered_thresholds("mistake.major", "mistake.severe");
        assert!(err.to_string().contains("strictly less than"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
