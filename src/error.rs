//! Error types for the Sentiscope library.
//!
//! The comment normalizer itself never fails; everything around it (loading
//! stopword resources, reading model artifacts, serving requests) reports
//! failures through [`SentiscopeError`].
//!
//! # Examples
//!
//! ```
//! use sentiscope::error::{Result, SentiscopeError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentiscopeError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Sentiscope operations.
#[derive(Error, Debug)]
pub enum SentiscopeError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (patterns, stopword resources)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model artifact content does not fit together
    #[error("Model error: {0}")]
    Model(String),

    /// A model or vectorizer artifact is missing on disk
    #[error("Model artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic anyhow error
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentiscopeError.
pub type Result<T> = std::result::Result<T, SentiscopeError>;

impl SentiscopeError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::Model(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::InvalidArgument(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the
    /// loaded resources.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SentiscopeError::InvalidArgument(_))
    }

    /// Message suitable for the end user: the bare text for client errors,
    /// the full display form otherwise.
    pub fn user_message(&self) -> String {
        match self {
            SentiscopeError::InvalidArgument(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SentiscopeError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = SentiscopeError::model("coef has 3 rows");
        assert_eq!(error.to_string(), "Model error: coef has 3 rows");

        let error = SentiscopeError::ArtifactNotFound(PathBuf::from("clf.json"));
        assert_eq!(error.to_string(), "Model artifact not found: clf.json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SentiscopeError::from(io_error);

        match error {
            SentiscopeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(SentiscopeError::invalid_argument("empty").is_client_error());
        assert!(!SentiscopeError::model("bad shape").is_client_error());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(SentiscopeError::invalid_argument("empty").user_message(), "empty");
        assert_eq!(
            SentiscopeError::config("bad port").user_message(),
            "Configuration error: bad port"
        );
    }
}
