//! Error types for pagecraft library.
//!
//! Editing operations never fail: stale targets and constraint violations
//! are reported through [`crate::editor::EditOutcome`]. These errors only
//! cover the boundaries where documents enter or leave the editor.

use std::io;
use thiserror::Error;

/// Result type alias for pagecraft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the document boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A loaded document violates a model invariant.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// No stored document exists under the given identifier.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// No exporter is registered for the requested format.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// An exporter reported a failure.
    #[error("Export error: {0}")]
    Export(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("lease-2024".to_string());
        assert_eq!(err.to_string(), "Document not found: lease-2024");

        let err = Error::InvalidDocument("document has no pages".to_string());
        assert_eq!(err.to_string(), "Invalid document: document has no pages");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
