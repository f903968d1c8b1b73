//! # Error Types
//!
//! Structured error types for roof_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use roof_core::errors::{RoofError, RoofResult};
//!
//! fn validate_eave_length(eave_length: f64) -> RoofResult<()> {
//!     if eave_length <= 0.0 {
//!         return Err(RoofError::InvalidInput {
//!             field: "eave_length".to_string(),
//!             value: eave_length.to_string(),
//!             reason: "Eave length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for roof_core operations
pub type RoofResult<T> = Result<T, RoofError>;

/// Structured error type for take-off operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum RoofError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl RoofError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        RoofError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        RoofError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RoofError::InvalidInput { .. } => "INVALID_INPUT",
            RoofError::FileError { .. } => "FILE_ERROR",
            RoofError::SerializationError { .. } => "SERIALIZATION_ERROR",
            RoofError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = RoofError::invalid_input("eave_length", "-5.0", "Eave length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: RoofError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RoofError::invalid_input("run", "-1", "negative").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            RoofError::file_error("open", "/tmp/x.json", "not found").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = RoofError::invalid_input("sheet_overlap", "3", "Overlap must be less than sheet width");
        let msg = error.to_string();
        assert!(msg.contains("sheet_overlap"));
        assert!(msg.contains("Overlap must be less than sheet width"));
    }
}
