//! # Error Types
//!
//! Structured error types for insul_core. Every failure an estimate run can
//! hit maps to exactly one variant, so callers can present it to the user or
//! branch on [`EstimateError::error_code`] without parsing messages.
//!
//! ## Example
//!
//! ```rust
//! use insul_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_height(height_ft: f64) -> EstimateResult<()> {
//!     if height_ft < 0.0 {
//!         return Err(EstimateError::negative_dimension("wall.height_ft", height_ft));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for insul_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimate operations.
///
/// An estimate either completes or fails with one of these; there is no
/// partial report.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// The requested (R-value, width) pair is not in the catalog
    #[error("Unknown material: {r_value} at {width_in}\" width")]
    UnknownMaterial { r_value: String, width_in: u32 },

    /// Coverage per bag is zero, negative or not a number where a division is required
    #[error("Invalid coverage for '{context}': {coverage} sq ft/bag - coverage must be positive")]
    InvalidCoverage { context: String, coverage: f64 },

    /// A geometric input is below zero
    #[error("Negative dimension for '{field}': {value}")]
    NegativeDimension { field: String, value: f64 },

    /// A non-geometric input is invalid (negative price, zero spacing, etc.)
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

    /// JSON or TOML (de)serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Job file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Report document could not be compiled or emitted
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },
}

impl EstimateError {
    /// Create an UnknownMaterial error
    pub fn unknown_material(r_value: impl Into<String>, width_in: u32) -> Self {
        EstimateError::UnknownMaterial {
            r_value: r_value.into(),
            width_in,
        }
    }

    /// Create an InvalidCoverage error
    pub fn invalid_coverage(context: impl Into<String>, coverage: f64) -> Self {
        EstimateError::InvalidCoverage {
            context: context.into(),
            coverage,
        }
    }

    /// Create a NegativeDimension error
    pub fn negative_dimension(field: impl Into<String>, value: f64) -> Self {
        EstimateError::NegativeDimension {
            field: field.into(),
            value,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimateError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            EstimateError::InvalidCoverage { .. } => "INVALID_COVERAGE",
            EstimateError::NegativeDimension { .. } => "NEGATIVE_DIMENSION",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EstimateError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }

    /// Whether the error comes from the user's inputs rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EstimateError::UnknownMaterial { .. }
                | EstimateError::InvalidCoverage { .. }
                | EstimateError::NegativeDimension { .. }
                | EstimateError::InvalidInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::unknown_material("R12", 16);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnknownMaterial\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::unknown_material("R40", 15).error_code(), "UNKNOWN_MATERIAL");
        assert_eq!(EstimateError::invalid_coverage("wall", 0.0).error_code(), "INVALID_COVERAGE");
        assert_eq!(
            EstimateError::negative_dimension("wall.height_ft", -2.0).error_code(),
            "NEGATIVE_DIMENSION"
        );
    }

    #[test]
    fn test_input_errors_are_flagged() {
        assert!(EstimateError::negative_dimension("x", -1.0).is_input_error());
        assert!(!EstimateError::serialization("bad json").is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let error = EstimateError::unknown_material("R28", 15);
        assert_eq!(error.to_string(), "Unknown material: R28 at 15\" width");
    }
}
