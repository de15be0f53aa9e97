//! Custom error types for subkeep
//!
//! The four request-facing kinds (`NotFound`, `Forbidden`, `BadRequest`,
//! `Internal`) are what the simulation and calendar services surface to their
//! callers. The remaining variants cover configuration, storage and export.

use thiserror::Error;

/// The main error type for subkeep operations
#[derive(Error, Debug)]
pub enum SubkeepError {
    /// Referenced entity or undo slot does not exist
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Caller does not own the referenced entity
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed hypothetical input or expired undo slot
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A downstream write failed for an otherwise valid id
    #[error("Internal error: {0}")]
    Internal(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SubkeepError {
    /// Create a "not found" error for subscriptions
    pub fn subscription_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Subscription",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a missing undo slot
    pub fn undo_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Undo entry",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

impl From<std::io::Error> for SubkeepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SubkeepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SubkeepError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for subkeep operations
pub type SubkeepResult<T> = Result<T, SubkeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = SubkeepError::subscription_not_found("sub-1234abcd");
        assert_eq!(err.to_string(), "Subscription not found: sub-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_forbidden());
    }

    #[test]
    fn test_request_kinds() {
        assert!(SubkeepError::Forbidden("x".into()).is_forbidden());
        assert!(SubkeepError::BadRequest("x".into()).is_bad_request());
        assert!(SubkeepError::Internal("x".into()).is_internal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SubkeepError = io_err.into();
        assert!(matches!(err, SubkeepError::Io(_)));
    }
}
