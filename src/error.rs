//! Custom error types for phantom-budget
//!
//! This module defines the error hierarchy for the plugin using thiserror.
//! Removal and classification never fail; these errors come from startup,
//! configuration, the diagnostic log and budget snapshot I/O.

use thiserror::Error;

/// The main error type for phantom-budget operations
#[derive(Error, Debug)]
pub enum PhantomError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A required host service was missing or refused a request
    #[error("Host service unavailable: {0}")]
    HostServiceUnavailable(String),

    /// Budget snapshot errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },
}

impl PhantomError {
    /// Create a "not found" error for cheat text no registered cheat matches
    pub fn cheat_not_found(text: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cheat",
            identifier: text.into(),
        }
    }

    /// Create a "duplicate" error for departments
    pub fn duplicate_department(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Department",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for occupants
    pub fn duplicate_occupant(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Occupant",
            identifier: identifier.into(),
        }
    }

}

impl From<std::io::Error> for PhantomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PhantomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for phantom-budget operations
pub type PhantomResult<T> = Result<T, PhantomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PhantomError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_cheat_not_found_error() {
        let err = PhantomError::cheat_not_found("moolah fire");
        assert_eq!(err.to_string(), "Cheat not found: moolah fire");
    }

    #[test]
    fn test_host_service_error() {
        let err = PhantomError::HostServiceUnavailable("message server".into());
        assert_eq!(err.to_string(), "Host service unavailable: message server");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PhantomError = io_err.into();
        assert!(matches!(err, PhantomError::Io(_)));
    }
}
