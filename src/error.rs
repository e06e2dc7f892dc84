//! Error types for the UpStac workflow.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::models::RequestStatus;
use thiserror::Error;

/// Reason string reported for any lookup of an unknown test request.
pub const INVALID_ID_REASON: &str = "Invalid ID";

/// Errors returned by the test request workflow and query services.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    /// No test request exists with the given identifier
    #[error("Invalid ID")]
    NotFound(i64),

    /// The request exists but is not in the state the operation requires
    #[error("Invalid state transition to {attempted}: request {request_id} is {actual}, expected {expected}")]
    InvalidTransition {
        request_id: i64,
        attempted: RequestStatus,
        expected: RequestStatus,
        actual: RequestStatus,
    },

    /// The submitted payload is missing required fields
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The acting user may not perform the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(RepositoryError),
}

impl From<RepositoryError> for WorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(request_id) => WorkflowError::NotFound(request_id),
            other => WorkflowError::Storage(other),
        }
    }
}

/// Errors raised by test request and flow repositories.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// Record does not exist
    #[error("Test request {0} not found")]
    NotFound(i64),

    /// The stored version moved on since the record was read
    #[error("Test request {request_id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        request_id: i64,
        expected: u64,
        found: u64,
    },

    /// A record with this identifier already exists
    #[error("Test request {0} already exists")]
    Duplicate(i64),

    /// Seed data could not be loaded
    #[error("Invalid seed data: {0}")]
    Seed(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with WorkflowError
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Convenience type alias for Results with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkflowError::NotFound(-34);
        assert_eq!(err.to_string(), INVALID_ID_REASON);

        let err = WorkflowError::ValidationFailed("result must not be null".to_string());
        assert_eq!(err.to_string(), "Validation failed: result must not be null");

        let err = ConfigError::MissingVar("UPSTAC_USER_ID".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: UPSTAC_USER_ID"
        );
    }

    #[test]
    fn test_invalid_transition_carries_states() {
        let err = WorkflowError::InvalidTransition {
            request_id: 5,
            attempted: RequestStatus::LabTestInProgress,
            expected: RequestStatus::Initiated,
            actual: RequestStatus::LabTestCompleted,
        };
        let message = err.to_string();
        assert!(message.contains("LAB_TEST_IN_PROGRESS"));
        assert!(message.contains("LAB_TEST_COMPLETED"));
        assert!(message.contains("INITIATED"));
    }

    #[test]
    fn test_repository_not_found_maps_to_invalid_id() {
        let err: WorkflowError = RepositoryError::NotFound(42).into();
        assert!(matches!(err, WorkflowError::NotFound(42)));

        let err: WorkflowError = RepositoryError::Duplicate(42).into();
        assert!(matches!(err, WorkflowError::Storage(RepositoryError::Duplicate(42))));
    }
}
