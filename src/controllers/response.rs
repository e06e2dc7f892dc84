//! Mapping of workflow outcomes to transport-level status codes.

use crate::error::WorkflowError;
use thiserror::Error;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Error returned by controllers: a status code and a human-readable reason.
///
/// Callers compare `reason` by exact string, so it is the display text of
/// the underlying workflow error ("Invalid ID" for unknown requests).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status} {reason}")]
pub struct ResponseStatusError {
    pub status: u16,
    pub reason: String,
}

impl ResponseStatusError {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

impl From<WorkflowError> for ResponseStatusError {
    fn from(err: WorkflowError) -> Self {
        let status = match &err {
            WorkflowError::NotFound(_) => STATUS_NOT_FOUND,
            WorkflowError::InvalidTransition { .. } | WorkflowError::ValidationFailed(_) => {
                STATUS_BAD_REQUEST
            }
            WorkflowError::PermissionDenied(_) => STATUS_FORBIDDEN,
            WorkflowError::Storage(_) => STATUS_INTERNAL_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

/// Convenience type alias for controller results
pub type ControllerResult<T> = Result<T, ResponseStatusError>;
