//! Classified errors raised by the domain services

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::db::DatabaseError;

/// The error kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A referenced task or subtask does not exist, or the subtask belongs to
    /// another task
    NotFound,
    /// A business rule rejected the request (e.g. duplicate title)
    ValidationConflict,
    /// Malformed or out-of-range request fields
    InputValidation,
    /// Anything unclassified, including storage faults
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::ValidationConflict => "ValidationConflict",
            ErrorKind::InputValidation => "InputValidation",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`TaskService`](super::TaskService) and
/// [`SubTaskService`](super::SubTaskService)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationConflict(String),

    #[error("{0}")]
    InputValidation(String),

    #[error("{0}")]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::ValidationConflict(_) => ErrorKind::ValidationConflict,
            ServiceError::InputValidation(_) => ErrorKind::InputValidation,
            ServiceError::Database(_) => ErrorKind::InternalError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(err.into())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
