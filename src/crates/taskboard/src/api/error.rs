//! API error types and HTTP response conversion
//!
//! Every failure leaving the HTTP layer is rendered as the same JSON envelope.
//! Service errors are converted by kind; extractor rejections become input
//! validation errors instead of axum's default plain-text responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::{ErrorKind, ServiceError};

/// API error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error kind name
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiErrorResponse {
    pub fn new(
        error_type: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Custom API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Task or subtask missing, or subtask owned by another task
    #[error("{0}")]
    NotFound(String),

    /// Business rule rejected the request
    #[error("{0}")]
    ValidationConflict(String),

    /// Malformed or out-of-range request fields
    #[error("{0}")]
    InputValidation(String),

    /// Missing or wrong API key
    #[error("{0}")]
    Unauthorized(String),

    /// Internal server error
    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationConflict(_) | ApiError::InputValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code identifier
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::ValidationConflict(_) => "VALIDATION_CONFLICT",
            ApiError::InputValidation(_) => "INPUT_VALIDATION",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => ErrorKind::NotFound.as_str(),
            ApiError::ValidationConflict(_) => ErrorKind::ValidationConflict.as_str(),
            ApiError::InputValidation(_) => ErrorKind::InputValidation.as_str(),
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::InternalError(_) => ErrorKind::InternalError.as_str(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::InternalError(detail) => {
                tracing::error!("API Error: {}", detail);
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!("API Error ({}): {}", status.as_u16(), other);
                other.to_string()
            }
        };

        let body = ApiErrorResponse::new(self.error_type(), message, self.code());
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::ValidationConflict => ApiError::ValidationConflict(err.to_string()),
            ErrorKind::InputValidation => ApiError::InputValidation(err.to_string()),
            ErrorKind::InternalError => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InputValidation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InputValidation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InputValidation(rejection.body_text())
    }
}
