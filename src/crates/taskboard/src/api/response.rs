//! API response helpers
//!
//! Successful responses carry the resource itself, a `{ "id": n }` document
//! for creations, or a `{ "message": ... }` document for updates and deletes.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Body returned when a resource is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body returned by updates and deletes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a 200 OK JSON response
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(data))
}

/// Create a 201 Created response carrying the new id
pub fn created(id: i64) -> impl IntoResponse {
    (StatusCode::CREATED, Json(CreatedResponse { id }))
}

/// Create a 200 OK response carrying a confirmation message
pub fn message(text: impl Into<String>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: text.into(),
        }),
    )
}
