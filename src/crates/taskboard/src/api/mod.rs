//! REST API layer for taskboard
//!
//! Provides HTTP/JSON endpoints under `/v1` for:
//! - Task CRUD and state history
//! - Subtask CRUD nested under their task
//! - An unauthenticated health check

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use response::{CreatedResponse, MessageResponse};
pub use routes::{create_router, AppState};
