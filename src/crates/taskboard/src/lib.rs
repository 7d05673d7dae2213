//! Task and subtask management service
//!
//! Tasks carry a title, optional description and due date, a state and a
//! priority. Subtasks belong to exactly one task and are removed with it.
//! The crate exposes the SQLite storage layer, the domain services that
//! enforce the business rules, and an axum REST API guarded by an API key.

pub mod api;
pub mod config;
pub mod db;
pub mod paging;
pub mod services;

pub use api::create_router;
pub use config::{SecurityState, ServerConfig};
pub use db::DatabaseConnection;
pub use paging::{PageMeta, PageRequest, PagedResult, SortOrder};
pub use services::{ErrorKind, ServiceError, ServiceResult, SubTaskService, TaskService};
