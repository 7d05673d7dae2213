//! Database module
//!
//! Provides connectivity, models, repositories and error handling for the
//! persisted tasks, subtasks and task history.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{DatabaseConnection, DatabasePool};
pub use error::DatabaseError;
