//! Database models
//!
//! Row types for the `tasks`, `subtasks` and `task_history` tables.
//! Timestamps are stored as RFC 3339 strings (TEXT in SQLite).

pub mod subtask;
pub mod task;
pub mod task_history;

pub use subtask::SubTask;
pub use task::{Task, TaskState};
pub use task_history::TaskHistory;

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp in the fixed-width form used by every table
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
