//! Subtask model for database persistence

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format_timestamp;

/// A child item that belongs to exactly one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SubTask {
    /// Row identifier
    pub id: i64,

    /// Owning task
    pub task_id: i64,

    /// Subtask title
    pub title: String,

    /// Whether the subtask is done
    pub completed: bool,

    /// Creation timestamp (RFC 3339 UTC)
    pub created_at: String,
}

impl SubTask {
    /// Create an unsaved subtask for `task_id`, stamped with the current time
    pub fn new(task_id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: 0,
            task_id,
            title: title.into(),
            completed,
            created_at: format_timestamp(Utc::now()),
        }
    }

    /// Whether this subtask belongs to `task_id`
    pub fn belongs_to(&self, task_id: i64) -> bool {
        self.task_id == task_id
    }
}
