//! Task model for database persistence

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::format_timestamp;

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskState {
    /// All accepted states, in declaration order
    pub const ALL: [TaskState; 4] = [
        TaskState::Pending,
        TaskState::InProgress,
        TaskState::Completed,
        TaskState::Cancelled,
    ];

    /// Name stored in the database and exposed over the API
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Pending => "Pending",
            TaskState::InProgress => "InProgress",
            TaskState::Completed => "Completed",
            TaskState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskState::ALL
            .into_iter()
            .find(|state| state.as_str() == value)
            .ok_or_else(|| {
                format!(
                    "state must be one of 'Pending', 'InProgress', 'Completed' or 'Cancelled', got '{}'",
                    value
                )
            })
    }
}

/// Represents a task row
///
/// # Timestamps
/// `created_at` and `due_date` are RFC 3339 UTC strings with a fixed
/// precision, so lexical order matches chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Row identifier, assigned by the database on insert
    pub id: i64,

    /// Task title (unique among tasks, at most 255 characters)
    pub title: String,

    /// Optional task description
    pub description: Option<String>,

    /// Creation timestamp, never changes after insert
    pub created_at: String,

    /// Optional due date
    pub due_date: Option<String>,

    /// One of the [`TaskState`] names
    pub state: String,

    /// Priority from 1 to 5
    pub priority: i64,
}

impl Task {
    /// Create an unsaved task stamped with the current time
    ///
    /// The id stays 0 until the row is inserted.
    pub fn new(title: impl Into<String>, state: TaskState, priority: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            created_at: format_timestamp(Utc::now()),
            due_date: None,
            state: state.as_str().to_string(),
            priority,
        }
    }

    /// Builder method to set task description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Builder method to set the due date
    pub fn with_due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = due_date;
        self
    }
}
