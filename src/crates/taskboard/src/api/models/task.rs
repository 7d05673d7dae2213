//! Task API models and DTOs
//!
//! Data transfer objects for task-related API operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validation::{
    validate_not_empty, validate_priority, validate_string_length, validate_task_state,
};
use crate::db::models::{Task, TaskHistory, TaskState};
use crate::services::task::{MAX_PRIORITY, MAX_TEXT_LEN};
use crate::services::{NewTask, TaskChanges};

/// Body of task create and update requests
///
/// Updates replace every field; an omitted due date is set to the time of the
/// update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Task title (required, 1-255 characters, unique among tasks on update)
    pub title: String,

    /// Task description (optional, up to 255 characters)
    #[serde(default)]
    pub description: Option<String>,

    /// One of `Pending`, `InProgress`, `Completed`, `Cancelled`
    pub state: String,

    /// Priority from 1 to 5
    pub priority: i64,

    /// Due date (RFC 3339)
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskRequest {
    /// Validate the request, returning the parsed state
    pub fn validate(&self) -> ApiResult<TaskState> {
        validate_not_empty(&self.title, "title")?;
        validate_string_length(&self.title, "title", 1, MAX_TEXT_LEN)?;
        if let Some(description) = &self.description {
            validate_string_length(description, "description", 0, MAX_TEXT_LEN)?;
        }
        validate_priority(self.priority, 1, MAX_PRIORITY)?;
        validate_task_state(&self.state)
    }

    pub fn into_new_task(self) -> ApiResult<NewTask> {
        let state = self.validate()?;
        Ok(NewTask {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            state,
            priority: self.priority,
        })
    }

    pub fn into_changes(self) -> ApiResult<TaskChanges> {
        let state = self.validate()?;
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            state,
            priority: self.priority,
        })
    }
}

/// Task response for API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    pub due_date: Option<String>,
    pub state: String,
    pub priority: i64,
}

impl TaskResponse {
    /// Convert from database Task model
    pub fn from_db_task(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            created_at: task.created_at,
            due_date: task.due_date,
            state: task.state,
            priority: task.priority,
        }
    }
}

/// One entry of a task's state history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryResponse {
    pub id: i64,
    pub task_id: i64,
    pub previous_state: Option<String>,
    pub new_state: String,
    pub changed_at: String,
}

impl From<TaskHistory> for TaskHistoryResponse {
    fn from(entry: TaskHistory) -> Self {
        Self {
            id: entry.id,
            task_id: entry.task_id,
            previous_state: entry.previous_state,
            new_state: entry.new_state,
            changed_at: entry.changed_at,
        }
    }
}
