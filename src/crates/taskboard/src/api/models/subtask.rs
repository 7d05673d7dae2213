//! Subtask API models

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validation::{validate_not_empty, validate_string_length};
use crate::db::models::SubTask;
use crate::services::task::MAX_TEXT_LEN;
use crate::services::{NewSubTask, SubTaskChanges};

/// Body of subtask create and update requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTaskRequest {
    pub title: String,

    /// Completion flag; `state` is accepted as an alias
    ///
    /// Only one of the two names may appear in a body. Sending both is
    /// rejected as a duplicate field.
    #[serde(default, alias = "state")]
    pub completed: bool,
}

impl SubTaskRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.title, "title")?;
        validate_string_length(&self.title, "title", 1, MAX_TEXT_LEN)
    }

    pub fn into_new_subtask(self) -> ApiResult<NewSubTask> {
        self.validate()?;
        Ok(NewSubTask {
            title: self.title,
            completed: self.completed,
        })
    }

    pub fn into_changes(self) -> ApiResult<SubTaskChanges> {
        self.validate()?;
        Ok(SubTaskChanges {
            title: self.title,
            completed: self.completed,
        })
    }
}

/// Subtask response for API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTaskResponse {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
}

impl From<SubTask> for SubTaskResponse {
    fn from(subtask: SubTask) -> Self {
        Self {
            id: subtask.id,
            task_id: subtask.task_id,
            title: subtask.title,
            completed: subtask.completed,
            created_at: subtask.created_at,
        }
    }
}
