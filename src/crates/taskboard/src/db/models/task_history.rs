//! Task state change history

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded state transition of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaskHistory {
    pub id: i64,

    pub task_id: i64,

    /// State before the change, absent for the first recorded state
    pub previous_state: Option<String>,

    pub new_state: String,

    /// When the change was stored (RFC 3339 UTC)
    pub changed_at: String,
}
