//! Task history repository

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::db::connection::DatabasePool;
use crate::db::models::{format_timestamp, TaskHistory};

/// Repository for the task state change log
pub struct TaskHistoryRepository;

impl TaskHistoryRepository {
    /// Record a state change of `task_id`, stamped with the current time
    pub async fn record<'e, E>(
        executor: E,
        task_id: i64,
        previous_state: Option<&str>,
        new_state: &str,
    ) -> Result<TaskHistory, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = format_timestamp(Utc::now());
        sqlx::query_as::<_, TaskHistory>(
            "INSERT INTO task_history (task_id, previous_state, new_state, changed_at)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(task_id)
        .bind(previous_state)
        .bind(new_state)
        .bind(&now)
        .fetch_one(executor)
        .await
    }

    /// All recorded changes of a task, newest first
    pub async fn list_for_task(
        pool: &DatabasePool,
        task_id: i64,
    ) -> Result<Vec<TaskHistory>, sqlx::Error> {
        sqlx::query_as::<_, TaskHistory>(
            "SELECT * FROM task_history WHERE task_id = ? ORDER BY changed_at DESC, id DESC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}
