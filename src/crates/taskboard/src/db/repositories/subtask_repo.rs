//! Subtask repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::SubTask;
use crate::paging::{PageRequest, PagedResult, SortOrder};

/// Subtask repository
pub struct SubTaskRepository;

impl SubTaskRepository {
    /// Insert a subtask and return the stored row
    pub async fn create(pool: &DatabasePool, subtask: &SubTask) -> Result<SubTask, sqlx::Error> {
        sqlx::query_as::<_, SubTask>(
            "INSERT INTO subtasks (task_id, title, completed, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(subtask.task_id)
        .bind(&subtask.title)
        .bind(subtask.completed)
        .bind(&subtask.created_at)
        .fetch_one(pool)
        .await
    }

    /// Get a subtask by its own id, whatever task it belongs to
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> Result<Option<SubTask>, sqlx::Error> {
        sqlx::query_as::<_, SubTask>("SELECT * FROM subtasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of the subtasks of `task_id` ordered by creation time
    pub async fn find_page_for_task(
        pool: &DatabasePool,
        task_id: i64,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<PagedResult<SubTask>, sqlx::Error> {
        let total = Self::count_for_task(pool, task_id).await?;

        let sql = format!(
            "SELECT * FROM subtasks WHERE task_id = ?
             ORDER BY created_at {dir}, id {dir} LIMIT ? OFFSET ?",
            dir = order.as_sql()
        );
        let subtasks = sqlx::query_as::<_, SubTask>(&sql)
            .bind(task_id)
            .bind(i64::from(page.limit))
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(PagedResult::new(subtasks, total, page))
    }

    /// Overwrite title and completion state
    ///
    /// # Returns
    /// `true` if a row was updated
    pub async fn update(pool: &DatabasePool, subtask: &SubTask) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE subtasks SET title = ?, completed = ? WHERE id = ?")
            .bind(&subtask.title)
            .bind(subtask.completed)
            .bind(subtask.id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a subtask
    ///
    /// # Returns
    /// `true` if a row was deleted
    pub async fn delete(pool: &DatabasePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the subtasks of one task
    pub async fn count_for_task(pool: &DatabasePool, task_id: i64) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subtasks WHERE task_id = ?")
            .bind(task_id)
            .fetch_one(pool)
            .await?;

        Ok(result.0)
    }
}
