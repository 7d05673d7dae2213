//! Task repository for database operations

use sqlx::{Executor, Sqlite};

use crate::db::connection::DatabasePool;
use crate::db::models::Task;
use crate::paging::{PageRequest, PagedResult, SortOrder};

/// Task repository for managing task database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a task
    ///
    /// The `id` of `task` is ignored; the stored row (with its generated id)
    /// is returned.
    pub async fn create(pool: &DatabasePool, task: &Task) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, created_at, due_date, state, priority)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.created_at)
        .bind(&task.due_date)
        .bind(&task.state)
        .bind(task.priority)
        .fetch_one(pool)
        .await
    }

    /// Get a task by ID
    ///
    /// # Returns
    /// Task if found, None if not found, or database error
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of tasks ordered by creation time
    ///
    /// Ties on `created_at` are broken by id in the same direction.
    pub async fn find_page(
        pool: &DatabasePool,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<PagedResult<Task>, sqlx::Error> {
        let total = Self::count(pool).await?;

        let sql = format!(
            "SELECT * FROM tasks ORDER BY created_at {dir}, id {dir} LIMIT ? OFFSET ?",
            dir = order.as_sql()
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(i64::from(page.limit))
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(PagedResult::new(tasks, total, page))
    }

    /// Overwrite the mutable fields of a task
    ///
    /// Writes title, description, due date, state and priority. `created_at`
    /// is never touched. Runs on a pool or on an open transaction.
    ///
    /// # Returns
    /// `true` if a row was updated
    pub async fn update<'e, E>(executor: E, task: &Task) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE tasks
             SET title = ?, description = ?, due_date = ?, state = ?, priority = ?
             WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.due_date)
        .bind(&task.state)
        .bind(task.priority)
        .bind(task.id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a task other than `exclude_id` already uses `title`
    ///
    /// Titles are compared without regard to ASCII case.
    pub async fn title_exists_for_other(
        pool: &DatabasePool,
        title: &str,
        exclude_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tasks WHERE title = ? COLLATE NOCASE AND id <> ?",
        )
        .bind(title)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;

        Ok(result.0 > 0)
    }

    /// Delete a task; its subtasks and history go with it
    ///
    /// # Returns
    /// `true` if a row was deleted
    pub async fn delete(pool: &DatabasePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count total tasks
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::TaskState;
    use crate::db::DatabaseConnection;

    async fn setup_pool() -> DatabasePool {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        conn.run_migrations().await.unwrap();
        conn.pool().clone()
    }

    fn task_at(title: &str, created_at: &str) -> Task {
        let mut task = Task::new(title, TaskState::Pending, 3);
        task.created_at = created_at.to_string();
        task
    }

    #[tokio::test]
    async fn test_create_task() {
        let pool = setup_pool().await;

        let task = Task::new("Test Task", TaskState::Pending, 2)
            .with_description(Some("details".to_string()));
        let created = TaskRepository::create(&pool, &task).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.title, "Test Task");
        assert_eq!(created.description.as_deref(), Some("details"));
        assert_eq!(created.state, "Pending");
        assert_eq!(created.priority, 2);
        assert_eq!(created.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = setup_pool().await;

        let created = TaskRepository::create(&pool, &Task::new("Test Task", TaskState::Pending, 1))
            .await
            .unwrap();

        let fetched = TaskRepository::get_by_id(&pool, created.id).await.unwrap();
        assert_eq!(fetched, Some(created));

        let missing = TaskRepository::get_by_id(&pool, 9999).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_page_orders_by_creation() {
        let pool = setup_pool().await;

        for (title, at) in [
            ("first", "2024-01-01T00:00:00.000000Z"),
            ("second", "2024-01-02T00:00:00.000000Z"),
            ("third", "2024-01-03T00:00:00.000000Z"),
        ] {
            TaskRepository::create(&pool, &task_at(title, at)).await.unwrap();
        }

        let page = PageRequest::new(1, 10);
        let desc = TaskRepository::find_page(&pool, &page, SortOrder::Desc)
            .await
            .unwrap();
        let titles: Vec<_> = desc.data.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);

        let asc = TaskRepository::find_page(&pool, &page, SortOrder::Asc)
            .await
            .unwrap();
        let titles: Vec<_> = asc.data.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_find_page_slices_and_counts() {
        let pool = setup_pool().await;

        for n in 0..7 {
            let at = format!("2024-01-0{}T00:00:00.000000Z", n + 1);
            TaskRepository::create(&pool, &task_at(&format!("task {}", n), &at))
                .await
                .unwrap();
        }

        let page = PageRequest::new(3, 3);
        let result = TaskRepository::find_page(&pool, &page, SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].title, "task 6");
        assert_eq!(result.meta.total, 7);
        assert_eq!(result.meta.page, 3);
        assert_eq!(result.meta.total_pages, 3);

        let beyond = TaskRepository::find_page(&pool, &PageRequest::new(4, 3), SortOrder::Asc)
            .await
            .unwrap();
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.meta.total, 7);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let pool = setup_pool().await;

        let mut task = TaskRepository::create(&pool, &Task::new("Old", TaskState::Pending, 1))
            .await
            .unwrap();
        let created_at = task.created_at.clone();

        task.title = "New".to_string();
        task.state = TaskState::Completed.as_str().to_string();
        task.priority = 5;
        task.created_at = "1999-01-01T00:00:00.000000Z".to_string();
        assert!(TaskRepository::update(&pool, &task).await.unwrap());

        let stored = TaskRepository::get_by_id(&pool, task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New");
        assert_eq!(stored.state, "Completed");
        assert_eq!(stored.priority, 5);
        assert_eq!(stored.created_at, created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let pool = setup_pool().await;

        let mut task = Task::new("Ghost", TaskState::Pending, 1);
        task.id = 42;
        assert!(!TaskRepository::update(&pool, &task).await.unwrap());
    }

    #[tokio::test]
    async fn test_title_exists_for_other() {
        let pool = setup_pool().await;

        let a = TaskRepository::create(&pool, &Task::new("Alpha", TaskState::Pending, 1))
            .await
            .unwrap();
        let b = TaskRepository::create(&pool, &Task::new("Beta", TaskState::Pending, 1))
            .await
            .unwrap();

        assert!(TaskRepository::title_exists_for_other(&pool, "Alpha", b.id).await.unwrap());
        assert!(!TaskRepository::title_exists_for_other(&pool, "Alpha", a.id).await.unwrap());
        assert!(!TaskRepository::title_exists_for_other(&pool, "Gamma", a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_title_exists_ignores_case() {
        let pool = setup_pool().await;

        let a = TaskRepository::create(&pool, &Task::new("Alpha", TaskState::Pending, 1))
            .await
            .unwrap();
        let b = TaskRepository::create(&pool, &Task::new("Beta", TaskState::Pending, 1))
            .await
            .unwrap();

        assert!(TaskRepository::title_exists_for_other(&pool, "alpha", b.id).await.unwrap());
        assert!(TaskRepository::title_exists_for_other(&pool, "ALPHA", b.id).await.unwrap());
        assert!(!TaskRepository::title_exists_for_other(&pool, "alpha", a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_rolled_back_with_transaction() {
        let pool = setup_pool().await;

        let mut task = TaskRepository::create(&pool, &Task::new("Draft", TaskState::Pending, 1))
            .await
            .unwrap();

        let mut tx = pool.begin().await.unwrap();
        task.title = "Final".to_string();
        assert!(TaskRepository::update(&mut *tx, &task).await.unwrap());
        tx.rollback().await.unwrap();

        let stored = TaskRepository::get_by_id(&pool, task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Draft");
    }

    #[tokio::test]
    async fn test_delete_task() {
        let pool = setup_pool().await;

        let task = TaskRepository::create(&pool, &Task::new("Task 1", TaskState::Pending, 1))
            .await
            .unwrap();

        assert!(TaskRepository::delete(&pool, task.id).await.unwrap());
        assert!(!TaskRepository::delete(&pool, task.id).await.unwrap());

        let fetched = TaskRepository::get_by_id(&pool, task.id).await.unwrap();
        assert!(fetched.is_none());
        assert_eq!(TaskRepository::count(&pool).await.unwrap(), 0);
    }
}
