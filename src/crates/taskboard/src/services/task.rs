//! Task domain service
//!
//! Enforces the task-level rules (existence, title uniqueness among other
//! tasks) and records state changes in the task history.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::db::models::{format_timestamp, Task, TaskHistory, TaskState};
use crate::db::repositories::{TaskHistoryRepository, TaskRepository};
use crate::db::DatabasePool;
use crate::paging::{PageRequest, PagedResult, SortOrder};
use crate::services::error::{ServiceError, ServiceResult};

/// Order applied to the task listing when the caller gives none
pub const DEFAULT_TASK_ORDER: SortOrder = SortOrder::Desc;

/// Fields of a task to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub state: TaskState,
    pub priority: i64,
}

/// Full replacement of the mutable fields of a task
///
/// A missing due date is replaced by the time of the update.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChanges {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub state: TaskState,
    pub priority: i64,
}

/// Highest accepted priority; 1 is the lowest
pub const MAX_PRIORITY: i64 = 5;

/// Longest accepted title or description, in characters
pub const MAX_TEXT_LEN: usize = 255;

/// Field checks shared by create and update. The HTTP layer applies the same
/// rules before a request reaches the service.
fn check_fields(title: &str, description: Option<&str>, priority: i64) -> ServiceResult<()> {
    if title.trim().is_empty() || title.chars().count() > MAX_TEXT_LEN {
        return Err(ServiceError::InputValidation(format!(
            "title must be between 1 and {} characters",
            MAX_TEXT_LEN
        )));
    }
    if description.map_or(false, |d| d.chars().count() > MAX_TEXT_LEN) {
        return Err(ServiceError::InputValidation(format!(
            "description cannot exceed {} characters",
            MAX_TEXT_LEN
        )));
    }
    if !(1..=MAX_PRIORITY).contains(&priority) {
        return Err(ServiceError::InputValidation(format!(
            "priority must be between 1 and {}",
            MAX_PRIORITY
        )));
    }
    Ok(())
}

/// Load a task or fail with `NotFound`
///
/// Shared by the task and subtask services so that every operation reports a
/// missing task the same way.
pub async fn ensure_task_exists(pool: &DatabasePool, id: i64) -> ServiceResult<Task> {
    TaskRepository::get_by_id(pool, id).await?.ok_or_else(|| {
        warn!("Task not found: {}", id);
        ServiceError::NotFound(format!("Task {} does not exist", id))
    })
}

/// Task service
#[derive(Clone)]
pub struct TaskService {
    pool: DatabasePool,
}

impl TaskService {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Persist a new task and return its id
    ///
    /// Titles are not checked for uniqueness here; only updates are.
    pub async fn create_task(&self, new_task: NewTask) -> ServiceResult<i64> {
        check_fields(
            &new_task.title,
            new_task.description.as_deref(),
            new_task.priority,
        )?;

        let task = Task::new(new_task.title, new_task.state, new_task.priority)
            .with_description(new_task.description)
            .with_due_date(new_task.due_date.map(format_timestamp));

        let created = TaskRepository::create(&self.pool, &task).await?;

        info!("Created task: {}", created.id);
        Ok(created.id)
    }

    /// List tasks page by page, newest first unless another order is given
    pub async fn list_tasks(&self, page: PageRequest) -> ServiceResult<PagedResult<Task>> {
        let order = page.order_or(DEFAULT_TASK_ORDER);
        let result = TaskRepository::find_page(&self.pool, &page, order).await?;

        debug!(
            "Listed {} tasks (page {}, total {})",
            result.data.len(),
            result.meta.page,
            result.meta.total
        );
        Ok(result)
    }

    pub async fn get_task(&self, id: i64) -> ServiceResult<Task> {
        let task = ensure_task_exists(&self.pool, id).await?;

        debug!("Retrieved task: {}", task.id);
        Ok(task)
    }

    /// Replace title, description, due date, state and priority of a task
    ///
    /// Fails with `ValidationConflict` when another task already has the new
    /// title, compared without regard to ASCII case. Keeping the task's own
    /// title is allowed. A state change is recorded in the history in the same
    /// transaction as the update.
    pub async fn update_task(&self, id: i64, changes: TaskChanges) -> ServiceResult<Task> {
        check_fields(&changes.title, changes.description.as_deref(), changes.priority)?;
        let existing = ensure_task_exists(&self.pool, id).await?;

        if TaskRepository::title_exists_for_other(&self.pool, &changes.title, id).await? {
            warn!("Duplicate title rejected for task {}: {}", id, changes.title);
            return Err(ServiceError::ValidationConflict(format!(
                "Another task already has the title '{}'",
                changes.title
            )));
        }

        let due_date = changes.due_date.unwrap_or_else(Utc::now);
        let updated = Task {
            id,
            title: changes.title,
            description: changes.description,
            created_at: existing.created_at.clone(),
            due_date: Some(format_timestamp(due_date)),
            state: changes.state.as_str().to_string(),
            priority: changes.priority,
        };

        // The row and its history entry are written together or not at all.
        let mut tx = self.pool.begin().await?;

        if !TaskRepository::update(&mut *tx, &updated).await? {
            // Deleted between the existence check and the write.
            return Err(ServiceError::NotFound(format!("Task {} does not exist", id)));
        }

        if existing.state != updated.state {
            TaskHistoryRepository::record(
                &mut *tx,
                id,
                Some(existing.state.as_str()),
                &updated.state,
            )
            .await?;
        }

        tx.commit().await?;

        if existing.state != updated.state {
            info!(
                "Task {} state changed: {} -> {}",
                id, existing.state, updated.state
            );
        }

        info!("Updated task: {}", id);
        Ok(updated)
    }

    /// Delete a task together with its subtasks and history
    pub async fn delete_task(&self, id: i64) -> ServiceResult<()> {
        ensure_task_exists(&self.pool, id).await?;

        if !TaskRepository::delete(&self.pool, id).await? {
            return Err(ServiceError::NotFound(format!("Task {} does not exist", id)));
        }

        info!("Deleted task: {}", id);
        Ok(())
    }

    /// Recorded state changes of a task, newest first
    pub async fn task_history(&self, id: i64) -> ServiceResult<Vec<TaskHistory>> {
        ensure_task_exists(&self.pool, id).await?;

        let history = TaskHistoryRepository::list_for_task(&self.pool, id).await?;
        debug!("Retrieved {} history entries for task {}", history.len(), id);
        Ok(history)
    }
}
