//! Subtask domain service
//!
//! Every operation works in the context of a parent task: the parent must
//! exist and the subtask must belong to it. A subtask owned by another task is
//! reported exactly like a missing one.

use tracing::{debug, info, warn};

use crate::db::models::SubTask;
use crate::db::repositories::SubTaskRepository;
use crate::db::DatabasePool;
use crate::paging::{PageRequest, PagedResult, SortOrder};
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::task::{ensure_task_exists, MAX_TEXT_LEN};

/// Order applied to subtask listings when the caller gives none
pub const DEFAULT_SUBTASK_ORDER: SortOrder = SortOrder::Asc;

/// Fields of a subtask to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubTask {
    pub title: String,
    pub completed: bool,
}

/// Replacement title and completion state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTaskChanges {
    pub title: String,
    pub completed: bool,
}

fn check_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() || title.chars().count() > MAX_TEXT_LEN {
        return Err(ServiceError::InputValidation(format!(
            "title must be between 1 and {} characters",
            MAX_TEXT_LEN
        )));
    }
    Ok(())
}

/// Subtask service
#[derive(Clone)]
pub struct SubTaskService {
    pool: DatabasePool,
}

impl SubTaskService {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Persist a subtask under `task_id` and return its id
    pub async fn create_subtask(&self, task_id: i64, new_subtask: NewSubTask) -> ServiceResult<i64> {
        check_title(&new_subtask.title)?;
        ensure_task_exists(&self.pool, task_id).await?;

        let subtask = SubTask::new(task_id, new_subtask.title, new_subtask.completed);
        let created = SubTaskRepository::create(&self.pool, &subtask).await?;

        info!("Created subtask {} for task {}", created.id, task_id);
        Ok(created.id)
    }

    /// List the subtasks of a task, oldest first unless another order is given
    pub async fn list_subtasks(
        &self,
        task_id: i64,
        page: PageRequest,
    ) -> ServiceResult<PagedResult<SubTask>> {
        ensure_task_exists(&self.pool, task_id).await?;

        let order = page.order_or(DEFAULT_SUBTASK_ORDER);
        let result = SubTaskRepository::find_page_for_task(&self.pool, task_id, &page, order).await?;

        debug!(
            "Listed {} subtasks for task {} (total {})",
            result.data.len(),
            task_id,
            result.meta.total
        );
        Ok(result)
    }

    pub async fn get_subtask(&self, task_id: i64, subtask_id: i64) -> ServiceResult<SubTask> {
        ensure_task_exists(&self.pool, task_id).await?;

        self.owned_subtask(task_id, subtask_id).await
    }

    /// Replace title and completion state of a subtask
    pub async fn update_subtask(
        &self,
        task_id: i64,
        subtask_id: i64,
        changes: SubTaskChanges,
    ) -> ServiceResult<SubTask> {
        check_title(&changes.title)?;
        ensure_task_exists(&self.pool, task_id).await?;

        let mut subtask = self.owned_subtask(task_id, subtask_id).await?;
        subtask.title = changes.title;
        subtask.completed = changes.completed;

        if !SubTaskRepository::update(&self.pool, &subtask).await? {
            return Err(subtask_not_found(task_id, subtask_id));
        }

        info!("Updated subtask {} of task {}", subtask_id, task_id);
        Ok(subtask)
    }

    /// Delete a subtask
    ///
    /// Only ownership of the fetched subtask is verified; the parent task is
    /// not looked up separately.
    pub async fn delete_subtask(&self, task_id: i64, subtask_id: i64) -> ServiceResult<()> {
        let subtask = self.owned_subtask(task_id, subtask_id).await?;

        if !SubTaskRepository::delete(&self.pool, subtask.id).await? {
            return Err(subtask_not_found(task_id, subtask_id));
        }

        info!("Deleted subtask {} of task {}", subtask_id, task_id);
        Ok(())
    }

    /// Fetch a subtask and check that it belongs to `task_id`
    async fn owned_subtask(&self, task_id: i64, subtask_id: i64) -> ServiceResult<SubTask> {
        match SubTaskRepository::get_by_id(&self.pool, subtask_id).await? {
            Some(subtask) if subtask.belongs_to(task_id) => Ok(subtask),
            _ => {
                warn!(
                    "Subtask {} not found or not owned by task {}",
                    subtask_id, task_id
                );
                Err(subtask_not_found(task_id, subtask_id))
            }
        }
    }
}

fn subtask_not_found(task_id: i64, subtask_id: i64) -> ServiceError {
    ServiceError::NotFound(format!(
        "Subtask {} does not exist for task {}",
        subtask_id, task_id
    ))
}
