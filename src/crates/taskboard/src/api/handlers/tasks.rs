//! Task CRUD endpoint handlers
//!
//! Provides handlers for creating, reading, updating, and deleting tasks, and
//! for reading a task's state history.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};

use crate::api::{
    error::ApiResult,
    models::{PageQuery, TaskHistoryResponse, TaskRequest, TaskResponse},
    response,
    routes::AppState,
};

/// Create a new task
///
/// POST /v1/task
pub async fn create_task(
    State(app_state): State<AppState>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body?;
    let new_task = req.into_new_task()?;

    let id = app_state.tasks.create_task(new_task).await?;
    Ok(response::created(id))
}

/// List tasks, newest first by default
///
/// GET /v1/task?page=&limit=&order=
pub async fn list_tasks(
    State(app_state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let page = query.into_page_request()?;

    let result = app_state.tasks.list_tasks(page).await?;
    Ok(response::ok(result.map(TaskResponse::from_db_task)))
}

/// Get a single task by ID
///
/// GET /v1/task/:id
pub async fn get_task(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;

    let task = app_state.tasks.get_task(id).await?;
    Ok(response::ok(TaskResponse::from_db_task(task)))
}

/// Replace the fields of an existing task
///
/// PUT /v1/task/:id
pub async fn update_task(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(req) = body?;
    let changes = req.into_changes()?;

    app_state.tasks.update_task(id, changes).await?;
    Ok(response::message(format!("Task {} updated", id)))
}

/// Delete a task and its subtasks
///
/// DELETE /v1/task/:id
pub async fn delete_task(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;

    app_state.tasks.delete_task(id).await?;
    Ok(response::message(format!("Task {} deleted", id)))
}

/// State changes of a task, newest first
///
/// GET /v1/task/:id/history
pub async fn task_history(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = path?;

    let history = app_state.tasks.task_history(id).await?;
    let entries: Vec<TaskHistoryResponse> = history.into_iter().map(Into::into).collect();
    Ok(response::ok(entries))
}
