//! Subtask endpoint handlers
//!
//! All routes are nested under the owning task: `/v1/task/:id/subTask`.

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
    models::{PageQuery, SubTaskRequest, SubTaskResponse},
    response,
    routes::AppState,
};

/// POST /v1/task/:id/subTask
pub async fn create_subtask(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<SubTaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(task_id) = path?;
    let Json(req) = body?;
    let new_subtask = req.into_new_subtask()?;

    let id = app_state.subtasks.create_subtask(task_id, new_subtask).await?;
    Ok(response::created(id))
}

/// GET /v1/task/:id/subTask?page=&limit=&order=
pub async fn list_subtasks(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(task_id) = path?;
    let Query(query) = query?;
    let page = query.into_page_request()?;

    let result = app_state.subtasks.list_subtasks(task_id, page).await?;
    Ok(response::ok(result.map(SubTaskResponse::from)))
}

/// GET /v1/task/:id/subTask/:subtask_id
pub async fn get_subtask(
    State(app_state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path((task_id, id)) = path?;

    let subtask = app_state.subtasks.get_subtask(task_id, id).await?;
    Ok(response::ok(SubTaskResponse::from(subtask)))
}

/// PUT /v1/task/:id/subTask/:subtask_id
pub async fn update_subtask(
    State(app_state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    body: Result<Json<SubTaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path((task_id, id)) = path?;
    let Json(req) = body?;
    let changes = req.into_changes()?;

    app_state.subtasks.update_subtask(task_id, id, changes).await?;
    Ok(response::message(format!("Subtask {} updated", id)))
}

/// DELETE /v1/task/:id/subTask/:subtask_id
pub async fn delete_subtask(
    State(app_state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path((task_id, id)) = path?;

    app_state.subtasks.delete_subtask(task_id, id).await?;
    Ok(response::message(format!("Subtask {} deleted", id)))
}
