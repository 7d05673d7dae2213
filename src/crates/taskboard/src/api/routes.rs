//! API route definitions
//!
//! Defines all API routes and their associated handler functions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::{handlers, middleware::logging_layer};
use crate::config::{api_key_middleware, SecurityState};
use crate::db::DatabaseConnection;
use crate::services::{SubTaskService, TaskService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tasks: TaskService,
    pub subtasks: SubTaskService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let pool = db.pool().clone();
        Self {
            tasks: TaskService::new(pool.clone()),
            subtasks: SubTaskService::new(pool),
            db,
        }
    }
}

/// Build the complete API router
///
/// Everything under `/v1` requires the API key; `/health` does not.
pub fn create_router(db: DatabaseConnection, security: SecurityState) -> Router {
    let app_state = AppState::new(db);

    let api = Router::new()
        // Task endpoints
        .route(
            "/v1/task",
            post(handlers::create_task).get(handlers::list_tasks),
        )
        .route(
            "/v1/task/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/v1/task/:id/history", get(handlers::task_history))
        // Subtask endpoints
        .route(
            "/v1/task/:id/subTask",
            post(handlers::create_subtask).get(handlers::list_subtasks),
        )
        .route(
            "/v1/task/:id/subTask/:subtask_id",
            get(handlers::get_subtask)
                .put(handlers::update_subtask)
                .delete(handlers::delete_subtask),
        )
        .route_layer(middleware::from_fn_with_state(security, api_key_middleware));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(logging_layer())
        .with_state(app_state)
}
