use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use taskboard::api::create_router;
use taskboard::config::{SecurityConfig, SecurityState};
use taskboard::db::DatabaseConnection;
use tower::ServiceExt;

const API_KEY: &str = "test-secret";

async fn setup_app() -> (Router, DatabaseConnection) {
    let db = DatabaseConnection::in_memory()
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");

    let security = SecurityState::new(&SecurityConfig {
        api_key: Some(API_KEY.to_string()),
        ..SecurityConfig::default()
    })
    .unwrap();

    (create_router(db.clone(), security), db)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-API-Key", API_KEY);

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_task(app: &Router, title: &str) -> i64 {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/v1/task",
            Some(json!({ "title": title, "state": "Pending", "priority": 3 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_task_lifecycle() {
    let (app, _db) = setup_app().await;

    let id = create_task(&app, "Write report").await;

    let (status, body) = send(&app, request(Method::GET, &format!("/v1/task/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "Write report");
    assert_eq!(body["state"], "Pending");
    assert_eq!(body["priority"], 3);

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/v1/task/{}", id),
            Some(json!({ "title": "Write report v2", "state": "InProgress", "priority": 3 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (_, body) = send(&app, request(Method::GET, &format!("/v1/task/{}", id), None)).await;
    assert_eq!(body["title"], "Write report v2");
    assert!(body["due_date"].is_string());

    let (status, _) = send(&app, request(Method::DELETE, &format!("/v1/task/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request(Method::GET, &format!("/v1/task/{}", id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_subtask_under_missing_task() {
    let (app, db) = setup_app().await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/v1/task/9999/subTask",
            Some(json!({ "title": "Orphan", "completed": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subtasks")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_subtask_lifecycle() {
    let (app, _db) = setup_app().await;
    let task_id = create_task(&app, "Parent").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/v1/task/{}/subTask", task_id),
            Some(json!({ "title": "Outline", "completed": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    let uri = format!("/v1/task/{}/subTask/{}", task_id, id);

    let (status, _) = send(
        &app,
        request(Method::PUT, &uri, Some(json!({ "title": "Outline", "state": true }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request(Method::GET, &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task_id"], task_id);
    assert_eq!(body["completed"], true);

    let (status, body) = send(
        &app,
        request(Method::GET, &format!("/v1/task/{}/subTask", task_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], id);

    let (status, _) = send(&app, request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request(Method::GET, &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subtask_of_other_task_is_not_found() {
    let (app, _db) = setup_app().await;
    let owner = create_task(&app, "Owner").await;
    let other = create_task(&app, "Other").await;

    let (_, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/v1/task/{}/subTask", owner),
            Some(json!({ "title": "Mine" })),
        ),
    )
    .await;
    let id = body["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/v1/task/{}/subTask/{}", other, id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/v1/task/{}/subTask/{}", other, id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_title_on_update() {
    let (app, _db) = setup_app().await;
    create_task(&app, "Alpha").await;
    let beta = create_task(&app, "Beta").await;

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/v1/task/{}", beta),
            Some(json!({ "title": "Alpha", "state": "Pending", "priority": 3 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "ValidationConflict");
    assert_eq!(body["code"], "VALIDATION_CONFLICT");
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let (app, _db) = setup_app().await;

    let cases = [
        json!({ "title": "", "state": "Pending", "priority": 3 }),
        json!({ "title": "x", "state": "Done", "priority": 3 }),
        json!({ "title": "x", "state": "Pending", "priority": 6 }),
        json!({ "title": "x", "state": "Pending" }),
    ];
    for case in cases {
        let (status, body) = send(&app, request(Method::POST, "/v1/task", Some(case))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "InputValidation");
    }

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/v1/task")
        .header("X-API-Key", API_KEY)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, request(Method::GET, "/v1/task/abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INPUT_VALIDATION");

    let (status, _) = send(&app, request(Method::GET, "/v1/task?page=0", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, request(Method::GET, "/v1/task?order=sideways", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subtask_body_with_both_completion_fields() {
    let (app, _db) = setup_app().await;
    let task_id = create_task(&app, "Parent").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/v1/task/{}/subTask", task_id),
            Some(json!({ "title": "Outline", "completed": true, "state": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INPUT_VALIDATION");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("duplicate field `completed`"));
}

#[tokio::test]
async fn test_task_listing_paging() {
    let (app, _db) = setup_app().await;
    for i in 0..5 {
        create_task(&app, &format!("Task {}", i)).await;
    }

    let (status, body) = send(&app, request(Method::GET, "/v1/task?page=2&limit=2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["total_pages"], 3);
    // Newest first: page 2 starts at the third newest
    assert_eq!(body["data"][0]["title"], "Task 2");

    let (_, body) = send(&app, request(Method::GET, "/v1/task?limit=2&order=ASC", None)).await;
    assert_eq!(body["data"][0]["title"], "Task 0");
}

#[tokio::test]
async fn test_task_history_endpoint() {
    let (app, _db) = setup_app().await;
    let id = create_task(&app, "Tracked").await;

    send(
        &app,
        request(
            Method::PUT,
            &format!("/v1/task/{}", id),
            Some(json!({ "title": "Tracked", "state": "Completed", "priority": 3 })),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(Method::GET, &format!("/v1/task/{}/history", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["previous_state"], "Pending");
    assert_eq!(entries[0]["new_state"], "Completed");
}

#[tokio::test]
async fn test_missing_api_key_is_rejected() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri("/v1/task")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "ApiKey realm=\"taskboard\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_type"], "Unauthorized");
}

#[tokio::test]
async fn test_wrong_api_key_is_rejected() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri("/v1/task")
        .header("X-API-Key", "guess")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_api_key_in_query() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri(format!("/v1/task?X-API-Key={}", API_KEY))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let (app, db) = setup_app().await;

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    db.close().await;
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
}
