use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use taskinbox_api::{create_router, AppState};
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let state = AppState::in_memory();
    (create_router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let content_type = body.map(|_| "application/json");
    send_typed(app, method, uri, content_type, body).await
}

async fn send_typed(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder
        .body(body.map(|text| Body::from(text.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create(app: &Router, title: &str) -> Value {
    let body = json!({ "title": title }).to_string();
    let (status, task) = send_json(app, Method::POST, "/tasks", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    task
}

#[tokio::test]
async fn health_returns_ok_status() {
    let (app, _) = app();
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn list_starts_empty() {
    let (app, _) = app();
    let (status, body) = send_json(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_201_with_trimmed_task() {
    let (app, _) = app();
    let task = create(&app, "  Buy milk  ").await;

    assert_eq!(task["id"], "1");
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["completed"], false);
    let created_at = task["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn create_rejects_invalid_titles_without_mutating() {
    let (app, state) = app();

    for body in [
        r#"{"title": ""}"#,
        r#"{"title": "   "}"#,
        r#"{}"#,
        r#"{"title": 7}"#,
        r#"{"title": null}"#,
        r#"{"title": ["a"]}"#,
    ] {
        let (status, error) = send_json(&app, Method::POST, "/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(error, json!({ "error": "Title is required" }));
    }

    let (status, error) = send_json(&app, Method::POST, "/tasks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Title is required");

    assert!(state.tasks().list_tasks().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (app, state) = app();
    let (status, error) = send_json(&app, Method::POST, "/tasks", Some("{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid JSON body");
    assert!(state.tasks().list_tasks().unwrap().is_empty());
}

#[tokio::test]
async fn toggle_sets_completed_and_ignores_non_boolean() {
    let (app, _) = app();
    let task = create(&app, "Complete this task").await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, updated) =
        send_json(&app, Method::PATCH, &uri, Some(r#"{"completed": true}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], task["createdAt"]);

    let (status, unchanged) =
        send_json(&app, Method::PATCH, &uri, Some(r#"{"completed": "false"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["completed"], true);

    let (status, unchanged) = send_json(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["completed"], true);

    let (status, reverted) =
        send_json(&app, Method::PATCH, &uri, Some(r#"{"completed": false}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reverted["completed"], false);
}

#[tokio::test]
async fn array_bodies_are_read_as_no_fields() {
    let (app, state) = app();

    let (status, error) = send_json(&app, Method::POST, "/tasks", Some("[]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Title is required");
    assert!(state.tasks().list_tasks().unwrap().is_empty());

    let task = create(&app, "Keep as is").await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());
    for body in ["[]", r#"[{"completed": true}]"#] {
        let (status, unchanged) = send_json(&app, Method::PATCH, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unchanged, task);
    }

    let (status, error) = send_json(&app, Method::PATCH, "/tasks/99", Some("[]")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Task not found");
}

#[tokio::test]
async fn primitive_json_bodies_are_rejected() {
    let (app, _) = app();
    let task = create(&app, "target").await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());

    for body in ["null", r#""x""#, "1"] {
        let (status, error) = send_json(&app, Method::PATCH, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Invalid JSON body");
    }
}

#[tokio::test]
async fn non_json_content_type_bodies_are_ignored() {
    let (app, state) = app();

    let (status, bytes) = send_typed(
        &app,
        Method::POST,
        "/tasks",
        Some("text/plain"),
        Some(r#"{"title":"Buy milk"}"#),
    )
    .await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Title is required");
    assert!(state.tasks().list_tasks().unwrap().is_empty());

    let task = create(&app, "Plain text toggle").await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());
    let (status, bytes) =
        send_typed(&app, Method::PATCH, &uri, Some("text/plain"), Some("{oops")).await;
    let unchanged: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["completed"], false);

    let (status, bytes) = send_typed(
        &app,
        Method::POST,
        "/tasks",
        Some("application/json; charset=utf-8"),
        Some(r#"{"title":"Buy milk"}"#),
    )
    .await;
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Buy milk");
}

#[tokio::test]
async fn toggle_and_delete_unknown_ids_return_404() {
    let (app, _) = app();
    create(&app, "only").await;

    for uri in ["/tasks/99", "/tasks/abc", "/tasks/01"] {
        let (status, error) =
            send_json(&app, Method::PATCH, uri, Some(r#"{"completed": true}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {uri}");
        assert_eq!(error, json!({ "error": "Task not found" }));

        let (status, error) = send_json(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
        assert_eq!(error, json!({ "error": "Task not found" }));
    }

    let (_, listed) = send_json(&app, Method::GET, "/tasks", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["completed"], false);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let (app, _) = app();
    let task = create(&app, "Delete this task").await;
    let uri = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send_json(&app, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn list_keeps_creation_order_and_never_reuses_ids() {
    let (app, _) = app();
    let first = create(&app, "Task 1").await;
    let second = create(&app, "Task 2").await;

    let (_, listed) = send_json(&app, Method::GET, "/tasks", None).await;
    let titles = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Task 1", "Task 2"]);
    assert_ne!(first["id"], second["id"]);

    send(&app, Method::DELETE, "/tasks/2", None).await;
    let third = create(&app, "Task 3").await;
    assert_eq!(third["id"], "3");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tasks/1")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PATCH")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
