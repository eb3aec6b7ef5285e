use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use study_organizer::api::{router, AppState};
use study_organizer::config::DashboardConfig;
use study_organizer::store::TaskStore;
use tower::ServiceExt;

fn test_app() -> (Router, Arc<TaskStore>) {
    let store = Arc::new(TaskStore::new());
    let state = AppState::new(store.clone(), DashboardConfig::default());
    (router(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();
    (status, bytes)
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn liveness_returns_banner() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).expect("utf8").starts_with("Study Organizer API running"));
}

#[tokio::test]
async fn list_starts_empty() {
    let (app, _) = test_app();
    let (status, body) = send_json(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_assigns_increasing_ids_and_starts_open() {
    let (app, _) = test_app();
    let (status, first) = send_json(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "Read ch.3", "dueDate": "2026-10-16", "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["completed"], false);
    assert_eq!(first["dueDate"], "2026-10-16");
    assert!(first.get("description").is_none());

    let (_, second) =
        send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Essay"}))).await;
    assert_eq!(second["id"], 2);

    let (_, listed) = send_json(&app, Method::GET, "/tasks", None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn create_without_title_is_rejected() {
    let (app, store) = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "   ", "dueDate": "next week"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .expect("details")
        .iter()
        .filter_map(|detail| detail["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["title", "dueDate"]);
    assert!(store.is_empty());
}

#[tokio::test]
async fn update_replaces_record_and_ignores_body_id() {
    let (app, store) = test_app();
    send_json(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "Lab report", "description": "Optics"})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(json!({"id": 99, "title": "Lab report v2", "dueDate": null, "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Lab report v2");
    assert_eq!(body["completed"], true);
    assert!(body.get("description").is_none());

    let stored = store.list();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Lab report v2");
}

#[tokio::test]
async fn update_unknown_task_is_not_found() {
    let (app, _) = test_app();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/tasks/42",
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_is_no_content_even_for_unknown_ids() {
    let (app, store) = test_app();
    send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Keep"}))).await;

    let (status, body) = send(&app, Method::DELETE, "/tasks/7", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(store.len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(store.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\":"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn dashboard_escapes_user_text() {
    let (app, _) = test_app();
    send_json(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "<script>alert(1)</script>", "description": "a & b"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/app", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("a &amp; b"));
}

#[tokio::test]
async fn dashboard_applies_filter_and_opens_editor() {
    let (app, _) = test_app();
    send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Open task"}))).await;
    send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Done task"}))).await;
    send_json(
        &app,
        Method::PUT,
        "/tasks/2",
        Some(json!({"title": "Done task", "completed": true})),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/app?filter=completed&edit=1", None).await;
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("Done task"));
    assert!(html.contains("id=\"editModal\""));

    let (status, body) = send(&app, Method::GET, "/app?filter=bogus", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("Open task"));
    assert!(html.contains("Done task"));
}

#[tokio::test]
async fn dashboard_ignores_unusable_edit_target() {
    let (app, _) = test_app();
    send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Lab"}))).await;

    for uri in ["/app?edit=abc", "/app?edit=", "/app?edit=99"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let html = String::from_utf8(body).expect("utf8");
        assert!(html.contains("Lab"), "{uri}");
        assert!(!html.contains("id=\"editModal\""), "{uri}");
    }
}

#[tokio::test]
async fn basic_page_lists_every_task() {
    let (app, _) = test_app();
    send_json(&app, Method::POST, "/tasks", Some(json!({"title": "Flashcards"}))).await;
    let (status, body) = send(&app, Method::GET, "/app/basic", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).expect("utf8").contains("Flashcards"));
}
