//! Router-level tests against the in-memory backend.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;

use task_manager::{
    bootstrap,
    config::{AppConfig, AuthConfig},
    repository::MemoryRepository,
    router::build_router,
    state::AppState,
};

const ADMIN_EMAIL: &str = "hexlet@example.com";
const ADMIN_PASSWORD: &str = "qwerty";

async fn app() -> Router {
    let auth_config = AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::default()
    };
    let state = AppState::new(
        Arc::new(MemoryRepository::new()),
        AppConfig::default(),
        &auth_config,
    );
    bootstrap::run(&state).await.unwrap();
    build_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    assert_ok!(serde_json::from_slice(&body_bytes(response).await))
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": email, "password": password})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_ok!(String::from_utf8(body_bytes(response).await))
}

async fn create_user(app: &Router, token: &str, email: &str) -> i64 {
    let response = send(
        app,
        Method::POST,
        "/api/users",
        Some(token),
        Some(json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": "secret"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_i64().unwrap()
}

async fn create_label(app: &Router, token: &str, name: &str) -> i64 {
    let response = send(
        app,
        Method::POST,
        "/api/labels",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_i64().unwrap()
}

async fn create_task(app: &Router, token: &str, body: Value) -> Value {
    let response = send(app, Method::POST, "/api/tasks", Some(token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;

    let response = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");

    let response = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["storage"], "memory");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app().await;

    for uri in [
        "/api/users",
        "/api/users/1",
        "/api/task_statuses",
        "/api/labels",
        "/api/tasks",
        "/api/admin",
    ] {
        let response = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        let body = json_body(response).await;
        assert_eq!(body["status"], 401);
    }

    let response = send(&app, Method::GET, "/api/users", Some("not-a-jwt"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login() {
    let app = app().await;

    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(token.split('.').count(), 3);

    // "email" is accepted in place of "username"
    let response = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    for (email, password) in [(ADMIN_EMAIL, "wrong"), ("nobody@example.com", "qwerty")] {
        let response = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"username": email, "password": password})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_basic_auth() {
    let app = app().await;
    let encoded = BASE64.encode(format!("{}:{}", ADMIN_EMAIL, ADMIN_PASSWORD));

    let request = Request::builder()
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Basic {}", encoded))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let encoded = BASE64.encode(format!("{}:nope", ADMIN_EMAIL));
    let request = Request::builder()
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Basic {}", encoded))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_endpoint_requires_admin_role() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_user(&app, &admin, "user@example.com").await;
    let user = login(&app, "user@example.com", "secret").await;

    let response = send(&app, Method::GET, "/api/admin", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Authorized");

    let response = send(&app, Method::GET, "/api/admin", Some(&user), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_crud() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let id = create_user(&app, &admin, "ada@example.com").await;

    let response = send(&app, Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "2");
    let users = json_body(response).await;
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert!(users[1].get("password").is_none());
    assert!(users[1].get("passwordHash").is_none());

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(&admin),
        Some(json!({"firstName": "Ada", "password": "changed"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = json_body(response).await;
    assert_eq!(user["firstName"], "Ada");
    assert_eq!(user["lastName"], "User");

    // new password works
    login(&app, "ada@example.com", "changed").await;

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        Method::GET,
        &format!("/api/users/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_user_validation_and_conflicts() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&admin),
        Some(json!({"email": "not-an-email", "password": "secret"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&admin),
        Some(json!({"email": "short@example.com", "password": "ab"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&admin),
        Some(json!({"email": ADMIN_EMAIL, "password": "secret"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_user_can_only_change_self() {
    let app = app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let first = create_user(&app, &admin, "first@example.com").await;
    let second = create_user(&app, &admin, "second@example.com").await;
    let token = login(&app, "first@example.com", "secret").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", second),
        Some(&token),
        Some(json!({"firstName": "Mallory"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{}", second),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", first),
        Some(&token),
        Some(json!({"lastName": "Updated"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["lastName"], "Updated");
}

#[tokio::test]
async fn test_task_status_crud() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = send(&app, Method::GET, "/api/task_statuses", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "5");
    let statuses = json_body(response).await;
    assert_eq!(statuses[0]["slug"], "draft");
    assert_eq!(statuses[0]["name"], "Draft");

    let response = send(
        &app,
        Method::POST,
        "/api/task_statuses",
        Some(&token),
        Some(json!({"name": "Archived", "slug": "archived"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(
        &app,
        Method::POST,
        "/api/task_statuses",
        Some(&token),
        Some(json!({"name": "Another", "slug": "archived"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        Method::POST,
        "/api/task_statuses",
        Some(&token),
        Some(json!({"name": "", "slug": "empty"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/task_statuses/{}", id),
        Some(&token),
        Some(json!({"name": "Shelved"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let status = json_body(response).await;
    assert_eq!(status["name"], "Shelved");
    assert_eq!(status["slug"], "archived");

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/task_statuses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_label_validation() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = send(
        &app,
        Method::POST,
        "/api/labels",
        Some(&token),
        Some(json!({"name": "ab"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    create_label(&app, &token, "bug").await;
    let response = send(
        &app,
        Method::POST,
        "/api/labels",
        Some(&token),
        Some(json!({"name": "bug"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_task_crud() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let assignee = create_user(&app, &token, "dev@example.com").await;
    let bug = create_label(&app, &token, "bug").await;
    let feature = create_label(&app, &token, "feature").await;

    let task = create_task(
        &app,
        &token,
        json!({
            "title": "Fix login",
            "index": 3,
            "content": "Users cannot log in",
            "status": "draft",
            "assigneeId": assignee,
            "taskLabelIds": [bug]
        }),
    )
    .await;
    let id = task["id"].as_i64().unwrap();
    assert_eq!(task["title"], "Fix login");
    assert_eq!(task["status"], "draft");
    assert_eq!(task["assignee_id"], assignee);
    assert_eq!(task["taskLabelIds"], json!([bug]));

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{}", id),
        Some(&token),
        Some(json!({
            "status": "to_review",
            "assignee_id": null,
            "taskLabelIds": [feature, bug]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let task = json_body(response).await;
    assert_eq!(task["status"], "to_review");
    assert_eq!(task["assignee_id"], Value::Null);
    assert_eq!(task["title"], "Fix login");
    assert_eq!(task["index"], 3);
    let mut labels: Vec<i64> = task["taskLabelIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    labels.sort();
    assert_eq!(labels, vec![bug, feature]);

    // omitted label set is left alone
    let response = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{}", id),
        Some(&token),
        Some(json!({"title": "Fix login form"})),
    )
    .await;
    let task = json_body(response).await;
    assert_eq!(task["title"], "Fix login form");
    assert_eq!(task["taskLabelIds"].as_array().unwrap().len(), 2);

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/tasks/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        Method::GET,
        &format!("/api/tasks/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_references_must_exist() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    for body in [
        json!({"title": "A", "status": "missing"}),
        json!({"title": "A", "status": "draft", "assigneeId": 999}),
        json!({"title": "A", "status": "draft", "taskLabelIds": [999]}),
    ] {
        let response = send(&app, Method::POST, "/api/tasks", Some(&token), Some(body)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some(json!({"title": "  ", "status": "draft"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_task_filters() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let dev = create_user(&app, &token, "dev@example.com").await;
    let bug = create_label(&app, &token, "bug").await;

    create_task(
        &app,
        &token,
        json!({"title": "Fix Login", "status": "draft", "assigneeId": dev, "taskLabelIds": [bug]}),
    )
    .await;
    create_task(
        &app,
        &token,
        json!({"title": "Write docs", "status": "published", "assigneeId": dev}),
    )
    .await;
    create_task(&app, &token, json!({"title": "Login page", "status": "draft"})).await;

    let titles = |body: Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    };

    let response = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert_eq!(response.headers()["x-total-count"], "3");

    let response = send(
        &app,
        Method::GET,
        "/api/tasks?titleCont=login",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(
        titles(json_body(response).await),
        vec!["Fix Login", "Login page"]
    );

    let response = send(
        &app,
        Method::GET,
        &format!("/api/tasks?status=draft&assigneeId={}", dev),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(titles(json_body(response).await), vec!["Fix Login"]);

    let response = send(
        &app,
        Method::GET,
        &format!("/api/tasks?labelId={}", bug),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.headers()["x-total-count"], "1");

    // wildcard characters match literally
    for query in ["titleCont=_", "titleCont=%25"] {
        let response = send(
            &app,
            Method::GET,
            &format!("/api/tasks?{}", query),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.headers()["x-total-count"], "0", "{}", query);
    }

    let response = send(&app, Method::GET, "/api/tasks?labelId=999", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_referenced_records_cannot_be_deleted() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let dev = create_user(&app, &token, "dev@example.com").await;
    let bug = create_label(&app, &token, "bug").await;

    let task = create_task(
        &app,
        &token,
        json!({"title": "Fix", "status": "draft", "assigneeId": dev, "taskLabelIds": [bug]}),
    )
    .await;

    let response = send(&app, Method::GET, "/api/task_statuses", Some(&token), None).await;
    let draft = json_body(response).await[0]["id"].as_i64().unwrap();

    for uri in [
        format!("/api/task_statuses/{}", draft),
        format!("/api/labels/{}", bug),
        format!("/api/users/{}", dev),
    ] {
        let response = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "{}", uri);
    }

    // once the task is gone the label goes too
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/tasks/{}", task["id"]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/labels/{}", bug),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
