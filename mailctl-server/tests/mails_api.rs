//! End-to-end tests for the mail endpoints against the in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use mailctl_server::db::MemoryMailStore;
use mailctl_server::{build_router, AppState, ServerConfig};

fn app() -> Router {
    build_router(AppState::new(MemoryMailStore::new()), &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header("content-type", "application/json");
            Body::from(raw.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, header: &str, description: &str) -> i64 {
    let payload = json!({"header": header, "description": description}).to_string();
    let (status, body) = send(app, "POST", "/mails/", Some(&payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn not_found() -> Value {
    json!({"status": "error", "reason": "mail not found"})
}

#[tokio::test]
async fn full_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/mails/",
        Some(r#"{"header":"hi","description":"there"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1}));

    let (status, body) = send(&app, "GET", "/mails/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"], "hi");
    assert!(body["date_creation"].is_string());
    assert!(body.get("description").is_none());

    let (status, body) = send(&app, "PATCH", "/mails/1", Some(r#"{"description":"new"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"header": "hi", "description": "new", "id": 1}));

    let (status, body) = send(&app, "DELETE", "/mails/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "succes"}));

    let (status, body) = send(&app, "GET", "/mails/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn create_returns_fresh_ids_and_timestamp() {
    let app = app();
    let before = Utc::now();

    let first = create(&app, "a", "one").await;
    let second = create(&app, "b", "two").await;
    assert_ne!(first, second);

    let (_, body) = send(&app, "GET", &format!("/mails/{second}"), None).await;
    assert_eq!(body["header"], "b");
    let created: DateTime<Utc> = body["date_creation"].as_str().unwrap().parse().unwrap();
    assert!(created >= before);
}

#[tokio::test]
async fn create_without_trailing_slash() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/mails",
        Some(r#"{"header":"hi","description":"there"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let app = app();

    let (status, body) = send(&app, "POST", "/mails/", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "reason": [
                {"field": "header", "reason": "field required"},
                {"field": "description", "reason": "field required"}
            ]
        })
    );

    let (status, body) = send(&app, "POST", "/mails/", Some(r#"{"header":"hi"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["reason"],
        json!([{"field": "description", "reason": "field required"}])
    );
}

#[tokio::test]
async fn create_rejects_wrong_types() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/mails/",
        Some(r#"{"header":42,"description":"there"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["reason"],
        json!([{"field": "header", "reason": "must be a string"}])
    );
}

#[tokio::test]
async fn malformed_body_is_single_error() {
    let app = app();

    for raw in ["not json", "[1, 2]", "\"text\""] {
        let (status, body) = send(&app, "POST", "/mails/", Some(raw)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw:?}");
        assert_eq!(body["status"], "error");

        let reasons = body["reason"].as_array().unwrap();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0]["field"], "body");
    }
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mails/")
                .body(Body::from(r#"{"header":"hi","description":"there"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/mails/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());

    let (status, body) = send(&app, "PATCH", "/mails/99", Some(r#"{"header":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());

    let (status, body) = send(&app, "DELETE", "/mails/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/mails/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn patch_header_only_keeps_description() {
    let app = app();
    let id = create(&app, "hi", "there").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/mails/{id}"),
        Some(r#"{"header":"X"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"header": "X", "description": "there", "id": id}));

    let (_, body) = send(&app, "GET", &format!("/mails/{id}"), None).await;
    assert_eq!(body["header"], "X");
}

#[tokio::test]
async fn patch_with_empty_string_is_ignored() {
    let app = app();
    let id = create(&app, "hi", "there").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/mails/{id}"),
        Some(r#"{"header":"","description":null}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"header": "hi", "description": "there", "id": id}));
}

#[tokio::test]
async fn patch_validates_before_lookup() {
    let app = app();
    let id = create(&app, "hi", "there").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/mails/{id}"),
        Some(r#"{"header":1,"description":[]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", &format!("/mails/{id}"), None).await;
    assert_eq!(body["header"], "hi");
}

#[tokio::test]
async fn delete_succeeds_once() {
    let app = app();
    let id = create(&app, "hi", "there").await;
    let uri = format!("/mails/{id}");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());

    let (status, _) = send(&app, "PATCH", &uri, Some(r#"{"header":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn whitespace_text_accepted_by_create_and_patch() {
    let app = app();
    let id = create(&app, " ", "there").await;

    let (status, body) = send(&app, "GET", &format!("/mails/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"], " ");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/mails/{id}"),
        Some(r#"{"description":"  "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"header": " ", "description": "  ", "id": id}));
}

#[tokio::test]
async fn unsupported_methods_use_error_envelope() {
    let app = app();
    let expected = json!({"status": "error", "reason": "method not allowed"});

    for (method, uri) in [("PUT", "/mails/1"), ("GET", "/mails/"), ("DELETE", "/mails")] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(body, expected, "{method} {uri}");
    }
}
