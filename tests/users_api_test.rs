//! HTTP-level tests for the `/users` routes, the root route and the fallback.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use todo_api_server::config::DatabaseConfig;
use todo_api_server::db::{DbPool, SchemaInitializer};
use todo_api_server::http;
use todo_api_server::services::AppState;
use tower::ServiceExt;

/// Router over a fresh SQLite file. Keep the temp file alive for the test.
async fn setup_app() -> (Router, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let url = format!("sqlite:{}", temp_file.path().to_str().unwrap());
    let pool = DbPool::connect(&DatabaseConfig::parse(&url).unwrap())
        .await
        .unwrap();
    SchemaInitializer::new(pool.clone())
        .initialize()
        .await
        .unwrap();
    (http::router(AppState::new(pool)), temp_file)
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(text) => builder
            .header("content-type", "application/json")
            .body(Body::from(text.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let text = body.map(|b| b.to_string());
    send_raw(app, method, uri, text.as_deref()).await
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Ada", "email": "ada@x.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Ada");
    let id = body["data"]["id"].as_i64().expect("id should be an integer");

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@x.io");
    assert_eq!(body["data"]["name"], "Ada");

    let (status, body) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_create_user_with_optional_columns() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "name": "Grace",
            "email": "grace@navy.mil",
            "age": 85,
            "phone": "555-0199",
            "address": "Arlington"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["age"], 85);
    assert_eq!(body["data"]["phone"], "555-0199");
    assert_eq!(body["data"]["address"], "Arlington");
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let (app, _db) = setup_app().await;
    let user = json!({"name": "Ada", "email": "ada@x.io"});

    let (status, _) = send(&app, "POST", "/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/users", Some(user)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["constraint"], "unique");
    assert!(body.get("data").is_none());
    assert!(!body.to_string().contains("UNIQUE constraint failed"));
}

#[tokio::test]
async fn test_list_users_in_id_order() {
    let (app, _db) = setup_app().await;

    for (name, email) in [("Ada", "ada@x.io"), ("Grace", "grace@x.io"), ("Linus", "linus@x.io")] {
        let (status, _) = send(
            &app,
            "POST",
            "/users",
            Some(json!({"name": name, "email": email})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users retrieved successfully");
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Grace", "Linus"]);
}

#[tokio::test]
async fn test_list_users_empty() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_update_user() {
    let (app, _db) = setup_app().await;
    let (_, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Ada", "email": "ada@x.io", "age": 36})),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(json!({"name": "Ada Lovelace", "email": "ada@analytical.engine"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@analytical.engine");
    assert_eq!(body["data"]["age"], 36);
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(
        &app,
        "PUT",
        "/users/999",
        Some(json!({"name": "Nobody", "email": "nobody@x.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_update_requires_every_field() {
    let (app, _db) = setup_app().await;
    let (_, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Ada", "email": "ada@x.io"})),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(json!({"name": "Only Name"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "email");

    // Row is unchanged
    let (_, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@x.io");
}

#[tokio::test]
async fn test_delete_missing_user_is_404() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(&app, "DELETE", "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_user_validation() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(&app, "POST", "/users", Some(json!({"email": "ada@x.io"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name is required");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Ada", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "email");

    let (status, _) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_field_type_is_invalid_body() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": 7, "email": "ada@x.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["details"]["reason"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_invalid_body() {
    let (app, _db) = setup_app().await;
    let (status, body) = send_raw(&app, "POST", "/users", Some("{\"name\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_invalid_id_is_400() {
    let (app, _db) = setup_app().await;

    for uri in ["/users/abc", "/users/0", "/users/-3"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body["details"]["field"], "id");
    }
}

#[tokio::test]
async fn test_root_route() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_unknown_route_is_404_with_path() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(&app, "GET", "/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["path"], "/widgets");

    let (status, body) = send(&app, "GET", "/users/1/friends", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/users/1/friends");
}

#[tokio::test]
async fn test_unsupported_method_is_404_with_path() {
    let (app, _db) = setup_app().await;

    for (method, uri) in [
        ("PATCH", "/users/1"),
        ("POST", "/users/1"),
        ("DELETE", "/users"),
        ("PUT", "/todos"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Route not found");
        assert_eq!(body["path"], uri);
    }
}
