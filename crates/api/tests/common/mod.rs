#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use noteful_api::auth::jwt::JwtConfig;
use noteful_api::auth::JwtAuthProvider;
use noteful_api::config::{LogFormat, ServerConfig};
use noteful_api::router::build_app_router;
use noteful_api::state::AppState;
use noteful_db::memory::MemoryStore;
use noteful_db::store::DocumentStore;

pub const TEST_PASSWORD: &str = "password123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router on top of a fresh in-memory store.
///
/// Goes through [`build_app_router`], so the tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Like [`build_test_app`], over a caller-supplied store so a test can
/// inspect it directly.
pub fn build_test_app_with_store(store: Arc<dyn DocumentStore>) -> Router {
    let config = test_config();
    let auth = Arc::new(JwtAuthProvider::new(Arc::clone(&store), config.jwt.clone()));

    let state = AppState {
        store,
        auth,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Send a request with a raw, possibly malformed, JSON body.
pub async fn send_raw_auth(app: &Router, method: &str, uri: &str, raw: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `username` through the API and return its JSON.
pub async fn register(app: &Router, username: &str) -> Value {
    let body = json!({ "username": username, "password": TEST_PASSWORD, "fullname": "Test User" });
    let response = post_json(app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in `username` and return its bearer token.
pub async fn login(app: &Router, username: &str) -> String {
    let body = json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["authToken"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in, returning the token.
pub async fn signup(app: &Router, username: &str) -> String {
    register(app, username).await;
    login(app, username).await
}

/// Create an entity under `/api/{collection}` and return its JSON.
pub async fn create_named(app: &Router, collection: &str, name: &str, token: &str) -> Value {
    let uri = format!("/api/{collection}");
    let response = post_json_auth(app, &uri, json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a note from `body` and return its JSON.
pub async fn create_note(app: &Router, body: Value, token: &str) -> Value {
    let response = post_json_auth(app, "/api/notes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
