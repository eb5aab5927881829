//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full router (same middleware stack as production via
//! `build_app_router`) through `tower::ServiceExt::oneshot`, without a TCP
//! listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body.
#[allow(dead_code)]
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request.
#[allow(dead_code)]
pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and an `x-actor-id` header.
#[allow(dead_code)]
pub async fn post_json_as(
    app: Router,
    uri: &str,
    actor_id: i64,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-actor-id", actor_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON. An empty body (e.g. 204) yields
/// `Value::Null`.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Fixture helpers (all through the public API)
// ---------------------------------------------------------------------------

/// Create a production item, returning its id.
#[allow(dead_code)]
pub async fn create_production_item(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/production-items",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a sample item variation, returning its id.
#[allow(dead_code)]
pub async fn create_sample_item(
    pool: &PgPool,
    production_item_id: i64,
    stage: &str,
    color: Option<&str>,
    size: Option<&str>,
    revision: &str,
) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/sample-items",
        serde_json::json!({
            "production_item_id": production_item_id,
            "stage": stage,
            "color": color,
            "size": size,
            "revision": revision,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a team, returning its id.
#[allow(dead_code)]
pub async fn create_team(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/teams", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a request for a sample item, returning its id.
#[allow(dead_code)]
pub async fn create_request(pool: &PgPool, sample_item_id: i64, team_id: i64, quantity: i32) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/requests",
        serde_json::json!({
            "sample_item_id": sample_item_id,
            "team_id": team_id,
            "quantity": quantity,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Apply a status transition through the API, asserting it succeeds, and
/// return the updated request JSON.
#[allow(dead_code)]
pub async fn transition_request(pool: &PgPool, request_id: i64, status: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/requests/{request_id}/status"),
        serde_json::json!({ "status": status }),
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "transition to {status} should succeed"
    );
    body_json(response).await["data"].clone()
}
