//! Shared helpers for router-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router without a TCP listener, mirroring the middleware stack that
//! `main.rs` builds so tests exercise what production runs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use courtside_api::auth::jwt::{issue_token, JwtConfig};
use courtside_api::config::ServerConfig;
use courtside_api::routes;
use courtside_api::signal::FixedPricingSignal;
use courtside_api::state::AppState;

/// JWT configuration used by all test tokens.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_ttl_secs: 3600,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
        pricing_signal_url: None,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and the fixed pricing signal.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        pricing_signal: Arc::new(FixedPricingSignal::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn owner_token() -> String {
    issue_token(1, "owner", Some("owner@example.com"), &test_jwt_config()).unwrap()
}

pub fn admin_token() -> String {
    issue_token(2, "admin", Some("admin@example.com"), &test_jwt_config()).unwrap()
}

pub fn editor_token() -> String {
    issue_token(3, "editor", Some("editor@example.com"), &test_jwt_config()).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: &str) -> Response {
    send(app, "GET", path, Some(token), None).await
}

pub async fn get_unauthed(app: Router, path: &str) -> Response {
    send(app, "GET", path, None, None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "POST", path, Some(token), Some(body)).await
}

pub async fn post_empty(app: Router, path: &str, token: &str) -> Response {
    send(app, "POST", path, Some(token), None).await
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "PUT", path, Some(token), Some(body)).await
}

pub async fn delete(app: Router, path: &str, token: &str) -> Response {
    send(app, "DELETE", path, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers (drive the real endpoints)
// ---------------------------------------------------------------------------

/// Create a catalog event, returning its id.
pub async fn seed_event(pool: &PgPool, title: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/events",
        &admin_token(),
        serde_json::json!({
            "title": title,
            "sport_id": 3,
            "league_id": 7,
            "starts_at": "2026-09-01T18:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create and activate a broadcaster, returning its id.
pub async fn seed_active_broadcaster(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/broadcasters",
        &admin_token(),
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/broadcasters/{id}/status"),
        &admin_token(),
        serde_json::json!({ "status": "active" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

/// Create and activate an exclusive grant, returning its id.
pub async fn seed_active_exclusive_grant(
    pool: &PgPool,
    event_id: i64,
    broadcaster_id: i64,
    territories: &[&str],
) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/rights/grants",
        &admin_token(),
        serde_json::json!({
            "event_id": event_id,
            "broadcaster_id": broadcaster_id,
            "rights_live": true,
            "territories_allowed": territories,
            "exclusivity": "exclusive",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["grant"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/rights/grants/{id}/status"),
        &admin_token(),
        serde_json::json!({ "status": "active" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}
