// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use lifting_tracker::config::Config;
use lifting_tracker::db::Database;
use lifting_tracker::routes::create_router;
use lifting_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a fresh in-memory database.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

/// Create a test app backed by its own in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Build a request carrying identity headers and an optional JSON body.
#[allow(dead_code)]
pub fn request(
    method: &str,
    uri: &str,
    identity: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((role, user_id)) = identity {
        builder = builder
            .header("X-User-Role", role)
            .header("X-User-ID", user_id);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request through the router and decode the JSON response.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Identity headers for an admin caller.
#[allow(dead_code)]
pub const ADMIN: Option<(&str, &str)> = Some(("admin", "1"));
