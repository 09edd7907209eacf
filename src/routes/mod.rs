// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod analytics;
pub mod exercises;
pub mod schema;
pub mod sets;
pub mod users;
pub mod workouts;

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_identity, ROLE_HEADER, USER_ID_HEADER};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, HeaderName, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

// Handlers take their path and body as fallible extractors so that the
// access check runs before any decoding error is reported.

/// JSON request body whose decoding error is deferred to [`json_body`].
pub(crate) type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

/// Path parameters whose decoding error is deferred to [`path_params`].
pub(crate) type PathParams<T> = std::result::Result<Path<T>, PathRejection>;

/// Unwrap a JSON body, turning a rejection into `BadRequest`.
pub(crate) fn json_body<T>(body: JsonBody<T>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap path parameters, turning a rejection into `BadRequest`.
pub(crate) fn path_params<T>(path: PathParams<T>) -> Result<T> {
    path.map(|Path(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub title: String,
    pub version: String,
    pub build_id: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        title: state.config.api_title.clone(),
        version: state.config.api_version.clone(),
        build_id,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ROLE_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    // Public routes (no identity required)
    let public_routes = Router::new().route("/health", get(health_check));

    // Every other route requires identity claims
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(exercises::routes())
        .merge(workouts::routes())
        .merge(sets::routes())
        .merge(schema::routes())
        .merge(analytics::routes())
        .route_layer(middleware::from_fn(require_identity));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
