// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User administration routes (admin only).

use super::{json_body, path_params, JsonBody, PathParams};
use crate::error::{AppError, Result};
use crate::middleware::auth::{Identity, Operation};
use crate::models::{NewUser, User};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users))
        .route("/users/add", post(add_user))
        .route("/users/{id}/enable", put(enable_user))
        .route("/users/{id}/disable", put(disable_user))
}

/// List all users.
async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<User>>> {
    identity.authorize(Operation::ListUsers, None)?;
    Ok(Json(state.db.list_users().await?))
}

/// Create a new, enabled user.
async fn add_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    body: JsonBody<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    identity.authorize(Operation::CreateUser, None)?;
    let body = json_body(body)?;

    let user = state.db.create_user(&body).await?;
    tracing::info!(user_id = user.id, created_by = identity.user_id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn enable_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    id: PathParams<i64>,
) -> Result<Json<User>> {
    identity.authorize(Operation::EnableUser, None)?;
    set_enabled(&state, path_params(id)?, true).await
}

async fn disable_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    id: PathParams<i64>,
) -> Result<Json<User>> {
    identity.authorize(Operation::DisableUser, None)?;
    set_enabled(&state, path_params(id)?, false).await
}

async fn set_enabled(state: &AppState, id: i64, enabled: bool) -> Result<Json<User>> {
    let user = state
        .db
        .set_user_enabled(id, enabled)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    tracing::info!(user_id = id, enabled = user.is_enabled(), "Updated user status");
    Ok(Json(user))
}
