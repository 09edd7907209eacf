// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set routes.
//!
//! These carry a workout or set id rather than a user id, so `user` callers
//! are not checked for ownership of the workout here.

use super::{json_body, path_params, JsonBody, PathParams};
use crate::error::{AppError, Result};
use crate::middleware::auth::{Identity, Operation};
use crate::models::{NewSet, Set, SetUpdate};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sets/{id}", get(list_sets).post(add_set))
        .route("/sets/{id}/update", put(update_set))
}

/// List all sets recorded in a workout.
async fn list_sets(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    workout_id: PathParams<i64>,
) -> Result<Json<Vec<Set>>> {
    identity.authorize(Operation::ListSets, None)?;
    let workout_id = path_params(workout_id)?;

    if state.db.get_workout(workout_id).await?.is_none() {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Json(state.db.list_sets_for_workout(workout_id).await?))
}

/// Record a set in a workout.
async fn add_set(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    workout_id: PathParams<i64>,
    body: JsonBody<NewSet>,
) -> Result<(StatusCode, Json<Set>)> {
    identity.authorize(Operation::CreateSet, None)?;
    let workout_id = path_params(workout_id)?;
    let body = json_body(body)?;

    let set = state.db.create_set(workout_id, &body).await?;
    tracing::info!(
        set_id = set.id,
        workout_id,
        exercise_id = set.exercise_id,
        "Created set"
    );

    Ok((StatusCode::CREATED, Json(set)))
}

/// Update a set's reps, weight and/or comment.
async fn update_set(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    set_id: PathParams<i64>,
    body: JsonBody<SetUpdate>,
) -> Result<Json<Set>> {
    identity.authorize(Operation::UpdateSet, None)?;
    let set_id = path_params(set_id)?;
    let body = json_body(body)?;

    let set = state
        .db
        .update_set(set_id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Set not found".to_string()))?;
    tracing::info!(set_id, "Updated set");

    Ok(Json(set))
}
