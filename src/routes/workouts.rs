// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes, scoped to one user.

use super::{path_params, PathParams};
use crate::error::{AppError, Result};
use crate::middleware::auth::{Identity, Operation};
use crate::models::{NewWorkout, Workout};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workouts/{user_id}/add", post(add_workout))
        .route("/workouts/{user_id}/get", get(list_workouts))
}

/// Human-readable form of the accepted `workout_date` format.
const WORKOUT_DATE_FORMAT_HINT: &str = "YYYY-MM-DD HH:MM:SS";

/// Create a workout for a user.
///
/// The body is optional; without a date the workout is stamped now.
async fn add_workout(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    user_id: PathParams<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<Workout>)> {
    let user_id = path_params(user_id);
    identity.authorize(Operation::CreateWorkout, user_id.as_ref().ok().copied())?;
    let user_id = user_id?;

    let body = parse_optional_body(&body)?;
    let workout_date = body.parsed_date().map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid date format. Use {}",
            WORKOUT_DATE_FORMAT_HINT
        ))
    })?;

    let workout = state
        .db
        .create_workout(user_id, workout_date, body.comment.as_deref())
        .await?;
    tracing::info!(workout_id = workout.id, user_id, "Created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}

fn parse_optional_body(body: &[u8]) -> Result<NewWorkout> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewWorkout::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// List a user's workouts.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    user_id: PathParams<i64>,
) -> Result<Json<Vec<Workout>>> {
    let user_id = path_params(user_id);
    identity.authorize(Operation::ListWorkouts, user_id.as_ref().ok().copied())?;
    let user_id = user_id?;

    if state.db.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(state.db.list_workouts_for_user(user_id).await?))
}
