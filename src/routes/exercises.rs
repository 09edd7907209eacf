// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalogue routes.

use super::{json_body, JsonBody};
use crate::error::Result;
use crate::middleware::auth::{Identity, Operation};
use crate::models::{Exercise, NewExercise};
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/exercises/", get(list_exercises).post(add_exercise))
}

async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Exercise>>> {
    identity.authorize(Operation::ListExercises, None)?;
    Ok(Json(state.db.list_exercises().await?))
}

async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    body: JsonBody<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>)> {
    identity.authorize(Operation::CreateExercise, None)?;
    let body = json_body(body)?;

    let exercise = state.db.create_exercise(&body).await?;
    tracing::info!(exercise_id = exercise.id, name = %exercise.name, "Created exercise");

    Ok((StatusCode::CREATED, Json(exercise)))
}
