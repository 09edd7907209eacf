// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics routes: one-rep max, personal records, per-exercise history.

use super::{path_params, PathParams};
use crate::error::{AppError, Result};
use crate::middleware::auth::{Identity, Operation};
use crate::models::Set;
use crate::services::analytics::{self, ExerciseSummary, PersonalRecord};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/sets/{set_id}/calc1rm", get(calc_one_rep_max))
        .route(
            "/analytics/users/{user_id}/exercises/{exercise_id}/findpr",
            get(find_pr),
        )
        .route(
            "/analytics/users/{user_id}/exercises/{exercise_id}/getsets",
            get(get_sets),
        )
        .route(
            "/analytics/users/{user_id}/exercises/{exercise_id}/summary",
            get(get_summary),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OneRepMaxResponse {
    pub set_id: i64,
    pub one_rep_max: Option<f64>,
}

/// Estimate the one-rep max of a single set.
async fn calc_one_rep_max(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    set_id: PathParams<i64>,
) -> Result<Json<OneRepMaxResponse>> {
    identity.authorize(Operation::OneRepMax, None)?;
    let set_id = path_params(set_id)?;

    let set = state
        .db
        .get_set(set_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Set not found".to_string()))?;

    Ok(Json(OneRepMaxResponse {
        set_id: set.id,
        one_rep_max: analytics::one_rep_max(set.weight, set.reps),
    }))
}

/// Heaviest set a user has recorded for an exercise.
async fn find_pr(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    ids: PathParams<(i64, i64)>,
) -> Result<Json<PersonalRecord>> {
    let (user_id, exercise_id) =
        authorize_user_scoped(&identity, Operation::PersonalRecord, ids)?;

    let sets = user_exercise_sets(&state, user_id, exercise_id).await?;
    let record = analytics::find_personal_record(&sets);
    tracing::debug!(
        user_id,
        exercise_id,
        sets = sets.len(),
        max_weight = record.max_weight,
        "Computed personal record"
    );

    Ok(Json(record))
}

/// Every set a user has recorded for an exercise.
async fn get_sets(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    ids: PathParams<(i64, i64)>,
) -> Result<Json<Vec<Set>>> {
    let (user_id, exercise_id) =
        authorize_user_scoped(&identity, Operation::UserExerciseSets, ids)?;
    Ok(Json(user_exercise_sets(&state, user_id, exercise_id).await?))
}

/// Personal record plus every set annotated with its one-rep max.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    ids: PathParams<(i64, i64)>,
) -> Result<Json<ExerciseSummary>> {
    let (user_id, exercise_id) =
        authorize_user_scoped(&identity, Operation::ExerciseSummary, ids)?;

    let sets = user_exercise_sets(&state, user_id, exercise_id).await?;
    Ok(Json(analytics::summarize(&sets)))
}

/// Authorize a `/users/{user_id}/exercises/{exercise_id}` request, then
/// decode its path.
fn authorize_user_scoped(
    identity: &Identity,
    operation: Operation,
    ids: PathParams<(i64, i64)>,
) -> Result<(i64, i64)> {
    let ids = path_params(ids);
    identity.authorize(operation, ids.as_ref().ok().map(|(user_id, _)| *user_id))?;
    ids
}

/// Load a user's sets for an exercise, after checking both exist.
async fn user_exercise_sets(state: &AppState, user_id: i64, exercise_id: i64) -> Result<Vec<Set>> {
    if state.db.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if state.db.get_exercise(exercise_id).await?.is_none() {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }

    state.db.get_sets_for_user_exercise(user_id, exercise_id).await
}
