// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Set model: one weight x reps effort within a workout.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored set record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Set {
    pub id: i64,
    pub exercise_id: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub comment: Option<String>,
    pub workout_id: i64,
}

/// Body of `POST /sets/{workout_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSet {
    pub exercise_id: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of `PUT /sets/{set_id}/update`.
///
/// Only fields that are present overwrite the stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetUpdate {
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SetUpdate {
    /// Apply the supplied fields to `set` in place.
    pub fn apply_to(&self, set: &mut Set) {
        if let Some(reps) = self.reps {
            set.reps = Some(reps);
        }
        if let Some(weight) = self.weight {
            set.weight = Some(weight);
        }
        if let Some(comment) = &self.comment {
            set.comment = Some(comment.clone());
        }
    }
}
