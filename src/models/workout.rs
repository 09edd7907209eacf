// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout session model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Format accepted for a client-supplied `workout_date`.
pub const WORKOUT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A dated training session owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    pub id: i64,
    pub workout_date: NaiveDateTime,
    pub comment: Option<String>,
    pub user_id: i64,
}

/// Body of `POST /workouts/{user_id}/add`. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWorkout {
    /// `YYYY-MM-DD HH:MM:SS`; defaults to now
    #[serde(default)]
    pub workout_date: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewWorkout {
    /// Parse the supplied date, if any.
    ///
    /// Returns `Err` with the raw value when it does not match
    /// [`WORKOUT_DATE_FORMAT`].
    pub fn parsed_date(&self) -> Result<Option<NaiveDateTime>, String> {
        self.workout_date
            .as_deref()
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw, WORKOUT_DATE_FORMAT).map_err(|_| raw.to_string())
            })
            .transpose()
    }
}
