// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise catalogue model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An exercise that sets can be recorded against.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Assigned by the server at creation (UTC), never updated
    pub date_started: NaiveDateTime,
}

/// Body of `POST /exercises/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExercise {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
