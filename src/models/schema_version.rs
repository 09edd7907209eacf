// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Append-only record of applied schema versions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SchemaVersion {
    pub id: i64,
    pub version: String,
    pub description: String,
    pub applied_on: NaiveDateTime,
}

/// Body of `POST /schema/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSchemaVersion {
    pub version: String,
    pub description: String,
}
