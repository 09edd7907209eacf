// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema version bookkeeping.

use super::{json_body, JsonBody};
use crate::error::Result;
use crate::middleware::auth::{Identity, Operation};
use crate::models::{NewSchemaVersion, SchemaVersion};
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/schema/add", post(add_schema_version))
}

async fn add_schema_version(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    body: JsonBody<NewSchemaVersion>,
) -> Result<(StatusCode, Json<SchemaVersion>)> {
    identity.authorize(Operation::RecordSchemaVersion, None)?;
    let body = json_body(body)?;

    let version = state.db.record_schema_version(&body).await?;
    tracing::info!(version = %version.version, "Recorded schema version");

    Ok((StatusCode::CREATED, Json(version)))
}
