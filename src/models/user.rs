// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored value of `enabled` for an active account.
pub const USER_ENABLED: i64 = 1;
/// Stored value of `enabled` for a disabled account.
pub const USER_DISABLED: i64 = 0;

/// User account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 1 - enabled, 0 - disabled
    pub enabled: i64,
}

impl User {
    pub fn is_enabled(&self) -> bool {
        self.enabled != USER_DISABLED
    }
}

/// Body of `POST /users/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
