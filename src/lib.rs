// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Lifting tracker: a REST API for recording weightlifting workouts.
//!
//! This crate provides users, exercises, workouts and sets behind role-based
//! access control, plus one-rep-max and personal-record analytics.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
