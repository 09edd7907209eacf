// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Entities are flat records; relationships are foreign-key ids resolved
//! through explicit queries in [`crate::db`].

pub mod exercise;
pub mod schema_version;
pub mod set;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, NewExercise};
pub use schema_version::{NewSchemaVersion, SchemaVersion};
pub use set::{NewSet, Set, SetUpdate};
pub use user::{NewUser, User};
pub use workout::{NewWorkout, Workout};
