// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts, enable/disable)
//! - Exercises (catalogue)
//! - Workouts (sessions owned by a user)
//! - Sets (weight x reps within a workout, for one exercise)
//! - Schema versions (append-only audit)

use anyhow::Context;
use crate::error::AppError;
use crate::models::{
    Exercise, NewExercise, NewSchemaVersion, NewSet, NewUser, SchemaVersion, Set, SetUpdate, User,
    Workout,
};
use crate::models::user::{USER_DISABLED, USER_ENABLED};
use chrono::{NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

const SET_COLUMNS: &str = "id, exercise_id, weight, reps, comment, workout_id";

/// Tables, created on first connect. Statements are idempotent.
const SCHEMA: [&str; 6] = [
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        enabled INTEGER NOT NULL DEFAULT 1
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercises (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        date_started DATETIME NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workouts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        workout_date DATETIME NOT NULL,
        comment TEXT,
        user_id INTEGER NOT NULL REFERENCES users(id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS sets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        exercise_id INTEGER NOT NULL REFERENCES exercises(id),
        weight REAL,
        reps INTEGER,
        comment TEXT,
        workout_id INTEGER NOT NULL REFERENCES workouts(id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS schema_versions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        version TEXT NOT NULL,
        description TEXT NOT NULL,
        applied_on DATETIME NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id)",
];

/// Relational database client.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to `database_url` and make sure the schema exists.
    ///
    /// File databases are created if missing. An in-memory database lives
    /// only as long as its connection, so it is served from a single pooled
    /// connection that is never recycled.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect_with(options)
                .await?
        };

        let db = Self { pool };
        db.init_schema().await?;

        tracing::info!(url = database_url, "Connected to database");
        Ok(db)
    }

    /// Bootstrap failures surface as `Internal`.
    async fn init_schema(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("failed to create database schema")?;
        }
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, enabled FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, enabled FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Create a user. New accounts start enabled.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, enabled) VALUES (?, ?, ?, ?) \
             RETURNING id, first_name, last_name, email, enabled",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(USER_ENABLED)
        .fetch_one(&self.pool)
        .await?)
    }

    /// Enable or disable a user. Returns `None` if the user does not exist.
    ///
    /// Workouts owned by the user are not touched.
    pub async fn set_user_enabled(
        &self,
        user_id: i64,
        enabled: bool,
    ) -> Result<Option<User>, AppError> {
        let value = if enabled { USER_ENABLED } else { USER_DISABLED };
        let affected = sqlx::query("UPDATE users SET enabled = ? WHERE id = ?")
            .bind(value)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Ok(None);
        }
        self.get_user(user_id).await
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Get an exercise by id.
    pub async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>, AppError> {
        Ok(sqlx::query_as::<_, Exercise>(
            "SELECT id, name, description, date_started FROM exercises WHERE id = ?",
        )
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// List all exercises.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, AppError> {
        Ok(sqlx::query_as::<_, Exercise>(
            "SELECT id, name, description, date_started FROM exercises ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Create an exercise stamped with the current UTC time.
    pub async fn create_exercise(&self, new_exercise: &NewExercise) -> Result<Exercise, AppError> {
        Ok(sqlx::query_as::<_, Exercise>(
            "INSERT INTO exercises (name, description, date_started) VALUES (?, ?, ?) \
             RETURNING id, name, description, date_started",
        )
        .bind(&new_exercise.name)
        .bind(&new_exercise.description)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?)
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout by id.
    pub async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>, AppError> {
        Ok(sqlx::query_as::<_, Workout>(
            "SELECT id, workout_date, comment, user_id FROM workouts WHERE id = ?",
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// List the workouts owned by a user.
    pub async fn list_workouts_for_user(&self, user_id: i64) -> Result<Vec<Workout>, AppError> {
        Ok(sqlx::query_as::<_, Workout>(
            "SELECT id, workout_date, comment, user_id FROM workouts WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Create a workout for a user.
    ///
    /// The owner is checked in the same transaction as the insert; a missing
    /// user yields `NotFound` and nothing is written. `workout_date` defaults
    /// to the current UTC time.
    pub async fn create_workout(
        &self,
        user_id: i64,
        workout_date: Option<NaiveDateTime>,
        comment: Option<&str>,
    ) -> Result<Workout, AppError> {
        let mut tx = self.pool.begin().await?;

        let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let workout_date = workout_date.unwrap_or_else(|| Utc::now().naive_utc());
        let workout = sqlx::query_as::<_, Workout>(
            "INSERT INTO workouts (workout_date, comment, user_id) VALUES (?, ?, ?) \
             RETURNING id, workout_date, comment, user_id",
        )
        .bind(workout_date)
        .bind(comment)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(workout)
    }

    // ─── Set Operations ──────────────────────────────────────────

    /// Get a set by id.
    pub async fn get_set(&self, set_id: i64) -> Result<Option<Set>, AppError> {
        Ok(
            sqlx::query_as::<_, Set>(&format!("SELECT {SET_COLUMNS} FROM sets WHERE id = ?"))
                .bind(set_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// List the sets recorded in a workout.
    pub async fn list_sets_for_workout(&self, workout_id: i64) -> Result<Vec<Set>, AppError> {
        Ok(sqlx::query_as::<_, Set>(&format!(
            "SELECT {SET_COLUMNS} FROM sets WHERE workout_id = ? ORDER BY id"
        ))
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Create a set in a workout.
    ///
    /// Both the workout and the exercise must exist; they are checked in the
    /// same transaction as the insert, workout first.
    pub async fn create_set(&self, workout_id: i64, new_set: &NewSet) -> Result<Set, AppError> {
        let mut tx = self.pool.begin().await?;

        let workout: Option<i64> = sqlx::query_scalar("SELECT id FROM workouts WHERE id = ?")
            .bind(workout_id)
            .fetch_optional(&mut *tx)
            .await?;
        if workout.is_none() {
            return Err(AppError::NotFound("Workout not found".to_string()));
        }

        let exercise: Option<i64> = sqlx::query_scalar("SELECT id FROM exercises WHERE id = ?")
            .bind(new_set.exercise_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exercise.is_none() {
            return Err(AppError::NotFound("Exercise not found".to_string()));
        }

        let set = sqlx::query_as::<_, Set>(&format!(
            "INSERT INTO sets (exercise_id, weight, reps, comment, workout_id) \
             VALUES (?, ?, ?, ?, ?) RETURNING {SET_COLUMNS}"
        ))
        .bind(new_set.exercise_id)
        .bind(new_set.weight)
        .bind(new_set.reps)
        .bind(&new_set.comment)
        .bind(workout_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(set)
    }

    /// Overwrite the fields present in `update`. Returns `None` if the set
    /// does not exist.
    pub async fn update_set(
        &self,
        set_id: i64,
        update: &SetUpdate,
    ) -> Result<Option<Set>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut set) =
            sqlx::query_as::<_, Set>(&format!("SELECT {SET_COLUMNS} FROM sets WHERE id = ?"))
                .bind(set_id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        update.apply_to(&mut set);

        sqlx::query("UPDATE sets SET weight = ?, reps = ?, comment = ? WHERE id = ?")
            .bind(set.weight)
            .bind(set.reps)
            .bind(&set.comment)
            .bind(set.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(set))
    }

    /// All sets a user recorded for one exercise, across all their workouts.
    ///
    /// Rows come back in insertion order, but callers should not rely on it.
    pub async fn get_sets_for_user_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<Set>, AppError> {
        Ok(sqlx::query_as::<_, Set>(
            "SELECT s.id, s.exercise_id, s.weight, s.reps, s.comment, s.workout_id \
             FROM sets s JOIN workouts w ON s.workout_id = w.id \
             WHERE w.user_id = ? AND s.exercise_id = ? \
             ORDER BY s.id",
        )
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?)
    }

    // ─── Schema Version Operations ───────────────────────────────

    /// Append a schema version record stamped with the current UTC time.
    pub async fn record_schema_version(
        &self,
        new_version: &NewSchemaVersion,
    ) -> Result<SchemaVersion, AppError> {
        Ok(sqlx::query_as::<_, SchemaVersion>(
            "INSERT INTO schema_versions (version, description, applied_on) VALUES (?, ?, ?) \
             RETURNING id, version, description, applied_on",
        )
        .bind(&new_version.version)
        .bind(&new_version.description)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
