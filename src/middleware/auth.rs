// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-based access control.
//!
//! Callers are identified by two headers set by an upstream authenticator:
//! `X-User-Role` and `X-User-ID`. The middleware only turns them into an
//! [`Identity`]; each handler then calls [`authorize`] with its
//! [`Operation`] before it reads or writes anything.

use crate::error::AppError;
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::fmt;
use std::str::FromStr;

pub const ROLE_HEADER: &str = "x-user-role";
pub const USER_ID_HEADER: &str = "x-user-id";

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    /// Ordinary account, limited to its own data
    User,
    /// Read-only analytics access
    Report,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Report => "report",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "report" => Ok(Role::Report),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Guarded operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListUsers,
    CreateUser,
    EnableUser,
    DisableUser,
    CreateExercise,
    ListExercises,
    CreateWorkout,
    ListWorkouts,
    CreateSet,
    ListSets,
    UpdateSet,
    RecordSchemaVersion,
    OneRepMax,
    PersonalRecord,
    UserExerciseSets,
    ExerciseSummary,
}

impl Operation {
    /// Roles permitted to perform this operation.
    pub fn allowed_roles(&self) -> &'static [Role] {
        use Role::*;
        match self {
            Operation::ListUsers
            | Operation::CreateUser
            | Operation::EnableUser
            | Operation::DisableUser
            | Operation::RecordSchemaVersion => &[Admin],
            Operation::CreateExercise
            | Operation::CreateWorkout
            | Operation::ListWorkouts
            | Operation::CreateSet
            | Operation::ListSets
            | Operation::UpdateSet => &[Admin, User],
            Operation::ListExercises
            | Operation::OneRepMax
            | Operation::PersonalRecord
            | Operation::UserExerciseSets
            | Operation::ExerciseSummary => &[Admin, User, Report],
        }
    }
}

/// Identity claimed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub user_id: i64,
}

impl Identity {
    /// Extract the identity claims from request headers.
    ///
    /// A missing, non-UTF-8 or non-numeric claim is `Unauthorized`. A role
    /// outside the known set is `Forbidden`: it is well formed but no
    /// operation admits it.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let role = headers
            .get(ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let user_id: i64 = headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .ok_or(AppError::Unauthorized)?;

        let role = role.parse::<Role>().map_err(|UnknownRole(role)| {
            tracing::warn!(role = %role, user_id, "Rejected unknown role");
            AppError::Forbidden("You do not have the required permissions.".to_string())
        })?;

        Ok(Self { role, user_id })
    }

    /// Shorthand for [`authorize`].
    pub fn authorize(&self, operation: Operation, target_user: Option<i64>) -> Result<(), AppError> {
        authorize(self, operation, target_user)
    }
}

/// Decide whether `identity` may perform `operation`.
///
/// `target_user` is the user id from the request path, for operations
/// scoped to one user. Callers with the `user` role may only target
/// themselves; `admin` and `report` are not scoped.
pub fn authorize(
    identity: &Identity,
    operation: Operation,
    target_user: Option<i64>,
) -> Result<(), AppError> {
    if !operation.allowed_roles().contains(&identity.role) {
        tracing::warn!(
            role = %identity.role,
            user_id = identity.user_id,
            ?operation,
            "Role not permitted"
        );
        return Err(AppError::Forbidden(
            "You do not have the required permissions.".to_string(),
        ));
    }

    if identity.role == Role::User {
        if let Some(target) = target_user {
            if target != identity.user_id {
                tracing::warn!(
                    user_id = identity.user_id,
                    target_user = target,
                    ?operation,
                    "Cross-user access denied"
                );
                return Err(AppError::Forbidden(
                    "Users can only access their own data.".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Middleware that requires identity claims on every request.
///
/// On success the [`Identity`] is stored as a request extension.
pub async fn require_identity(mut request: Request, next: Next) -> Result<Response, AppError> {
    let identity = Identity::from_headers(request.headers())?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn identity(role: Role, user_id: i64) -> Identity {
        Identity { role, user_id }
    }

    fn headers(role: Option<&str>, user_id: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(role) = role {
            headers.insert(ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        }
        if let Some(id) = user_id {
            headers.insert(USER_ID_HEADER, HeaderValue::from_str(id).unwrap());
        }
        headers
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::User, Role::Report] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_from_headers_valid() {
        let id = Identity::from_headers(&headers(Some("user"), Some("7"))).unwrap();
        assert_eq!(id, identity(Role::User, 7));
    }

    #[test]
    fn test_from_headers_missing_role_is_unauthorized() {
        let err = Identity::from_headers(&headers(None, Some("1"))).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_from_headers_missing_or_bad_id_is_unauthorized() {
        let err = Identity::from_headers(&headers(Some("admin"), None)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = Identity::from_headers(&headers(Some("admin"), Some("abc"))).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_from_headers_unknown_role_is_forbidden() {
        let err = Identity::from_headers(&headers(Some("superuser"), Some("1"))).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_only_operations() {
        for op in [
            Operation::ListUsers,
            Operation::CreateUser,
            Operation::EnableUser,
            Operation::DisableUser,
            Operation::RecordSchemaVersion,
        ] {
            assert!(authorize(&identity(Role::Admin, 1), op, None).is_ok());
            assert!(authorize(&identity(Role::User, 1), op, None).is_err());
            assert!(authorize(&identity(Role::Report, 1), op, None).is_err());
        }
    }

    #[test]
    fn test_report_cannot_create_workout() {
        let err = authorize(&identity(Role::Report, 3), Operation::CreateWorkout, Some(3))
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_report_can_read_analytics_for_anyone() {
        let report = identity(Role::Report, 3);
        assert!(authorize(&report, Operation::PersonalRecord, Some(99)).is_ok());
        assert!(authorize(&report, Operation::UserExerciseSets, Some(99)).is_ok());
        assert!(authorize(&report, Operation::OneRepMax, None).is_ok());
    }

    #[test]
    fn test_user_scoped_to_self() {
        let user = identity(Role::User, 5);
        assert!(authorize(&user, Operation::CreateWorkout, Some(5)).is_ok());

        let err = authorize(&user, Operation::CreateWorkout, Some(6)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = authorize(&user, Operation::PersonalRecord, Some(6)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_not_scoped() {
        let admin = identity(Role::Admin, 1);
        assert!(authorize(&admin, Operation::CreateWorkout, Some(42)).is_ok());
        assert!(authorize(&admin, Operation::ListWorkouts, Some(42)).is_ok());
    }

    #[test]
    fn test_user_without_target_is_permitted() {
        // Set operations carry a workout id, not a user id.
        let user = identity(Role::User, 5);
        assert!(authorize(&user, Operation::CreateSet, None).is_ok());
        assert!(authorize(&user, Operation::UpdateSet, None).is_ok());
    }
}
