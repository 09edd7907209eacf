// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access control and CORS tests.
//!
//! These tests verify that:
//! 1. Requests without identity claims are rejected as unauthenticated
//! 2. Roles outside an operation's allowed set are forbidden
//! 3. Ordinary users are confined to their own user id
//! 4. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, request, send, ADMIN};

/// Create a user through the API and return its id.
async fn seed_user(app: &axum::Router, first_name: &str) -> i64 {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/users/add",
            ADMIN,
            Some(json!({
                "first_name": first_name,
                "last_name": "Tester",
                "email": format!("{}@example.com", first_name.to_lowercase()),
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_missing_headers_is_unauthorized() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, request("GET", "/users/", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_missing_role_is_unauthorized_not_forbidden() {
    let (app, _) = create_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/exercises/")
        .header("X-User-ID", "1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_numeric_user_id_is_unauthorized() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(
        &app,
        request("GET", "/exercises/", Some(("admin", "one")), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(
        &app,
        request("GET", "/exercises/", Some(("superuser", "1")), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_role_cannot_list_users() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, request("GET", "/users/", Some(("user", "1")), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_report_role_cannot_add_workout() {
    let (app, _) = create_test_app().await;
    let user_id = seed_user(&app, "Rita").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/workouts/{}/add", user_id),
            Some(("report", &user_id.to_string())),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_cannot_add_workout_for_someone_else() {
    let (app, _) = create_test_app().await;
    let alice = seed_user(&app, "Alice").await;
    let bob = seed_user(&app, "Bob").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/workouts/{}/add", bob),
            Some(("user", &alice.to_string())),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Nothing was written for Bob.
    let (status, body) = send(
        &app,
        request("GET", &format!("/workouts/{}/get", bob), ADMIN, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_user_can_add_own_workout() {
    let (app, _) = create_test_app().await;
    let alice = seed_user(&app, "Alice").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/workouts/{}/add", alice),
            Some(("user", &alice.to_string())),
            Some(json!({"comment": "push day"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], alice);
    assert_eq!(body["comment"], "push day");
}

#[tokio::test]
async fn test_user_cannot_read_someone_elses_personal_record() {
    let (app, _) = create_test_app().await;
    let alice = seed_user(&app, "Alice").await;
    let bob = seed_user(&app, "Bob").await;

    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/analytics/users/{}/exercises/1/findpr", bob),
            Some(("user", &alice.to_string())),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_report_role_can_read_exercises() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(
        &app,
        request("GET", "/exercises/", Some(("report", "9")), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_forbidden_check_precedes_not_found() {
    let (app, _) = create_test_app().await;

    // User 42 does not exist, but the role check fails first.
    let (status, _) = send(
        &app,
        request("PUT", "/users/42/disable", Some(("user", "42")), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forbidden_check_precedes_body_decoding() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(
        &app,
        request("POST", "/exercises/", Some(("report", "3")), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/users/add",
            Some(("user", "5")),
            Some(json!({ "first_name": "Partial" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(
        &app,
        request("POST", "/sets/1", Some(("report", "3")), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request("POST", "/schema/add", Some(("user", "5")), Some(json!([]))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forbidden_check_precedes_path_decoding() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(
        &app,
        request("PUT", "/users/abc/enable", Some(("user", "5")), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request("GET", "/workouts/abc/get", Some(("report", "3")), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_input_from_permitted_role_is_json_bad_request() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, request("POST", "/exercises/", ADMIN, Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"].is_string());

    let (status, body) = send(&app, request("PUT", "/users/abc/enable", ADMIN, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = send(
        &app,
        request(
            "GET",
            "/analytics/users/abc/exercises/1/findpr",
            Some(("user", "5")),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/exercises/")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-user-role,x-user-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn test_health_requires_no_identity() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["title"], "Lifting API");
}
