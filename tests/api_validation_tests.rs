// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_login_blank_fields() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice", "correct", true).await;

    for body in [
        json!({"username": "", "password": "correct"}),
        json!({"username": "alice", "password": "   "}),
    ] {
        let response = app
            .clone()
            .oneshot(common::post_json("/auth/login", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(common::body_json(response).await["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_login_missing_field() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::post_json("/auth/login", json!({"username": "alice"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"username\": \"alice\","))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_missing_content_type() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .body(Body::from(
                    json!({"username": "alice", "password": "correct"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_blank_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/auth/refresh",
            json!({"refreshToken": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["details"], "refresh token is required");
}

#[tokio::test]
async fn test_create_user_field_rules() {
    let (app, _) = common::create_test_app();

    let cases = [
        (json!({"username": "ab", "email": "ab@example.com", "password": "password123", "name": "Kim"}), "username must be 3-20 characters"),
        (json!({"username": "user123", "email": "not-an-email", "password": "password123", "name": "Kim"}), "email must be a valid address"),
        (json!({"username": "user123", "email": "u@example.com", "password": "short", "name": "Kim"}), "password must be 8-20 characters"),
        (json!({"username": "user123", "email": "u@example.com", "password": "password123", "name": "  "}), "name is required"),
    ];

    for (body, expected) in cases {
        let response = app
            .clone()
            .oneshot(common::post_json("/users", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = common::body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert!(
            body["details"].as_str().unwrap().contains(expected),
            "expected {:?} in {}",
            expected,
            body
        );
    }
}

#[tokio::test]
async fn test_invalid_create_user_stores_nothing() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/users",
            json!({"username": "", "email": "", "password": "", "name": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.db.is_empty());
}

#[tokio::test]
async fn test_non_numeric_user_id() {
    let (app, state) = common::create_test_app();
    let token = common::access_token_for(&state, "alice");

    let response = app
        .oneshot(common::with_bearer("GET", "/users/abc", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
