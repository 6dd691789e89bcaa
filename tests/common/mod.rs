// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use car_center_api::config::Config;
use car_center_api::db::{MemoryUserStore, UserRepository};
use car_center_api::models::{NewUser, User};
use car_center_api::routes::create_router;
use car_center_api::services::credentials::hash_password;
use car_center_api::services::AuthenticatedIdentity;
use car_center_api::AppState;
use std::sync::Arc;

/// Create a test app backed by an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), MemoryUserStore::new()));
    (create_router(state.clone()), state)
}

/// Store a user with the given plaintext password.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, username: &str, password: &str, enabled: bool) -> User {
    state
        .db
        .save(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(password).expect("Failed to hash password"),
            name: format!("{} Test", username),
            phone: None,
            role: "USER".to_string(),
            enabled,
        })
        .await
        .expect("Failed to seed user")
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request carrying a bearer token.
#[allow(dead_code)]
pub fn with_bearer(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as raw bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

/// Mint an access token with the default role.
#[allow(dead_code)]
pub fn access_token_for(state: &AppState, username: &str) -> String {
    state
        .auth_service
        .tokens()
        .issue_access_token(&AuthenticatedIdentity {
            username: username.to_string(),
            role: "USER".to_string(),
        })
        .expect("Failed to create access token")
}
