// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{UserCreateRequest, UserResponse};
use crate::validation::ValidatedJson;
use crate::AppState;

/// Registration is public.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user))
}

/// Lookups need a bearer token. The auth middleware is applied in
/// routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(get_users))
        .route("/users/{id}", get(get_user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UserCreateRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user(id).await?))
}

async fn get_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    Ok(Json(state.user_service.get_users().await?))
}
