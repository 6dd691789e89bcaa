// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: login, token refresh and logout.

use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{LoginRequest, LoginResponse, RefreshTokenRequest};
use crate::validation::ValidatedJson;
use crate::AppState;

/// Routes reachable without a session.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Routes that need a bearer token. The auth middleware is applied in
/// routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

/// Exchange username/password for an access + refresh token pair.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let response = state.auth_service.login(&request).await?;
    Ok(Json(response))
}

/// Mint a new access token from a refresh token. The refresh token itself
/// is returned unchanged.
async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<LoginResponse>> {
    let response = state.auth_service.refresh(&request).await?;
    Ok(Json(response))
}

/// Logout. Tokens are not revoked; the client is expected to discard them.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode> {
    state.auth_service.logout(&user.username).await?;
    Ok(StatusCode::OK)
}
