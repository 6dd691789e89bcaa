// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::error::AppError;
use crate::services::TokenKind;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie that may carry the access token instead of the header.
pub const SESSION_COOKIE: &str = "car_center_token";

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

/// Middleware that requires a valid access token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let claims = state
        .auth_service
        .tokens()
        .verify(&token, TokenKind::Access)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })?;

    let auth_user = AuthUser {
        username: claims.sub,
        role: claims.role.unwrap_or_default(),
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
