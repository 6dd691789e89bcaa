// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::validation::not_blank;

/// Token type label reported to clients.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "username is required"))]
    pub username: String,

    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(custom(function = "not_blank", message = "refresh token is required"))]
    pub refresh_token: String,
}

/// Token pair plus a snapshot of the user's profile at issuance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Access token lifetime in seconds
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub expires_in: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}
