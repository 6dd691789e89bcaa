// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, refresh and logout orchestration.

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{LoginRequest, LoginResponse, RefreshTokenRequest, User, TOKEN_TYPE_BEARER};
use crate::services::credentials::{AuthenticatedIdentity, CredentialVerifier};
use crate::services::token::{TokenKind, TokenService};

/// Session issuance built on the credential verifier and token service.
///
/// Refresh tokens are not rotated: `refresh` echoes the submitted token
/// back and only replaces the access token. Logout does not invalidate
/// anything server-side; tokens stay valid until they expire.
#[derive(Clone)]
pub struct AuthService<U> {
    users: U,
    verifier: CredentialVerifier<U>,
    tokens: TokenService,
}

impl<U: UserRepository + Clone> AuthService<U> {
    pub fn new(users: U, tokens: TokenService) -> Self {
        Self {
            verifier: CredentialVerifier::new(users.clone()),
            users,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Check credentials and issue a fresh access/refresh token pair.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let identity = self
            .verifier
            .authenticate(&request.username, &request.password)
            .await?;

        // The verifier only confirms identity; the profile snapshot needs the full record.
        let user = self.require_user(&identity.username).await?;

        let access_token = self.tokens.issue_access_token(&identity)?;
        let refresh_token = self.tokens.issue_refresh_token(&identity.username)?;

        tracing::info!(username = %user.username, "Login successful");

        Ok(self.response(access_token, refresh_token, &user))
    }

    /// Exchange a valid refresh token for a new access token.
    pub async fn refresh(&self, request: &RefreshTokenRequest) -> Result<LoginResponse> {
        let claims = self
            .tokens
            .verify(&request.refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AppError::from(e)
            })?;

        let user = self.require_user(&claims.sub).await?;

        let identity = AuthenticatedIdentity {
            username: user.username.clone(),
            role: user.role.clone(),
        };
        let access_token = self.tokens.issue_access_token(&identity)?;

        tracing::info!(username = %user.username, "Access token refreshed");

        Ok(self.response(access_token, request.refresh_token.clone(), &user))
    }

    /// Logout is acknowledged but has no server-side effect.
    pub async fn logout(&self, username: &str) -> Result<()> {
        tracing::info!(username, "Logout acknowledged");
        Ok(())
    }

    async fn require_user(&self, username: &str) -> Result<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    fn response(&self, access_token: String, refresh_token: String, user: &User) -> LoginResponse {
        LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.tokens.access_ttl_secs(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
