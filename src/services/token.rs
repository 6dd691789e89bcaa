// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuance and validation.
//!
//! Access and refresh tokens are both HS256 JWTs signed with the process
//! signing key. They are told apart by the `typ` claim. Every token carries
//! a random `jti`, so two tokens minted for the same user in the same
//! second still differ.
//!
//! There is no revocation: a token is valid from issuance until `exp`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::credentials::AuthenticatedIdentity;
use crate::time_utils::unix_seconds;

/// Which half of the token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role label; only present on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub typ: TokenKind,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Unique token ID
    pub jti: String,
}

/// Token validation failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::InvalidToken
    }
}

/// Mints and checks signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenService {
    pub fn new(signing_key: &[u8], access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_signing_key,
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        )
    }

    /// Access token lifetime, as reported in `expiresIn`.
    pub fn access_ttl_secs(&self) -> u64 {
        self.access_ttl_secs
    }

    pub fn issue_access_token(&self, identity: &AuthenticatedIdentity) -> Result<String> {
        self.issue_access_token_at(identity, SystemTime::now())
    }

    pub fn issue_access_token_at(
        &self,
        identity: &AuthenticatedIdentity,
        now: SystemTime,
    ) -> Result<String> {
        self.issue(
            &identity.username,
            Some(identity.role.clone()),
            TokenKind::Access,
            self.access_ttl_secs,
            now,
        )
    }

    pub fn issue_refresh_token(&self, username: &str) -> Result<String> {
        self.issue_refresh_token_at(username, SystemTime::now())
    }

    pub fn issue_refresh_token_at(&self, username: &str, now: SystemTime) -> Result<String> {
        self.issue(username, None, TokenKind::Refresh, self.refresh_ttl_secs, now)
    }

    fn issue(
        &self,
        sub: &str,
        role: Option<String>,
        typ: TokenKind,
        ttl_secs: u64,
        now: SystemTime,
    ) -> Result<String> {
        let iat = unix_seconds(now)?;
        let exp = iat.checked_add(ttl_secs).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Token lifetime of {}s overflows exp", ttl_secs))
        })?;

        let claims = Claims {
            sub: sub.to_string(),
            role,
            typ,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    /// Check signature and expiry. Never fails; malformed input is just invalid.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, SystemTime::now())
    }

    pub fn validate_at(&self, token: &str, now: SystemTime) -> bool {
        self.decode_at(token, now).is_ok()
    }

    /// Username encoded in a valid token.
    pub fn subject_of(&self, token: &str) -> std::result::Result<String, TokenError> {
        self.decode_at(token, SystemTime::now())
            .map(|claims| claims.sub)
    }

    /// Decode a valid token and require it to be of the given kind.
    pub fn verify(&self, token: &str, kind: TokenKind) -> std::result::Result<Claims, TokenError> {
        self.verify_at(token, kind, SystemTime::now())
    }

    pub fn verify_at(
        &self,
        token: &str,
        kind: TokenKind,
        now: SystemTime,
    ) -> std::result::Result<Claims, TokenError> {
        let claims = self.decode_at(token, now)?;
        if claims.typ != kind {
            return Err(TokenError::Invalid(format!(
                "expected {:?} token, got {:?}",
                kind, claims.typ
            )));
        }
        Ok(claims)
    }

    /// Verify the signature and check `exp` against `now`.
    pub fn decode_at(&self, token: &str, now: SystemTime) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock, with no leeway.
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        let now = unix_seconds(now).map_err(|e| TokenError::Invalid(e.to_string()))?;
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
