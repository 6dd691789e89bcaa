// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Default access token lifetime (24 hours).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 86_400;
/// Default refresh token lifetime (7 days).
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 604_800;
/// Upper bound for either token lifetime (10 years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 86_400;
/// Shortest accepted HS256 signing key.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: signing_key_from_env()?,
            access_token_ttl_secs: ttl_from_env(
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TOKEN_TTL_SECS,
            )?,
            refresh_token_ttl_secs: ttl_from_env(
                "REFRESH_TOKEN_TTL_SECS",
                DEFAULT_REFRESH_TOKEN_TTL_SECS,
            )?,
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        }
    }
}

fn signing_key_from_env() -> Result<Vec<u8>, ConfigError> {
    let key = env::var("JWT_SIGNING_KEY").map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?;
    if key.trim().len() < MIN_SIGNING_KEY_BYTES {
        return Err(ConfigError::Invalid("JWT_SIGNING_KEY"));
    }
    Ok(key.into_bytes())
}

fn ttl_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
            .ok_or(ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
