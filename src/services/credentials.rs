// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Username/password verification against stored Argon2id hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;

use crate::db::UserRepository;
use crate::error::{AppError, Result};

/// Identity confirmed by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub role: String,
}

/// Checks username/password pairs against the user store.
#[derive(Clone)]
pub struct CredentialVerifier<U> {
    users: U,
}

impl<U: UserRepository> CredentialVerifier<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Authenticate a username/password pair.
    ///
    /// Unknown user, disabled account, wrong password and an unreadable
    /// stored hash all fail with the same `AppError::Unauthorized`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity> {
        let Some(user) = self.users.find_by_username(username).await? else {
            // Match the cost of a real verification.
            let _ = verify_password(password, dummy_hash());
            tracing::debug!(username, "Login rejected: unknown user");
            return Err(AppError::Unauthorized);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(username, "Login rejected: password mismatch");
                return Err(AppError::Unauthorized);
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "Stored password hash is unreadable");
                return Err(AppError::Unauthorized);
            }
        }

        if !user.enabled {
            tracing::debug!(username, "Login rejected: account disabled");
            return Err(AppError::Unauthorized);
        }

        Ok(AuthenticatedIdentity {
            username: user.username,
            role: user.role,
        })
    }
}

/// Hash a password with Argon2id and a random salt (PHC string format).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, and an error if
/// the stored hash cannot be parsed or verified.
pub fn verify_password(
    password: &str,
    hash: &str,
) -> std::result::Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("timing-equalizer").unwrap_or_default())
}
