// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User management.

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{NewUser, UserCreateRequest, UserResponse, DEFAULT_ROLE};
use crate::services::credentials::hash_password;

#[derive(Clone)]
pub struct UserService<U> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Register a new enabled user with the default role.
    ///
    /// The request must already have passed validation.
    pub async fn create_user(&self, request: UserCreateRequest) -> Result<UserResponse> {
        // Fail fast before paying for the password hash; the store re-checks on save.
        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let user = self
            .users
            .save(NewUser {
                username: request.username,
                email: request.email,
                password_hash: hash_password(&request.password)?,
                name: request.name,
                phone: request.phone.filter(|p| !p.trim().is_empty()),
                role: DEFAULT_ROLE.to_string(),
                enabled: true,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(UserResponse::from(&user))
    }

    pub async fn get_user(&self, id: u64) -> Result<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .map(|user| UserResponse::from(&user))
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get_users(&self) -> Result<Vec<UserResponse>> {
        Ok(self
            .users
            .find_all()
            .await?
            .iter()
            .map(UserResponse::from)
            .collect())
    }
}
