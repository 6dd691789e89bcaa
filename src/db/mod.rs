// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Services depend on the [`UserRepository`] trait; [`MemoryUserStore`]
//! is the in-process implementation used by the server and tests.

pub mod memory;

pub use memory::MemoryUserStore;

use std::future::Future;

use crate::error::AppError;
use crate::models::{NewUser, User};

/// User persistence operations.
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning its ID and timestamps.
    ///
    /// Fails with `AppError::Conflict` if the username or email is taken.
    fn save(&self, user: NewUser) -> impl Future<Output = Result<User, AppError>> + Send;

    fn find_by_id(&self, id: u64) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// All users, ordered by ID.
    fn find_all(&self) -> impl Future<Output = Result<Vec<User>, AppError>> + Send;

    /// Replace a stored user. `created_at` is preserved and `updated_at`
    /// is refreshed.
    fn update(&self, user: User) -> impl Future<Output = Result<User, AppError>> + Send;

    /// Delete a user. Deleting an unknown ID is not an error.
    fn delete_by_id(&self, id: u64) -> impl Future<Output = Result<(), AppError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;
}
