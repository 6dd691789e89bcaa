// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Car Center API: authentication and user management for the car-service
//! reservation platform.
//!
//! This crate provides the REST backend: login/refresh/logout session
//! issuance with signed JWTs, and user registration and lookup.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod validation;

use config::Config;
use db::MemoryUserStore;
use services::{AuthService, TokenService, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryUserStore,
    pub auth_service: AuthService<MemoryUserStore>,
    pub user_service: UserService<MemoryUserStore>,
}

impl AppState {
    /// Wire up services around a user store.
    pub fn new(config: Config, db: MemoryUserStore) -> Self {
        let tokens = TokenService::from_config(&config);
        Self {
            auth_service: AuthService::new(db.clone(), tokens),
            user_service: UserService::new(db.clone()),
            config,
            db,
        }
    }
}
