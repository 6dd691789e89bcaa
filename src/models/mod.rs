// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest, TOKEN_TYPE_BEARER};
pub use user::{NewUser, User, UserCreateRequest, UserResponse, DEFAULT_ROLE};
