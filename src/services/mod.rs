// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod credentials;
pub mod token;
pub mod users;

pub use auth::AuthService;
pub use credentials::{AuthenticatedIdentity, CredentialVerifier};
pub use token::{Claims, TokenError, TokenKind, TokenService};
pub use users::UserService;
