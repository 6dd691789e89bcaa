// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::time_utils::format_utc_rfc3339;
use crate::validation::not_blank;

/// Role assigned to users created through the API.
pub const DEFAULT_ROLE: &str = "USER";

/// Stored user record.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned ID
    pub id: u64,
    /// Login name (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Argon2id PHC hash; never leaves the service layer
    pub password_hash: String,
    /// Display name
    pub name: String,
    pub phone: Option<String>,
    /// Single role label (e.g. "USER", "ADMIN")
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a user that has not been saved yet. The store assigns
/// the ID and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub enabled: bool,
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(
        custom(function = "not_blank", message = "username is required"),
        length(min = 3, max = 20, message = "username must be 3-20 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "not_blank", message = "email is required"),
        email(message = "email must be a valid address")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "password is required"),
        length(min = 8, max = 20, message = "password must be 8-20 characters")
    )]
    pub password: String,

    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(max = 50, message = "name must be at most 50 characters")
    )]
    pub name: String,

    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    #[serde(default)]
    pub phone: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            enabled: user.enabled,
            created_at: format_utc_rfc3339(user.created_at),
            updated_at: format_utc_rfc3339(user.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> UserCreateRequest {
        UserCreateRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: "Kim Minjun".to_string(),
            phone: Some("010-1234-5678".to_string()),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(request("user123", "user@example.com", "password123")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_fields() {
        let errors = request("ab", "not-an-email", "short")
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_create_request_rejects_blank_name_and_long_phone() {
        let mut req = request("user123", "user@example.com", "password123");
        req.name = "   ".to_string();
        req.phone = Some("0".repeat(21));

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn test_response_hides_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Alice".to_string(),
            phone: None,
            role: DEFAULT_ROLE.to_string(),
            enabled: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();

        assert!(!json.contains("argon2"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
