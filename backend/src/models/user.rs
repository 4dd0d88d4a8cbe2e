// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A staff account of the school office ('users' table).
///
/// Staff manage students, classes, marks and the exam schedule. Admins also
/// review parent feedback.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Login name, unique across staff.
    pub username: String,

    /// Argon2 hash. Never serialized.
    #[serde(skip)]
    pub password: String,

    /// 'user' for office staff, 'admin' for the principal's office.
    pub role: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Registration payload. New accounts always get the 'user' role; admins are
/// seeded from the environment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "office".to_string(),
            password: "$argon2id$hash".to_string(),
            role: "user".to_string(),
            created_at: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "user");
    }

    #[test]
    fn test_short_username_is_rejected() {
        let req = CreateUserRequest {
            username: "yo".to_string(),
            password: "password123".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
