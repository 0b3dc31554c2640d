use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::USERNAME_REGEX;

/// Request DTO for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must start with a letter or underscore and contain only letters, digits and underscores"
        )
    )]
    pub username: String,

    /// Password hash produced by the caller; stored as given
    #[validate(length(min = 1, max = 255, message = "Hashed password must be 1-255 characters"))]
    pub hashed_password: String,

    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Response DTO for user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: &str, username: &str) -> CreateUserDto {
        CreateUserDto {
            email: email.to_string(),
            username: username.to_string(),
            hashed_password: "$argon2id$v=19$stub".to_string(),
            is_active: None,
        }
    }

    #[test]
    fn test_create_user_dto_valid() {
        assert!(dto("ana@example.com", "ana_writer").validate().is_ok());
    }

    #[test]
    fn test_create_user_dto_rejects_bad_email_and_username() {
        let errors = dto("not-an-email", "9lives").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
    }

    #[test]
    fn test_create_user_dto_rejects_empty_password() {
        let mut d = dto("ana@example.com", "ana_writer");
        d.hashed_password = String::new();
        assert!(d.validate().is_err());
    }
}
