use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::users::dtos::UserResponseDto;

/// Database model for user
///
/// `hashed_password` is write-only and never selected.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}
