use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::SqliteConnection;

use crate::core::database::Database;
use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::shared::types::PaginationQuery;

const USER_COLUMNS: &str = "id, email, username, is_active, created_at";

/// Service for user operations
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Look up a user on an already acquired connection.
    pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    /// Create a user; email and username must both be unused
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let mut session = self.db.session().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, username, hashed_password, is_active, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&dto.email)
        .bind(&dto.username)
        .bind(&dto.hashed_password)
        .bind(dto.is_active.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(&mut *session)
        .await
        .map_err(|e| Self::map_insert_error(e, &dto))?;

        tracing::info!("User created: id={}, username={}", user.id, user.username);

        Ok(user.into())
    }

    /// Get user by id
    pub async fn get(&self, id: i64) -> Result<UserResponseDto> {
        let mut session = self.db.session().await?;

        Self::find(&mut session, id)
            .await?
            .map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// List users ordered by id, returning the page and the total count
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let mut session = self.db.session().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *session)
            .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&mut *session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    /// Delete a user. Users that still own content items are kept.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut session = self.db.session().await?;

        if Self::find(&mut session, id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        let owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items WHERE user_id = ?")
            .bind(id)
            .fetch_one(&mut *session)
            .await?;
        if owned > 0 {
            return Err(AppError::Conflict(format!(
                "User {} still owns {} content item(s)",
                id, owned
            )));
        }

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *session)
            .await
            .map_err(|e| match AppError::constraint_kind(&e) {
                Some(ErrorKind::ForeignKeyViolation) => {
                    AppError::Conflict(format!("User {} still owns content items", id))
                }
                _ => AppError::Database(e),
            })?;

        tracing::info!("User deleted: id={}", id);
        Ok(())
    }

    fn map_insert_error(e: sqlx::Error, dto: &CreateUserDto) -> AppError {
        if AppError::constraint_kind(&e) == Some(ErrorKind::UniqueViolation) {
            let message = e
                .as_database_error()
                .map(|d| d.message().to_string())
                .unwrap_or_default();
            return if message.contains("users.username") {
                AppError::Conflict(format!("Username '{}' is already taken", dto.username))
            } else {
                AppError::Conflict(format!("Email '{}' is already registered", dto.email))
            };
        }

        tracing::error!("Failed to create user: {:?}", e);
        AppError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_test_user, test_database};

    fn dto(email: &str, username: &str) -> CreateUserDto {
        CreateUserDto {
            email: email.to_string(),
            username: username.to_string(),
            hashed_password: "hash".to_string(),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_defaults() {
        let service = UserService::new(test_database().await);

        let user = service
            .create(dto("ana@example.com", "ana"))
            .await
            .unwrap();

        assert!(user.id > 0);
        assert!(user.is_active);
        assert_eq!(service.get(user.id).await.unwrap().email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_password_hash_is_stored_but_not_returned() {
        let db = test_database().await;
        let service = UserService::new(db.clone());

        let user = service
            .create(dto("bo@example.com", "bo_writer"))
            .await
            .unwrap();

        let mut session = db.session().await.unwrap();
        let stored: String = sqlx::query_scalar("SELECT hashed_password FROM users WHERE id = ?")
            .bind(user.id)
            .fetch_one(&mut *session)
            .await
            .unwrap();
        assert_eq!(stored, "hash");

        let body = serde_json::to_value(&user).unwrap();
        assert!(body.get("hashedPassword").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let service = UserService::new(test_database().await);
        service.create(dto("ana@example.com", "ana")).await.unwrap();

        let err = service
            .create(dto("ana@example.com", "someone_else"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("Email")));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = UserService::new(test_database().await);
        service.create(dto("ana@example.com", "ana")).await.unwrap();

        let err = service
            .create(dto("other@example.com", "ana"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("Username")));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = UserService::new(test_database().await);
        assert!(matches!(
            service.get(42).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let db = test_database().await;
        for _ in 0..3 {
            create_test_user(&db).await;
        }
        let service = UserService::new(db);

        let (page, total) = service
            .list(&PaginationQuery {
                page: 2,
                page_size: 2,
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_restricted_while_content_exists() {
        let db = test_database().await;
        let user = create_test_user(&db).await;
        {
            let mut session = db.session().await.unwrap();
            sqlx::query(
                "INSERT INTO content_items (title, content_type, user_id) VALUES ('Draft', 'blog', ?)",
            )
            .bind(user.id)
            .execute(&mut *session)
            .await
            .unwrap();
        }
        let service = UserService::new(db.clone());

        assert!(matches!(
            service.delete(user.id).await,
            Err(AppError::Conflict(_))
        ));

        {
            let mut session = db.session().await.unwrap();
            sqlx::query("DELETE FROM content_items WHERE user_id = ?")
                .bind(user.id)
                .execute(&mut *session)
                .await
                .unwrap();
        }
        service.delete(user.id).await.unwrap();
        assert!(matches!(
            service.get(user.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
