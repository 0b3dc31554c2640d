use chrono::{DateTime, Utc};
use sqlx::error::ErrorKind;
use sqlx::{Connection, SqliteConnection};

use crate::core::database::Database;
use crate::core::error::{AppError, Result};
use crate::features::content::dtos::{
    ContentQueryParams, ContentResponseDto, CreateContentDto, UpdateContentDto,
};
use crate::features::content::models::{ContentItem, ContentItemWithCreator, ContentStatus};
use crate::features::users::UserService;

const ITEM_COLUMNS: &str = "c.id AS id, c.title AS title, c.description AS description, \
     c.content_type AS content_type, c.status AS status, c.scheduled_date AS scheduled_date, \
     c.published_date AS published_date, c.created_at AS created_at, \
     c.updated_at AS updated_at, c.user_id AS user_id";

/// Service for content item operations
pub struct ContentService {
    db: Database,
}

impl ContentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn select_with_creator(filter: &str) -> String {
        format!(
            "SELECT {}, u.username AS creator_username \
             FROM content_items c JOIN users u ON u.id = c.user_id {}",
            ITEM_COLUMNS, filter
        )
    }

    async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<ContentItemWithCreator>> {
        sqlx::query_as::<_, ContentItemWithCreator>(&Self::select_with_creator("WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get content item {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    /// Create a content item owned by an existing user
    pub async fn create(&self, dto: CreateContentDto) -> Result<ContentResponseDto> {
        let mut session = self.db.session().await?;

        if UserService::find(&mut session, dto.user_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "User {} does not exist",
                dto.user_id
            )));
        }

        let now = Utc::now();
        let status = dto.status.unwrap_or(ContentStatus::Draft);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO content_items
                (title, description, content_type, status, scheduled_date, published_date,
                 created_at, updated_at, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.content_type)
        .bind(status.as_str())
        .bind(dto.scheduled_date)
        .bind(dto.published_date)
        .bind(now)
        .bind(now)
        .bind(dto.user_id)
        .fetch_one(&mut *session)
        .await
        .map_err(|e| match AppError::constraint_kind(&e) {
            Some(ErrorKind::ForeignKeyViolation) => {
                AppError::Validation(format!("User {} does not exist", dto.user_id))
            }
            _ => {
                tracing::error!("Failed to create content item: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(
            "Content item created: id={}, user_id={}, status={}",
            id,
            dto.user_id,
            status
        );

        Self::find(&mut session, id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Content item {} not found", id)))
    }

    /// Get content item by id
    pub async fn get(&self, id: i64) -> Result<ContentResponseDto> {
        let mut session = self.db.session().await?;

        Self::find(&mut session, id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Content item {} not found", id)))
    }

    /// List content items, newest first, returning the page and the total count
    pub async fn list(&self, params: &ContentQueryParams) -> Result<(Vec<ContentResponseDto>, i64)> {
        let mut session = self.db.session().await?;
        let pagination = params.pagination();
        let status = params.status.map(|s| s.as_str());
        let filter = "WHERE (?1 IS NULL OR c.status = ?1) \
                      AND (?2 IS NULL OR c.user_id = ?2) \
                      AND (?3 IS NULL OR c.content_type = ?3)";

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM content_items c {}",
            filter
        ))
        .bind(status)
        .bind(params.user_id)
        .bind(params.content_type.as_deref())
        .fetch_one(&mut *session)
        .await?;

        let items = sqlx::query_as::<_, ContentItemWithCreator>(&Self::select_with_creator(
            &format!(
                "{} ORDER BY c.created_at DESC, c.id DESC LIMIT ?4 OFFSET ?5",
                filter
            ),
        ))
        .bind(status)
        .bind(params.user_id)
        .bind(params.content_type.as_deref())
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&mut *session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list content items: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((items.into_iter().map(|c| c.into()).collect(), total))
    }

    /// List every item owned by a user, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<ContentResponseDto>> {
        let mut session = self.db.session().await?;

        if UserService::find(&mut session, user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        let items = sqlx::query_as::<_, ContentItemWithCreator>(&Self::select_with_creator(
            "WHERE c.user_id = ? ORDER BY c.created_at DESC, c.id DESC",
        ))
        .bind(user_id)
        .fetch_all(&mut *session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list content for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        Ok(items.into_iter().map(|c| c.into()).collect())
    }

    /// List items scheduled inside `[start, end)`, earliest first
    pub async fn list_scheduled(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ContentResponseDto>> {
        if end <= start {
            return Err(AppError::BadRequest(
                "end must be later than start".to_string(),
            ));
        }

        let mut session = self.db.session().await?;

        let items = sqlx::query_as::<_, ContentItemWithCreator>(&Self::select_with_creator(
            "WHERE c.scheduled_date IS NOT NULL \
             AND c.scheduled_date >= ? AND c.scheduled_date < ? \
             ORDER BY c.scheduled_date, c.id",
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&mut *session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list scheduled content: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(items.into_iter().map(|c| c.into()).collect())
    }

    /// Apply a partial update and advance `updated_at`
    pub async fn update(&self, id: i64, dto: UpdateContentDto) -> Result<ContentResponseDto> {
        if dto.is_empty() {
            return Err(AppError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }

        let mut session = self.db.session().await?;
        // Take the write lock before reading so concurrent writers queue on busy_timeout
        let mut tx = session.begin_with("BEGIN IMMEDIATE").await?;

        let current = sqlx::query_as::<_, ContentItem>(&format!(
            "SELECT {} FROM content_items c WHERE c.id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content item {} not found", id)))?;

        let updated_at = current.next_updated_at(Utc::now());
        let status = dto
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or(current.status);

        sqlx::query(
            r#"
            UPDATE content_items
            SET title = ?, description = ?, content_type = ?, status = ?,
                scheduled_date = ?, published_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(dto.title.unwrap_or(current.title))
        .bind(dto.description.unwrap_or(current.description))
        .bind(dto.content_type.unwrap_or(current.content_type))
        .bind(status)
        .bind(dto.scheduled_date.unwrap_or(current.scheduled_date))
        .bind(dto.published_date.unwrap_or(current.published_date))
        .bind(updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update content item {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tx.commit().await?;
        tracing::info!("Content item updated: id={}", id);

        Self::find(&mut session, id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Content item {} not found", id)))
    }

    /// Put an item on the calendar: sets `scheduled_date` and moves it to `scheduled`
    pub async fn schedule(
        &self,
        id: i64,
        scheduled_for: DateTime<Utc>,
    ) -> Result<ContentResponseDto> {
        let item = self
            .update(
                id,
                UpdateContentDto {
                    status: Some(ContentStatus::Scheduled),
                    scheduled_date: Some(Some(scheduled_for)),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!("Content item {} scheduled for {}", id, scheduled_for);
        Ok(item)
    }

    /// Delete content item by id
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut session = self.db.session().await?;

        let result = sqlx::query("DELETE FROM content_items WHERE id = ?")
            .bind(id)
            .execute(&mut *session)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Content item {} not found",
                id
            )));
        }

        tracing::info!("Content item deleted: id={}", id);
        Ok(())
    }
}
