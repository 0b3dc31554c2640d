use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::content::dtos::ContentResponseDto;

/// Workflow states accepted by the API.
///
/// The column itself is plain TEXT, so rows written by other tools may hold
/// values outside this set; responses pass them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for content item
#[derive(Debug, Clone, FromRow)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub status: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub published_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
}

impl ContentItem {
    /// Timestamp to record for a mutation happening at `now`.
    ///
    /// Never earlier than one microsecond past the current `updated_at`, so two
    /// updates inside the same clock tick (or after a clock step back) still
    /// order correctly.
    pub fn next_updated_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.updated_at + Duration::microseconds(1))
    }
}

/// Content item joined with its creator
#[derive(Debug, Clone, FromRow)]
pub struct ContentItemWithCreator {
    #[sqlx(flatten)]
    pub item: ContentItem,
    pub creator_username: String,
}

impl From<ContentItemWithCreator> for ContentResponseDto {
    fn from(row: ContentItemWithCreator) -> Self {
        let c = row.item;
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            content_type: c.content_type,
            status: c.status,
            scheduled_date: c.scheduled_date,
            published_date: c.published_date,
            created_at: c.created_at,
            updated_at: c.updated_at,
            user_id: c.user_id,
            creator_username: row.creator_username,
        }
    }
}
