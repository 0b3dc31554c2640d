use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::content::models::ContentStatus;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;

/// Request DTO for creating a content item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Free-form category label such as blog, video or podcast
    #[validate(length(min = 1, max = 50, message = "Content type must be 1-50 characters"))]
    pub content_type: String,

    /// Defaults to `draft`
    pub status: Option<ContentStatus>,

    pub scheduled_date: Option<DateTime<Utc>>,

    pub published_date: Option<DateTime<Utc>>,

    /// Owner of the item; must reference an existing user
    pub user_id: i64,
}

/// Request DTO for updating a content item
///
/// Omitted fields are left unchanged. For the two dates, an explicit `null`
/// clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Content type must be 1-50 characters"))]
    pub content_type: Option<String>,

    pub status: Option<ContentStatus>,

    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub published_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateContentDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.content_type.is_none()
            && self.status.is_none()
            && self.scheduled_date.is_none()
            && self.published_date.is_none()
    }
}

/// Request DTO for putting a content item on the calendar
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContentDto {
    pub scheduled_for: DateTime<Utc>,
}

/// Distinguish a present `null` from a missing field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response DTO for content item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponseDto {
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
    pub creator_username: String,
}

/// Query params for listing content items
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by status
    pub status: Option<ContentStatus>,
    /// Filter by owner
    pub user_id: Option<i64>,
    /// Filter by content type
    pub content_type: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ContentQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}
