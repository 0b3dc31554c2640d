use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::content::dtos::{
    ContentQueryParams, ContentResponseDto, CreateContentDto, ScheduleContentDto,
    UpdateContentDto,
};
use crate::features::content::services::ContentService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a content item
#[utoipa::path(
    post,
    path = "/api/content",
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content item created", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error or unknown user")
    ),
    tag = "content"
)]
pub async fn create_content(
    State(service): State<Arc<ContentService>>,
    AppJson(dto): AppJson<CreateContentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(item), None, None)),
    ))
}

/// List content items
#[utoipa::path(
    get,
    path = "/api/content",
    params(ContentQueryParams),
    responses(
        (status = 200, description = "Page of content items", body = ApiResponse<Vec<ContentResponseDto>>),
    ),
    tag = "content"
)]
pub async fn list_content(
    State(service): State<Arc<ContentService>>,
    AppQuery(params): AppQuery<ContentQueryParams>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get content item by id
#[utoipa::path(
    get,
    path = "/api/content/{id}",
    params(
        ("id" = i64, Path, description = "Content item id")
    ),
    responses(
        (status = 200, description = "Content item found", body = ApiResponse<ContentResponseDto>),
        (status = 404, description = "Content item not found")
    ),
    tag = "content"
)]
pub async fn get_content(
    State(service): State<Arc<ContentService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Update content item
///
/// Only the provided fields change; `updatedAt` always moves forward.
#[utoipa::path(
    put,
    path = "/api/content/{id}",
    params(
        ("id" = i64, Path, description = "Content item id")
    ),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content item updated", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Content item not found")
    ),
    tag = "content"
)]
pub async fn update_content(
    State(service): State<Arc<ContentService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateContentDto>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Schedule a content item
///
/// Sets `scheduledDate` and moves the item to `scheduled`.
#[utoipa::path(
    post,
    path = "/api/content/{id}/schedule",
    params(
        ("id" = i64, Path, description = "Content item id")
    ),
    request_body = ScheduleContentDto,
    responses(
        (status = 200, description = "Content item scheduled", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Content item not found")
    ),
    tag = "content"
)]
pub async fn schedule_content(
    State(service): State<Arc<ContentService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<ScheduleContentDto>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    let item = service.schedule(id, dto.scheduled_for).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Delete content item
#[utoipa::path(
    delete,
    path = "/api/content/{id}",
    params(
        ("id" = i64, Path, description = "Content item id")
    ),
    responses(
        (status = 200, description = "Content item deleted"),
        (status = 404, description = "Content item not found")
    ),
    tag = "content"
)]
pub async fn delete_content(
    State(service): State<Arc<ContentService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Content item {} deleted", id)),
        None,
    )))
}

/// List content items owned by a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/content",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Content items owned by the user", body = ApiResponse<Vec<ContentResponseDto>>),
        (status = 404, description = "User not found")
    ),
    tag = "content"
)]
pub async fn list_user_content(
    State(service): State<Arc<ContentService>>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let items = service.list_by_user(user_id).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
