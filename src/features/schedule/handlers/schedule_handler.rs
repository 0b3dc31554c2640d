use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::content::dtos::ContentResponseDto;
use crate::features::content::ContentService;
use crate::features::schedule::dtos::ScheduleRangeQuery;
use crate::shared::types::{ApiResponse, Meta};

/// List content scheduled within a date range
#[utoipa::path(
    get,
    path = "/api/schedule",
    params(ScheduleRangeQuery),
    responses(
        (status = 200, description = "Scheduled content items, earliest first", body = ApiResponse<Vec<ContentResponseDto>>),
        (status = 400, description = "Missing or inverted range")
    ),
    tag = "schedule"
)]
pub async fn get_schedule(
    State(service): State<Arc<ContentService>>,
    AppQuery(range): AppQuery<ScheduleRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    scheduled_in(&service, range).await
}

/// List content scheduled within a date range (calendar view)
#[utoipa::path(
    get,
    path = "/api/schedule/date-range",
    params(ScheduleRangeQuery),
    responses(
        (status = 200, description = "Scheduled content items, earliest first", body = ApiResponse<Vec<ContentResponseDto>>),
        (status = 400, description = "Missing or inverted range")
    ),
    tag = "schedule"
)]
pub async fn get_schedule_by_date_range(
    State(service): State<Arc<ContentService>>,
    AppQuery(range): AppQuery<ScheduleRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    scheduled_in(&service, range).await
}

async fn scheduled_in(
    service: &ContentService,
    range: ScheduleRangeQuery,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let items = service.list_scheduled(range.start, range.end).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
