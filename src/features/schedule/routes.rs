use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::content::ContentService;
use crate::features::schedule::handlers;

pub fn routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route("/api/schedule", get(handlers::get_schedule))
        .route("/api/schedule/date-range", get(handlers::get_schedule_by_date_range))
        .with_state(service)
}
