use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::content::handlers;
use crate::features::content::services::ContentService;

pub fn routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route(
            "/api/content",
            get(handlers::list_content).post(handlers::create_content),
        )
        .route(
            "/api/content/{id}",
            get(handlers::get_content)
                .put(handlers::update_content)
                .delete(handlers::delete_content),
        )
        .route("/api/content/{id}/schedule", post(handlers::schedule_content))
        .route("/api/users/{id}/content", get(handlers::list_user_content))
        .with_state(service)
}
