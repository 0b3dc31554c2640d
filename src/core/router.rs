use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::database::Database;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::content::{routes as content_routes, ContentService};
use crate::features::schedule::routes as schedule_routes;
use crate::features::users::{routes as users_routes, UserService};
use crate::shared::constants::WELCOME_MESSAGE;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse),
    ),
    tag = "root"
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble the application router.
///
/// Authentication routes are not mounted; feature groups are merged
/// independently so any of them can be left out.
pub fn build_router(config: &Config, db: &Database) -> Router {
    let user_service = Arc::new(UserService::new(db.clone()));
    let content_service = Arc::new(ContentService::new(db.clone()));

    let swagger_modifier = SwaggerInfoModifier {
        title: config.app.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let api_routes = Router::new()
        .merge(users_routes::routes(user_service))
        .merge(content_routes::routes(Arc::clone(&content_service)))
        .merge(schedule_routes::routes(content_service));

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .merge(swagger)
        .merge(api_routes)
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
