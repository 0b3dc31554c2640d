use utoipa::{Modify, OpenApi};

use crate::core::router;
use crate::features::content::{dtos as content_dtos, handlers as content_handlers, models as content_models};
use crate::features::schedule::handlers as schedule_handlers;
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        router::welcome,
        // Users
        users_handlers::create_user,
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::delete_user,
        // Content
        content_handlers::create_content,
        content_handlers::list_content,
        content_handlers::get_content,
        content_handlers::update_content,
        content_handlers::schedule_content,
        content_handlers::delete_content,
        content_handlers::list_user_content,
        // Schedule
        schedule_handlers::get_schedule,
        schedule_handlers::get_schedule_by_date_range,
    ),
    components(
        schemas(
            Meta,
            router::WelcomeResponse,
            users_dtos::CreateUserDto,
            users_dtos::UserResponseDto,
            content_models::ContentStatus,
            content_dtos::CreateContentDto,
            content_dtos::UpdateContentDto,
            content_dtos::ScheduleContentDto,
            content_dtos::ContentResponseDto,
        )
    ),
    tags(
        (name = "root", description = "Service banner"),
        (name = "users", description = "Users owning content"),
        (name = "content", description = "Content items on the calendar"),
        (name = "schedule", description = "Calendar view of scheduled content"),
    )
)]
pub struct ApiDoc;

pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
