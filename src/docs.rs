use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::activities::model::Activity;
use crate::modules::auth::controller::{ErrorResponse, MessageResponse};
use crate::modules::auth::model::{LoginRequest, LoginResponse, MeResponse};
use crate::modules::resources::model::{
    CreateResourceDto, Resource, ResourceStatsResponse, ResourceStatus, ResourceWithUser,
    TypeCount, UpdateResourceDto,
};
use crate::modules::users::model::{
    CreateUserDto, RoleCounts, UpdateUserDto, User, UserRole, UserStatsResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::search_users,
        crate::modules::users::controller::get_user_stats,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::resources::controller::get_resources,
        crate::modules::resources::controller::get_resource,
        crate::modules::resources::controller::get_resources_by_user,
        crate::modules::resources::controller::search_resources,
        crate::modules::resources::controller::get_resource_stats,
        crate::modules::resources::controller::create_resource,
        crate::modules::resources::controller::update_resource,
        crate::modules::resources::controller::delete_resource,
        crate::modules::activities::controller::get_recent_activities,
        crate::modules::activities::controller::get_activities_by_entity,
        crate::modules::activities::controller::get_activities_by_user,
    ),
    components(
        schemas(
            User,
            UserRole,
            CreateUserDto,
            UpdateUserDto,
            RoleCounts,
            UserStatsResponse,
            Resource,
            ResourceWithUser,
            ResourceStatus,
            CreateResourceDto,
            UpdateResourceDto,
            TypeCount,
            ResourceStatsResponse,
            Activity,
            LoginRequest,
            LoginResponse,
            MeResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session management endpoints"),
        (name = "Users", description = "Personnel registry endpoints"),
        (name = "Resources", description = "Asset registry endpoints"),
        (name = "Activities", description = "Audit trail endpoints")
    ),
    info(
        title = "AssetDesk API",
        version = "0.1.0",
        description = "IT asset and personnel registry with role-based access control, \
                       signed-cookie sessions and an append-only audit trail.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("user_id"))),
            )
        }
    }
}
