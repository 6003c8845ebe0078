use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::check_any_role;
use crate::modules::activities::model::{NewActivity, actions, entities};
use crate::modules::activities::service::ActivityService;
use crate::modules::auth::controller::{ErrorResponse, MessageResponse};
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateResourceDto, Resource, ResourceStatsResponse, ResourceWithUser, SearchParams,
    UpdateResourceDto,
};
use super::service::ResourceService;

/// List all resources
#[utoipa::path(
    get,
    path = "/api/resources",
    responses(
        (status = 200, description = "All resources with assignee", body = Vec<ResourceWithUser>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn get_resources(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<ResourceWithUser>>, AppError> {
    let resources = ResourceService::list(&state.db).await?;
    Ok(Json(resources))
}

/// Fetch a single resource
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "The resource", body = ResourceWithUser),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn get_resource(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResourceWithUser>, AppError> {
    let resource = ResourceService::get(&state.db, id).await?;
    Ok(Json(resource))
}

/// Resources assigned to one user
#[utoipa::path(
    get,
    path = "/api/resources/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Assignee user id")),
    responses(
        (status = 200, description = "Resources assigned to the user", body = Vec<ResourceWithUser>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn get_resources_by_user(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ResourceWithUser>>, AppError> {
    let resources = ResourceService::list_by_user(&state.db, user_id).await?;
    Ok(Json(resources))
}

/// Substring search over identifying fields
#[utoipa::path(
    get,
    path = "/api/resources/search",
    params(("q" = String, Query, description = "Search term")),
    responses(
        (status = 200, description = "Matching resources", body = Vec<ResourceWithUser>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn search_resources(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ResourceWithUser>>, AppError> {
    let resources = ResourceService::search(&state.db, &params.q).await?;
    Ok(Json(resources))
}

/// Inventory counts for the dashboard
#[utoipa::path(
    get,
    path = "/api/resources/stats",
    responses(
        (status = 200, description = "Resource counts", body = ResourceStatsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn get_resource_stats(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<ResourceStatsResponse>, AppError> {
    let stats = ResourceService::stats(&state.db).await?;
    Ok(Json(stats))
}

/// Register a new resource
#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn create_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    check_any_role(&current_user, &[UserRole::Admin, UserRole::PowerUser])?;

    let resource = ResourceService::create(&state.db, dto).await?;

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::CREATED,
            entity_type: entities::RESOURCE,
            entity_id: resource.id,
            details: Some(format!("Created {}", resource.resource_type)),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(resource)))
}

/// Update a resource
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource id")),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Updated resource", body = Resource),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn update_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateResourceDto>,
) -> Result<Json<Resource>, AppError> {
    check_any_role(&current_user, &[UserRole::Admin, UserRole::PowerUser])?;

    let resource = ResourceService::update(&state.db, id, dto).await?;

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::UPDATED,
            entity_type: entities::RESOURCE,
            entity_id: resource.id,
            details: Some(format!("Updated {}", resource.resource_type)),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok(Json(resource))
}

/// Delete a resource (admin only)
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    tag = "Resources"
)]
#[instrument(skip_all)]
pub async fn delete_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    check_any_role(&current_user, &[UserRole::Admin])?;

    let target = ResourceService::get(&state.db, id).await?;
    ResourceService::delete(&state.db, id).await?;

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::DELETED,
            entity_type: entities::RESOURCE,
            entity_id: target.resource.id,
            details: Some(format!(
                "Deleted {} ({})",
                target.resource.resource_type, target.resource.reg_number
            )),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok(Json(MessageResponse {
        message: "Resource deleted successfully".to_string(),
    }))
}
