use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::{check_any_role, check_can_delete_user, check_can_modify_user};
use crate::modules::activities::model::{NewActivity, actions, entities};
use crate::modules::activities::service::ActivityService;
use crate::modules::auth::controller::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateUserDto, SearchParams, UpdateUserDto, User, UserRole, UserStatsResponse};
use super::service::UserService;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    check_any_role(&current_user, &[UserRole::Admin, UserRole::PowerUser])?;

    let users = UserService::list(&state.db).await?;
    Ok(Json(users))
}

/// Fetch a single user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get(&state.db, id).await?;
    Ok(Json(user))
}

/// Substring search over name, email and designation
#[utoipa::path(
    get,
    path = "/api/users/search",
    params(("q" = String, Query, description = "Search term")),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn search_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<User>>, AppError> {
    check_any_role(&current_user, &[UserRole::Admin, UserRole::PowerUser])?;

    let users = UserService::search(&state.db, &params.q).await?;
    Ok(Json(users))
}

/// Role breakdown for the dashboard
#[utoipa::path(
    get,
    path = "/api/users/stats",
    responses(
        (status = 200, description = "User counts by role", body = UserStatsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user_stats(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<UserStatsResponse>, AppError> {
    let user_counts = UserService::count_by_role(&state.db).await?;
    let total_users = user_counts.admin + user_counts.poweruser + user_counts.user;

    Ok(Json(UserStatsResponse {
        total_users,
        user_counts,
    }))
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    check_any_role(&current_user, &[UserRole::Admin])?;

    let user = UserService::create(&state.db, dto).await?;

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::CREATED,
            entity_type: entities::USER,
            entity_id: user.id,
            details: Some(format!(
                "Created user {} with role {}",
                user.name, user.role
            )),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user.
///
/// A user may always edit their own profile, but unless they are an admin the
/// identity fields (name, email, role, designation) are stripped from the
/// payload first. Editing someone else's account requires outranking them.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let target = UserService::get(&state.db, id).await?;

    let is_self = current_user.id == id;
    if !is_self {
        check_can_modify_user(&current_user, &target.role)?;
    }

    let dto = if current_user.role == UserRole::Admin {
        dto
    } else {
        dto.restricted_to_self_service()
    };

    let user = UserService::update(&state.db, id, dto).await?;

    let details = if is_self {
        "Updated own profile"
    } else {
        "Updated user profile"
    };
    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::UPDATED,
            entity_type: entities::USER,
            entity_id: user.id,
            details: Some(details.to_string()),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Insufficient role or self-deletion", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let target = UserService::get(&state.db, id).await?;

    check_can_delete_user(&current_user, target.id, &target.role)?;

    UserService::delete(&state.db, id).await?;

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::DELETED,
            entity_type: entities::USER,
            entity_id: target.id,
            details: Some(format!("Deleted user {}", target.name)),
            performed_by: current_user.id,
        },
    )
    .await;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
