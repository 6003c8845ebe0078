use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{Activity, ActivityListParams};
use super::service::ActivityService;

const DEFAULT_LIMIT: i64 = 20;

/// Recent activity, newest first
#[utoipa::path(
    get,
    path = "/api/activities",
    params(("limit" = Option<i64>, Query, description = "Maximum rows to return")),
    responses(
        (status = 200, description = "Recent activity entries", body = Vec<Activity>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip_all)]
pub async fn get_recent_activities(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<ActivityListParams>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 500);
    let activities = ActivityService::recent(&state.db, limit).await?;
    Ok(Json(activities))
}

/// Activity for one entity
#[utoipa::path(
    get,
    path = "/api/activities/entity/{entity_type}/{entity_id}",
    params(
        ("entity_type" = String, Path, description = "Entity type, e.g. user or resource"),
        ("entity_id" = Uuid, Path, description = "Entity id")
    ),
    responses(
        (status = 200, description = "Activity entries for the entity", body = Vec<Activity>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip_all)]
pub async fn get_activities_by_entity(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((entity_type, entity_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = ActivityService::by_entity(&state.db, &entity_type, entity_id).await?;
    Ok(Json(activities))
}

/// Activity performed by one user
#[utoipa::path(
    get,
    path = "/api/activities/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Actor user id"),
        ("limit" = Option<i64>, Query, description = "Maximum rows to return")
    ),
    responses(
        (status = 200, description = "Activity entries by the user", body = Vec<Activity>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip_all)]
pub async fn get_activities_by_user(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ActivityListParams>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let limit = params.limit.unwrap_or(100).clamp(1, 500);
    let activities = ActivityService::by_actor(&state.db, user_id, limit).await?;
    Ok(Json(activities))
}
