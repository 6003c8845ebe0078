use axum::{Json, extract::State};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::{
    COOKIE_USER_ID, COOKIE_USER_NAME, COOKIE_USER_ROLE, CurrentUser, resolve_session,
};
use crate::modules::activities::model::{NewActivity, actions, entities};
use crate::modules::activities::service::ActivityService;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, MeResponse};
use super::service::AuthService;

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body shape shared by every endpoint.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn session_cookie(
    name: &'static str,
    value: String,
    state: &AppState,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.session_config.ttl_secs))
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

fn issue_session(jar: SignedCookieJar, user: &User, state: &AppState) -> SignedCookieJar {
    jar.add(session_cookie(COOKIE_USER_ID, user.id.to_string(), state))
        .add(session_cookie(
            COOKIE_USER_ROLE,
            user.role.to_string(),
            state,
        ))
        .add(session_cookie(COOKIE_USER_NAME, user.name.clone(), state))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<(SignedCookieJar, Json<LoginResponse>), AppError> {
    let user = AuthService::authenticate(&state.db, &payload.email, &payload.password).await?;

    let jar = issue_session(jar, &user, &state);

    ActivityService::record_best_effort(
        &state.db,
        NewActivity {
            action: actions::LOGIN,
            entity_type: entities::USER,
            entity_id: user.id,
            details: None,
            performed_by: user.id,
        },
    )
    .await;

    Ok((jar, Json(LoginResponse { user })))
}

/// Log out
///
/// Deletes the session cookies. Tolerant of an already-expired session: the
/// cookies are cleared either way, and the audit entry is written only when
/// the claims still resolved.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<MessageResponse>) {
    let session = resolve_session(&jar);

    let jar = jar
        .remove(removal_cookie(COOKIE_USER_ID))
        .remove(removal_cookie(COOKIE_USER_ROLE))
        .remove(removal_cookie(COOKIE_USER_NAME));

    if let Some(user) = session {
        ActivityService::record_best_effort(
            &state.db,
            NewActivity {
                action: actions::LOGOUT,
                entity_type: entities::USER,
                entity_id: user.id,
                details: None,
                performed_by: user.id,
            },
        )
        .await;
    }

    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Who am I, according to my session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Session claims", body = MeResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip_all)]
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: current_user.id,
        name: current_user.name,
        role: current_user.role,
    })
}
