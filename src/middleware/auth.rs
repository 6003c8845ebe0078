//! Session resolution.
//!
//! Identity travels as three signed cookies: `user_id`, `user_role` and
//! `user_name`. The [`CurrentUser`] extractor verifies the signatures and
//! parses the claims; any missing or malformed claim means the request is
//! unauthenticated — partial claim loss is treated as fully logged out.
//!
//! Resolution is read-only: it does not re-verify the password or re-check
//! that the user still exists in storage on every request.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::SignedCookieJar;
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const COOKIE_USER_ID: &str = "user_id";
pub const COOKIE_USER_ROLE: &str = "user_role";
pub const COOKIE_USER_NAME: &str = "user_name";

/// The authenticated actor, resolved from the session cookies.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
    pub name: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = SignedCookieJar::from_request_parts(parts, state)
            .await
            .map_err(|err| match err {})?;

        resolve_session(&jar).ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}

/// Decode the three claims from a verified jar. `None` when any claim is
/// missing or does not parse; the caller treats that as "no user".
pub fn resolve_session(jar: &SignedCookieJar) -> Option<CurrentUser> {
    let id = jar
        .get(COOKIE_USER_ID)
        .and_then(|c| Uuid::parse_str(c.value()).ok())?;
    let role = jar
        .get(COOKIE_USER_ROLE)
        .and_then(|c| c.value().parse::<UserRole>().ok())?;
    let name = jar.get(COOKIE_USER_NAME)?.value().to_string();

    Some(CurrentUser { id, role, name })
}
