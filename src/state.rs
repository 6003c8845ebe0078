use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::session::SessionConfig;

/// Shared application state, constructed once at process start and passed
/// explicitly into every handler. The pool is the only storage handle; there
/// is no module-level singleton.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        session_config: SessionConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}

// SignedCookieJar pulls its signing key out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.session_config.key.clone()
    }
}
