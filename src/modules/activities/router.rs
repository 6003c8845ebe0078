use axum::{Router, routing::get};

use crate::modules::activities::controller::{
    get_activities_by_entity, get_activities_by_user, get_recent_activities,
};
use crate::state::AppState;

pub fn init_activities_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_recent_activities))
        .route(
            "/entity/{entity_type}/{entity_id}",
            get(get_activities_by_entity),
        )
        .route("/user/{user_id}", get(get_activities_by_user))
}
