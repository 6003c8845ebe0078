use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::modules::users::controller::{
    create_user, delete_user, get_user, get_user_stats, get_users, search_users, update_user,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/", post(create_user))
        .route("/search", get(search_users))
        .route("/stats", get(get_user_stats))
        .route("/{id}", get(get_user))
        .route("/{id}", put(update_user))
        .route("/{id}", delete(delete_user))
}
