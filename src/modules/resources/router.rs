use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::modules::resources::controller::{
    create_resource, delete_resource, get_resource, get_resource_stats, get_resources,
    get_resources_by_user, search_resources, update_resource,
};
use crate::state::AppState;

pub fn init_resources_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_resources))
        .route("/", post(create_resource))
        .route("/search", get(search_resources))
        .route("/stats", get(get_resource_stats))
        .route("/user/{user_id}", get(get_resources_by_user))
        .route("/{id}", get(get_resource))
        .route("/{id}", put(update_resource))
        .route("/{id}", delete(delete_resource))
}
