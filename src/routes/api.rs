//! Users and items routes. Each collection answers with and without the trailing slash.

use crate::handlers::{create_item_for_user, create_user, list_items, list_users, read_user};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:user_id", get(read_user))
        .route("/users/:user_id/items", post(create_item_for_user))
        .route("/users/:user_id/items/", post(create_item_for_user))
        .route("/items", get(list_items))
        .route("/items/", get(list_items))
        .with_state(state)
}
