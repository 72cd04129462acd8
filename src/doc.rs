//! OpenAPI document for the users/items API, served at `GET /openapi.json`.

use crate::schemas::{Item, ItemCreate, User, UserCreate};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Items API",
        description = "Users and the items they own, stored in SQLite."
    ),
    paths(
        crate::handlers::users::create_user,
        crate::handlers::users::list_users,
        crate::handlers::users::read_user,
        crate::handlers::users::create_item_for_user,
        crate::handlers::items::list_items,
    ),
    components(schemas(User, UserCreate, Item, ItemCreate)),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "items", description = "Items owned by users")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
