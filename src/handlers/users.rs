//! User handlers: create, read, list, and create an item owned by a user.

use crate::error::AppError;
use crate::extractors::DbSession;
use crate::response::{created, ok};
use crate::schemas::{Item, ItemCreate, Pagination, User, UserCreate};
use crate::service::{crud, RequestValidator};
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Json,
};

/// POST /users/ — register a user. The email pre-check gives a friendly 400; a
/// concurrent duplicate that gets past it is still rejected by the unique index.
#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email already registered"),
        (status = 409, description = "Storage rejected the insert"),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn create_user(
    mut session: DbSession,
    Json(body): Json<UserCreate>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_user(&body)?;
    let body = UserCreate {
        email: body.email.trim().to_string(),
        password: body.password,
    };
    if crud::get_user_by_email(&mut session, &body.email).await?.is_some() {
        tracing::warn!(email = %body.email, "duplicate registration rejected");
        return Err(AppError::BadRequest("Email already registered".into()));
    }
    let row = crud::create_user(&mut session, &body).await?;
    Ok(created(User::from_row(row, Vec::new())))
}

/// GET /users/ — one page of users, each with the items it owns.
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    params(Pagination),
    responses((status = 200, description = "Page of users", body = Vec<User>))
)]
pub async fn list_users(
    mut session: DbSession,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let rows = crud::list_users(&mut session, page.skip, page.limit).await?;
    let ids: Vec<i64> = rows.iter().map(|u| u.id).collect();
    let mut owned = crud::list_items_for_owners(&mut session, &ids).await?;
    let users: Vec<User> = rows
        .into_iter()
        .map(|row| {
            let items = owned.remove(&row.id).unwrap_or_default();
            User::from_row(row, items)
        })
        .collect();
    Ok(ok(users))
}

/// GET /users/:user_id
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn read_user(
    mut session: DbSession,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = crud::get_user(&mut session, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let items = crud::list_items_for_owner(&mut session, row.id).await?;
    Ok(ok(User::from_row(row, items)))
}

/// POST /users/:user_id/items/
#[utoipa::path(
    post,
    path = "/users/{user_id}/items/",
    tag = "items",
    params(("user_id" = i64, Path, description = "Owner id")),
    request_body = ItemCreate,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn create_item_for_user(
    mut session: DbSession,
    Path(user_id): Path<i64>,
    Json(body): Json<ItemCreate>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_item(&body)?;
    if crud::get_user(&mut session, user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }
    let row = crud::create_item(&mut session, &body, user_id).await?;
    Ok(created(Item::from(row)))
}
