use crate::error::AppError;
use crate::extractors::DbSession;
use crate::response::ok;
use crate::schemas::{Item, Pagination};
use crate::service::crud;
use axum::{extract::Query, response::IntoResponse};

/// GET /items/ — one page of items across all owners.
#[utoipa::path(
    get,
    path = "/items/",
    tag = "items",
    params(Pagination),
    responses((status = 200, description = "Page of items", body = Vec<Item>))
)]
pub async fn list_items(
    mut session: DbSession,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let rows = crud::list_items(&mut session, page.skip, page.limit).await?;
    let items: Vec<Item> = rows.into_iter().map(Item::from).collect();
    Ok(ok(items))
}
