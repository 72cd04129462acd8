//! Storage-facing rows for the `users` and `items` tables.

use sqlx::FromRow;

/// One `users` row. Carries the password hash, so it never leaves the crate as a response.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
}

/// One `items` row. `owner_id` always points at an existing `users.id`.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}
