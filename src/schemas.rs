//! API-facing shapes: request bodies and response records.

use crate::models::{ItemRow, UserRow};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
        }
    }
}

#[derive(Clone, Deserialize, ToSchema)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

// Manual impl keeps the plaintext password out of logs.
impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A user as returned by the API. The password hash is never part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl User {
    /// Build the response shape from a stored row and the items it owns.
    pub fn from_row(row: UserRow, items: Vec<ItemRow>) -> Self {
        User {
            id: row.id,
            email: row.email,
            is_active: row.is_active,
            items: items.into_iter().map(Item::from).collect(),
        }
    }
}

pub const DEFAULT_SKIP: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 100;

/// `?skip=&limit=` query parameters shared by the list routes.
#[derive(Clone, Copy, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Rows to skip from the start of the table.
    #[serde(default = "default_skip")]
    pub skip: u32,
    /// Maximum rows to return, capped at 1000.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_skip() -> u32 {
    DEFAULT_SKIP
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
