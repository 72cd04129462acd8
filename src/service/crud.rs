//! Persistence façade over `users` and `items`.
//!
//! Every function borrows a session the caller owns; none of them opens, closes or
//! shares one. Lookups return `Ok(None)` when nothing matches. Storage errors,
//! including UNIQUE and FOREIGN KEY rejections, come back untranslated inside
//! [`AppError::Db`].

use crate::error::AppError;
use crate::models::{ItemRow, UserRow};
use crate::password::hash_password;
use crate::schemas::{ItemCreate, UserCreate};
use sqlx::{Connection, QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;

const USER_COLUMNS: &str = "id, email, hashed_password, is_active";
const ITEM_COLUMNS: &str = "id, title, description, owner_id";

/// Largest page either listing returns, whatever `limit` asks for.
pub const MAX_LIMIT: u32 = 1000;
/// Owner ids bound per `IN (...)` query, kept well below SQLite's variable limit.
const OWNER_BATCH: usize = 500;

pub async fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<Option<UserRow>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    tracing::debug!(sql = %sql, user_id, "query");
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<UserRow>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
    tracing::debug!(sql = %sql, email, "query");
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Users in id order (which is insertion order), skipping `skip` and returning at most
/// `limit` (max [`MAX_LIMIT`]).
pub async fn list_users(conn: &mut SqliteConnection, skip: u32, limit: u32) -> Result<Vec<UserRow>, AppError> {
    let limit = limit.min(MAX_LIMIT);
    let sql = format!("SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?", USER_COLUMNS);
    tracing::debug!(sql = %sql, skip, limit, "query");
    let rows = sqlx::query_as::<_, UserRow>(&sql)
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Insert a user, commit, then re-read the row so the generated id and the
/// defaulted `is_active` come from storage.
pub async fn create_user(conn: &mut SqliteConnection, user: &UserCreate) -> Result<UserRow, AppError> {
    let password = user.password.clone();
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::PasswordHash(format!("hashing task failed: {e}")))??;

    let sql = "INSERT INTO users (email, hashed_password) VALUES (?, ?)";
    tracing::debug!(sql = %sql, email = %user.email, "query");
    let mut tx = conn.begin().await?;
    let id = sqlx::query(sql)
        .bind(&user.email)
        .bind(&hashed_password)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    tx.commit().await?;

    let row = get_user(conn, id).await?.ok_or(sqlx::Error::RowNotFound)?;
    tracing::info!(user_id = row.id, "user created");
    Ok(row)
}

/// Items in id order, same paging contract as [`list_users`].
pub async fn list_items(conn: &mut SqliteConnection, skip: u32, limit: u32) -> Result<Vec<ItemRow>, AppError> {
    let limit = limit.min(MAX_LIMIT);
    let sql = format!("SELECT {} FROM items ORDER BY id LIMIT ? OFFSET ?", ITEM_COLUMNS);
    tracing::debug!(sql = %sql, skip, limit, "query");
    let rows = sqlx::query_as::<_, ItemRow>(&sql)
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Insert an item owned by `owner_id`, commit, and re-read it.
pub async fn create_item(
    conn: &mut SqliteConnection,
    item: &ItemCreate,
    owner_id: i64,
) -> Result<ItemRow, AppError> {
    let sql = "INSERT INTO items (title, description, owner_id) VALUES (?, ?, ?)";
    tracing::debug!(sql = %sql, owner_id, "query");
    let mut tx = conn.begin().await?;
    let id = sqlx::query(sql)
        .bind(&item.title)
        .bind(item.description.as_deref())
        .bind(owner_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    tx.commit().await?;

    let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
    let row = sqlx::query_as::<_, ItemRow>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    tracing::info!(item_id = row.id, owner_id, "item created");
    Ok(row)
}

/// Items owned by one user, in id order. This is the `User.items` relationship.
pub async fn list_items_for_owner(conn: &mut SqliteConnection, owner_id: i64) -> Result<Vec<ItemRow>, AppError> {
    let sql = format!("SELECT {} FROM items WHERE owner_id = ? ORDER BY id", ITEM_COLUMNS);
    tracing::debug!(sql = %sql, owner_id, "query");
    let rows = sqlx::query_as::<_, ItemRow>(&sql)
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Batch form of [`list_items_for_owner`], grouped by owner. Ids are sent in
/// chunks of `OWNER_BATCH` per `IN (...)` query. Owners without items are absent
/// from the map, and each owner's items stay in id order.
pub async fn list_items_for_owners(
    conn: &mut SqliteConnection,
    owner_ids: &[i64],
) -> Result<HashMap<i64, Vec<ItemRow>>, AppError> {
    let mut by_owner: HashMap<i64, Vec<ItemRow>> = HashMap::new();
    for chunk in owner_ids.chunks(OWNER_BATCH) {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM items WHERE owner_id IN (", ITEM_COLUMNS));
        let mut ids = qb.separated(", ");
        for id in chunk {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY id");
        tracing::debug!(sql = %qb.sql(), owners = chunk.len(), "query");
        let rows: Vec<ItemRow> = qb.build_query_as().fetch_all(&mut *conn).await?;
        for row in rows {
            by_owner.entry(row.owner_id).or_default().push(row);
        }
    }
    Ok(by_owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::apply_migrations;
    use crate::password::verify_password;
    use sqlx::ConnectOptions;

    async fn session() -> SqliteConnection {
        let mut conn = crate::store::connect_options("sqlite::memory:")
            .unwrap()
            .connect()
            .await
            .unwrap();
        apply_migrations(&mut conn).await.unwrap();
        conn
    }

    fn new_user(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            password: "s3cret-password".to_string(),
        }
    }

    fn new_item(title: &str) -> ItemCreate {
        ItemCreate {
            title: title.to_string(),
            description: Some(format!("{} description", title)),
        }
    }

    async fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn created_user_is_retrievable_by_id() {
        let mut conn = session().await;
        let created = create_user(&mut conn, &new_user("alice@example.com")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);

        let fetched = get_user(&mut conn, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");
        assert!(fetched.is_active);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn stored_password_is_a_verifiable_hash() {
        let mut conn = session().await;
        let created = create_user(&mut conn, &new_user("bob@example.com")).await.unwrap();
        assert_ne!(created.hashed_password, "s3cret-password");
        assert!(!created.hashed_password.ends_with("notreallyhashed"));
        assert!(verify_password("s3cret-password", &created.hashed_password).unwrap());
    }

    #[tokio::test]
    async fn lookup_by_email_finds_user_or_returns_none() {
        let mut conn = session().await;
        let created = create_user(&mut conn, &new_user("carol@example.com")).await.unwrap();

        let found = get_user_by_email(&mut conn, "carol@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));

        let missing = get_user_by_email(&mut conn, "nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn unknown_user_id_is_none() {
        let mut conn = session().await;
        assert!(get_user(&mut conn, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let mut conn = session().await;
        let first = create_user(&mut conn, &new_user("dup@example.com")).await.unwrap();

        let err = create_user(&mut conn, &new_user("dup@example.com")).await.unwrap_err();
        assert!(err.is_unique_violation(), "unexpected error: {err:?}");

        let still_there = get_user(&mut conn, first.id).await.unwrap().unwrap();
        assert_eq!(still_there, first);
        assert_eq!(count(&mut conn, "users").await, 1);
    }

    #[tokio::test]
    async fn created_item_appears_in_listing_with_owner() {
        let mut conn = session().await;
        let owner = create_user(&mut conn, &new_user("owner@example.com")).await.unwrap();
        let item = create_item(&mut conn, &new_item("Lamp"), owner.id).await.unwrap();
        assert_eq!(item.owner_id, owner.id);
        assert_eq!(item.description.as_deref(), Some("Lamp description"));

        let listed = list_items(&mut conn, 0, 100).await.unwrap();
        assert!(listed.iter().any(|i| i.id == item.id && i.owner_id == owner.id));
    }

    #[tokio::test]
    async fn item_without_description_stores_null() {
        let mut conn = session().await;
        let owner = create_user(&mut conn, &new_user("plain@example.com")).await.unwrap();
        let item = ItemCreate {
            title: "Bare".into(),
            description: None,
        };
        let row = create_item(&mut conn, &item, owner.id).await.unwrap();
        assert_eq!(row.description, None);
    }

    #[tokio::test]
    async fn item_for_unknown_owner_is_rejected_without_a_row() {
        let mut conn = session().await;
        let err = create_item(&mut conn, &new_item("Orphan"), 999).await.unwrap_err();
        assert!(err.is_foreign_key_violation(), "unexpected error: {err:?}");
        assert_eq!(count(&mut conn, "items").await, 0);
    }

    #[tokio::test]
    async fn list_users_pages_in_insertion_order() {
        let mut conn = session().await;
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            create_user(&mut conn, &new_user(email)).await.unwrap();
        }

        let page = list_users(&mut conn, 0, 2).await.unwrap();
        let emails: Vec<&str> = page.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["a@example.com", "b@example.com"]);

        let rest = list_users(&mut conn, 2, 100).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].email, "c@example.com");

        let again = list_users(&mut conn, 0, 2).await.unwrap();
        assert_eq!(again, page);
    }

    #[tokio::test]
    async fn list_items_respects_skip_and_limit() {
        let mut conn = session().await;
        let owner = create_user(&mut conn, &new_user("pager@example.com")).await.unwrap();
        for title in ["one", "two", "three", "four"] {
            create_item(&mut conn, &new_item(title), owner.id).await.unwrap();
        }
        let page = list_items(&mut conn, 1, 2).await.unwrap();
        let titles: Vec<&str> = page.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["two", "three"]);
        assert!(list_items(&mut conn, 10, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn items_are_grouped_by_owner() {
        let mut conn = session().await;
        let a = create_user(&mut conn, &new_user("ga@example.com")).await.unwrap();
        let b = create_user(&mut conn, &new_user("gb@example.com")).await.unwrap();
        let c = create_user(&mut conn, &new_user("gc@example.com")).await.unwrap();
        create_item(&mut conn, &new_item("a1"), a.id).await.unwrap();
        create_item(&mut conn, &new_item("b1"), b.id).await.unwrap();
        create_item(&mut conn, &new_item("a2"), a.id).await.unwrap();

        let owned = list_items_for_owner(&mut conn, a.id).await.unwrap();
        let titles: Vec<&str> = owned.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["a1", "a2"]);

        let grouped = list_items_for_owners(&mut conn, &[a.id, b.id, c.id]).await.unwrap();
        assert_eq!(grouped.get(&a.id).map(Vec::len), Some(2));
        assert_eq!(grouped.get(&b.id).map(Vec::len), Some(1));
        assert!(!grouped.contains_key(&c.id));

        assert!(list_items_for_owners(&mut conn, &[]).await.unwrap().is_empty());
    }

    async fn seed_users(conn: &mut SqliteConnection, n: i64) {
        sqlx::query(
            "INSERT INTO users (email, hashed_password) \
             WITH RECURSIVE seq(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM seq WHERE x < ?) \
             SELECT 'user' || x || '@example.com', 'not-a-hash' FROM seq",
        )
        .bind(n)
        .execute(&mut *conn)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let mut conn = session().await;
        seed_users(&mut conn, i64::from(MAX_LIMIT) + 5).await;

        let page = list_users(&mut conn, 0, u32::MAX).await.unwrap();
        assert_eq!(page.len(), MAX_LIMIT as usize);
        assert_eq!(page[0].email, "user1@example.com");

        let tail = list_users(&mut conn, MAX_LIMIT, 1_000_000).await.unwrap();
        assert_eq!(tail.len(), 5);
        assert!(list_items(&mut conn, 0, u32::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_batch_beyond_sqlite_variable_limit() {
        let mut conn = session().await;
        let owner = create_user(&mut conn, &new_user("many@example.com")).await.unwrap();
        create_item(&mut conn, &new_item("kept"), owner.id).await.unwrap();

        let mut ids: Vec<i64> = (10_000..50_000).collect();
        ids.push(owner.id);
        let grouped = list_items_for_owners(&mut conn, &ids).await.unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&owner.id][0].title, "kept");
    }
}
