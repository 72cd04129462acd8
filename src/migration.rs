//! DDL for the `users` and `items` tables. Idempotent: every statement uses IF NOT EXISTS.

use crate::error::AppError;
use sqlx::{Connection, SqliteConnection};

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        email TEXT NOT NULL,
        hashed_password TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS ix_users_email ON users (email)",
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        owner_id INTEGER NOT NULL REFERENCES users (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_items_title ON items (title)",
    "CREATE INDEX IF NOT EXISTS ix_items_description ON items (description)",
    "CREATE INDEX IF NOT EXISTS ix_items_owner_id ON items (owner_id)",
];

/// Create both tables and their indexes in one transaction.
pub async fn apply_migrations(conn: &mut SqliteConnection) -> Result<(), AppError> {
    let mut tx = conn.begin().await?;
    for ddl in STATEMENTS {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::debug!(statements = STATEMENTS.len(), "schema applied");
    Ok(())
}
