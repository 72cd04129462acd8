//! SQLite binding: pool construction (the session factory) and per-request session acquisition.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// One unit-of-work handle. Returned to the pool when dropped.
pub type Session = PoolConnection<Sqlite>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Parse `DATABASE_URL` into connect options. The file is created when missing and
/// foreign keys are always enforced.
pub fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, AppError> {
    if !database_url.starts_with("sqlite:") {
        return Err(ConfigError::DatabaseUrl(database_url.to_string()).into());
    }
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(format!("{}: {}", database_url, e)))?;
    Ok(opts.create_if_missing(true).foreign_keys(true))
}

/// Build the process-wide pool.
///
/// An in-memory database lives inside a single connection, so such URLs get a
/// pool of exactly one connection that is never recycled.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let opts = connect_options(&config.database_url)?;
    let mut pool_opts = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
    if is_memory_url(&config.database_url) {
        pool_opts = pool_opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        pool_opts = pool_opts.max_connections(config.max_connections);
    }
    let pool = pool_opts.connect_with(opts).await?;
    tracing::info!(url = %config.database_url, "database pool ready");
    Ok(pool)
}

/// Acquire one session from the pool.
pub async fn open_session(pool: &SqlitePool) -> Result<Session, AppError> {
    Ok(pool.acquire().await?)
}
