//! Runtime settings for the server and its SQLite binding.

use std::net::SocketAddr;

/// Static location of the database file used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./sql_app.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Upper bound on request bodies, enforced by the router.
    pub body_limit_bytes: usize,
}

impl AppConfig {
    /// Config pointing at `database_url` with every other field defaulted.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        AppConfig {
            database_url: database_url.into(),
            ..AppConfig::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}
