//! Load [`AppConfig`] from the process environment (after `.env`, if present).

use crate::config::types::*;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

/// Read settings from the environment. Unset keys fall back to defaults; set but
/// unparsable keys are an error.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("ignoring unreadable .env file: {}", e);
        }
    }
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Same as [`load_from_env`] but reads keys through `lookup`.
pub fn load_from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let database_url = lookup("DATABASE_URL")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    if !database_url.starts_with("sqlite:") {
        return Err(ConfigError::DatabaseUrl(database_url));
    }

    let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
    if max_connections == 0 {
        return Err(ConfigError::InvalidValue {
            key: "DATABASE_MAX_CONNECTIONS",
            value: "0".into(),
        });
    }
    let bind_addr: SocketAddr = parse_or(&lookup, "BIND_ADDR", AppConfig::default().bind_addr)?;
    let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

    Ok(AppConfig {
        database_url,
        max_connections,
        bind_addr,
        body_limit_bytes,
    })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
