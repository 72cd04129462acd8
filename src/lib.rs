//! Items API: users and the items they own, persisted in SQLite behind a small
//! persistence façade ([`service::crud`]) and exposed over HTTP with axum.

pub mod config;
pub mod doc;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod password;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_from_env, AppConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use state::AppState;
pub use store::{connect, open_session, Session};
