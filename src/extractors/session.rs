//! One database session per request, acquired from the pool on extraction.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{open_session, Session};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::SqliteConnection;
use std::ops::{Deref, DerefMut};

/// Pooled connection scoped to the handler that extracted it. Dropping it (on
/// success, error or panic) hands the connection back to the pool.
pub struct DbSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let session = open_session(&state.pool).await?;
        Ok(DbSession(session))
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
