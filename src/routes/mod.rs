//! Router assembly.

pub mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::config::AppConfig;
use crate::doc::openapi_routes;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common routes, users/items API and the OpenAPI document.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .merge(openapi_routes())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
