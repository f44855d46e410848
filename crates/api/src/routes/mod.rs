//! Route tables.
//!
//! Admin routes sit behind the configured CORS origins and a session token;
//! public routes answer any origin.

pub mod dashboard;
pub mod forms;
pub mod health;
pub mod public;
pub mod responses;

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// All routes mounted under `/api`.
///
/// ```text
/// /forms       admin form CRUD
/// /responses   admin response listing
/// /dashboard   admin counts
/// /public      storefront fetch, render and submit
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let admin = Router::new()
        .nest("/forms", forms::router())
        .nest("/responses", responses::router())
        .nest("/dashboard", dashboard::router())
        .layer(admin_cors(config));

    Router::new()
        .merge(admin)
        .nest("/public", public::router())
}

/// CORS for the embedded admin, restricted to `CORS_ORIGINS`.
///
/// # Panics
///
/// Panics at startup if a configured origin is not a valid header value.
pub fn admin_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
