//! Storefront routes mounted at `/public`.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET|OPTIONS   /form/{id}          -> get_public_form
/// GET|OPTIONS   /form/{id}/embed    -> get_embed
/// POST|OPTIONS  /form/{id}/submit   -> submit_form_fields
/// POST|OPTIONS  /submit             -> submit_response
/// GET           /embed.js           -> embed_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/form/{id}",
            get(public::get_public_form).options(public::preflight),
        )
        .route(
            "/form/{id}/embed",
            get(public::get_embed).options(public::preflight),
        )
        .route(
            "/form/{id}/submit",
            post(public::submit_form_fields).options(public::preflight),
        )
        .route(
            "/submit",
            post(public::submit_response).options(public::preflight),
        )
        .route("/embed.js", get(public::embed_script))
        .layer(map_response(allow_any_origin))
}

/// Storefronts live on arbitrary domains, so public responses allow any
/// origin without credentials.
async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
