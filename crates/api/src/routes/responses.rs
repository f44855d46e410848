//! Admin response routes mounted at `/responses`.

use axum::routing::get;
use axum::Router;

use crate::handlers::responses;
use crate::state::AppState;

/// ```text
/// GET    /       -> list_responses
/// DELETE /?id=   -> delete_response
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(responses::list_responses).delete(responses::delete_response),
    )
}
