//! Admin form routes mounted at `/forms`.

use axum::routing::get;
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// ```text
/// GET    /                 -> list_forms
/// POST   /                 -> upsert_form
/// DELETE /?id=             -> delete_form
/// GET    /{id}             -> get_form
/// GET    /{id}/responses   -> list_form_responses
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(forms::list_forms)
                .post(forms::upsert_form)
                .delete(forms::delete_form),
        )
        .route("/{id}", get(forms::get_form))
        .route("/{id}/responses", get(forms::list_form_responses))
}
