//! Admin handlers for responses.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use formify_core::error::CoreError;
use formify_db::repositories::ResponseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id_or;
use crate::middleware::auth::ShopSession;
use crate::query::{IdParams, ShopParams};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/responses
///
/// Every response to any of the session shop's forms, newest first, with
/// the form title and respondent email.
pub async fn list_responses(
    session: ShopSession,
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
) -> AppResult<impl IntoResponse> {
    session.authorize_shop(params.shop())?;
    let responses = ResponseRepo::list_by_shop(&state.pool, &session.shop).await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(responses)))
}

/// DELETE /api/responses?id=
pub async fn delete_response(
    session: ShopSession,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let missing = || CoreError::NotFoundOrUnauthorized { entity: "Response" };
    let raw = params
        .id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing id".into()))?;
    let id = parse_id_or(raw, missing())?;

    if !ResponseRepo::delete_for_shop(&state.pool, id, &session.shop).await? {
        return Err(missing().into());
    }

    tracing::info!(response_id = %id, shop = %session.shop, "Response deleted");
    Ok(Json(SuccessResponse::ok()))
}
