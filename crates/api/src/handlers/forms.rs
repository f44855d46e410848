//! Admin handlers for forms.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use formify_core::error::CoreError;
use formify_core::form::FormPayload;
use formify_core::types::parse_id;
use formify_core::validation::validate_form_payload;
use formify_db::models::form::UpsertOutcome;
use formify_db::repositories::{FormRepo, ResponseRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id_or;
use crate::middleware::auth::ShopSession;
use crate::query::{IdParams, ShopParams};
use crate::response::SuccessResponse;
use crate::state::AppState;

fn form_not_found_or_unauthorized() -> CoreError {
    CoreError::NotFoundOrUnauthorized { entity: "Form" }
}

/// GET /api/forms
///
/// List the session shop's forms, newest first.
pub async fn list_forms(
    session: ShopSession,
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
) -> AppResult<impl IntoResponse> {
    session.authorize_shop(params.shop())?;
    let forms = FormRepo::list_by_shop(&state.pool, &session.shop).await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(forms)))
}

/// GET /api/forms/{id}
pub async fn get_form(
    session: ShopSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id_or(&id, CoreError::form_not_found())?;
    let form = FormRepo::find_for_shop(&state.pool, id, &session.shop)
        .await?
        .ok_or(AppError::Core(CoreError::form_not_found()))?;
    Ok(Json(form))
}

/// POST /api/forms
///
/// Full-document upsert. Returns 201 with the new form, or 200 with the
/// updated one. The shop always comes from the session; a `shop` in the
/// body is ignored.
pub async fn upsert_form(
    session: ShopSession,
    State(state): State<AppState>,
    payload: Result<Json<FormPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if let Some(claimed) = payload.shop.as_deref() {
        if !claimed.eq_ignore_ascii_case(&session.shop) {
            tracing::warn!(shop = %session.shop, claimed = %claimed, "Ignoring shop in form payload");
        }
    }

    let id = payload
        .id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(parse_id);
    let form = validate_form_payload(payload)?;

    match FormRepo::upsert(&state.pool, &session.shop, id, &form).await? {
        UpsertOutcome::Created(form) => {
            tracing::info!(form_id = %form.id, shop = %form.shop, "Form created");
            Ok((StatusCode::CREATED, Json(form)))
        }
        UpsertOutcome::Updated(form) => {
            tracing::info!(form_id = %form.id, shop = %form.shop, "Form updated");
            Ok((StatusCode::OK, Json(form)))
        }
        UpsertOutcome::Foreign => {
            tracing::warn!(shop = %session.shop, form_id = ?id, "Upsert of another shop's form");
            Err(form_not_found_or_unauthorized().into())
        }
    }
}

/// DELETE /api/forms?id=
///
/// Delete a form and all of its responses.
pub async fn delete_form(
    session: ShopSession,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let raw = params
        .id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing id".into()))?;
    let id = parse_id_or(raw, form_not_found_or_unauthorized())?;

    if !FormRepo::delete_for_shop(&state.pool, id, &session.shop).await? {
        return Err(form_not_found_or_unauthorized().into());
    }

    tracing::info!(form_id = %id, shop = %session.shop, "Form deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/forms/{id}/responses
///
/// Responses to one of the session shop's forms, newest first.
pub async fn list_form_responses(
    session: ShopSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id_or(&id, CoreError::form_not_found())?;
    if FormRepo::find_for_shop(&state.pool, id, &session.shop)
        .await?
        .is_none()
    {
        return Err(CoreError::form_not_found().into());
    }

    let responses = ResponseRepo::list_by_form(&state.pool, id, &session.shop).await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(responses)))
}
