//! Unauthenticated storefront handlers.
//!
//! Only active forms are visible here, and every response (including
//! errors and preflights) carries permissive CORS headers added by
//! [`crate::routes::public::router`].

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::{Form as FormBody, Json};
use formify_core::error::CoreError;
use formify_core::form::{Answer, Form};
use formify_core::normalize::decode_answers;
use formify_core::submission::{collect_answers, validate_submission};
use formify_db::repositories::{FormRepo, ResponseRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id_or;
use crate::query::ShopParams;
use crate::response::SubmittedResponse;
use crate::state::AppState;

/// Message for a submission without `formId` or `answers`.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Storefront script that loads and submits embedded forms.
const EMBED_SCRIPT: &str = include_str!("../../assets/formify-embed.js");

/// JSON submission body.
///
/// `answers` stays raw so legacy shapes (string-encoded, object map) can be
/// normalized before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub answers: Option<serde_json::Value>,
}

async fn load_public_form(
    state: &AppState,
    raw_id: &str,
    shop: Option<&str>,
) -> AppResult<Form> {
    let id = parse_id_or(raw_id, CoreError::form_not_found())?;
    FormRepo::find_public(&state.pool, id, shop)
        .await?
        .ok_or_else(|| {
            tracing::debug!(form_id = %id, shop = ?shop, "Public form not available");
            AppError::Core(CoreError::form_not_found())
        })
}

/// Validate and store answers for an active form.
async fn store_submission(
    state: &AppState,
    form: &Form,
    answers: Vec<Answer>,
) -> AppResult<SubmittedResponse> {
    let answers = validate_submission(form, answers)?;
    let response = ResponseRepo::create(&state.pool, form.id, &answers).await?;
    tracing::info!(
        response_id = %response.id,
        form_id = %form.id,
        shop = %form.shop,
        "Response submitted",
    );
    Ok(SubmittedResponse::new(response.id))
}

/// OPTIONS on any public route: an empty 204; the CORS headers are added by
/// the router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /api/public/form/{id}[?shop=]
///
/// The form document, if it is active (and owned by `shop` when given).
pub async fn get_public_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ShopParams>,
) -> AppResult<impl IntoResponse> {
    let form = load_public_form(&state, &id, params.shop()).await?;
    Ok(Json(form))
}

/// GET /api/public/form/{id}/embed[?shop=]
///
/// The form rendered as an HTML fragment.
pub async fn get_embed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ShopParams>,
) -> AppResult<impl IntoResponse> {
    let form = load_public_form(&state, &id, params.shop()).await?;
    let html = state.renderer.render(&form, &state.render_context())?;
    Ok(Html(html))
}

/// POST /api/public/submit
///
/// Body `{formId, answers: [{questionId, value}]}`.
pub async fn submit_response(
    State(state): State<AppState>,
    payload: Result<Json<SubmitPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Unreadable submission body");
        AppError::BadRequest(MISSING_REQUIRED_FIELDS.into())
    })?;

    let (Some(form_id), Some(answers)) = (
        payload.form_id.filter(|id| !id.trim().is_empty()),
        payload.answers.filter(|a| !a.is_null()),
    ) else {
        return Err(AppError::BadRequest(MISSING_REQUIRED_FIELDS.into()));
    };

    let form = load_public_form(&state, &form_id, None).await?;
    let answers = decode_answers(answers)?;
    let submitted = store_submission(&state, &form, answers).await?;
    Ok(Json(submitted))
}

/// POST /api/public/form/{id}/submit
///
/// Url-encoded fallback for the rendered `<form>`: fields are named by
/// question id, checkbox groups repeat the name.
pub async fn submit_form_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
    fields: Result<FormBody<Vec<(String, String)>>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let FormBody(fields) = fields.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let form = load_public_form(&state, &id, None).await?;
    let answers = collect_answers(&form, &fields);
    let submitted = store_submission(&state, &form, answers).await?;
    Ok(Json(submitted))
}

/// GET /api/public/embed.js
///
/// The storefront loader script, prefixed with this server's public URL.
pub async fn embed_script(State(state): State<AppState>) -> impl IntoResponse {
    let app_url = serde_json::Value::String(state.config.public_app_url.clone());
    let body = format!("window.FORMIFY_APP_URL = {app_url};\n{EMBED_SCRIPT}");
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        body,
    )
}
