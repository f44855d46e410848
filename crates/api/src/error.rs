use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use formify_core::error::CoreError;
use serde_json::json;

/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for storage
/// failures, plus plain bad requests.
/// Implements [`IntoResponse`] to produce consistent `{"error", "code"}`
/// JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `formify_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidPayload(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::NotFound { .. } | CoreError::NotFoundOrUnauthorized { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => return classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a sqlx error to a response.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations map to 404 `Form not found`; the only foreign
///   key is `responses.form_id`, so this is a submission racing a delete.
/// - Everything else maps to 500 `Database error` with the driver message
///   in `details`.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    let not_found = |message: String| {
        (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": message, "code": "NOT_FOUND" })),
        )
            .into_response()
    };

    match err {
        sqlx::Error::RowNotFound => not_found("Resource not found".to_string()),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) =>
        {
            not_found(CoreError::form_not_found().to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({
                    "error": "Database error",
                    "code": "DATABASE_ERROR",
                    "details": other.to_string(),
                })),
            )
                .into_response()
        }
    }
}
