//! Session-token authentication extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use formify_core::error::CoreError;

use crate::auth::session_token::verify_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// The shop an admin request acts for, taken from the session token in the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(session: ShopSession) -> AppResult<Json<()>> {
///     tracing::info!(shop = %session.shop, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ShopSession {
    /// Storefront domain, e.g. `acme.myshopify.com`.
    pub shop: String,
}

impl ShopSession {
    /// Check a client-supplied `?shop=` against the session.
    ///
    /// The parameter is optional; when present it must name the session's
    /// own shop.
    pub fn authorize_shop(&self, requested: Option<&str>) -> Result<(), AppError> {
        match requested {
            Some(shop) if !shop.eq_ignore_ascii_case(&self.shop) => {
                tracing::warn!(session_shop = %self.shop, requested = %shop, "Shop mismatch");
                Err(AppError::Core(CoreError::Unauthorized(
                    "Shop does not match session".into(),
                )))
            }
            _ => Ok(()),
        }
    }
}

impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let shop = verify_session_token(token, &state.config.shopify).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(ShopSession { shop })
    }
}
