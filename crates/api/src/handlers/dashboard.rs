//! Admin dashboard counts.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use formify_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::ShopSession;
use crate::state::AppState;

/// GET /api/dashboard/stats
///
/// Total forms, total responses, responses in the last 24 hours, and a
/// per-form breakdown for the session shop.
pub async fn get_stats(
    session: ShopSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = DashboardRepo::stats_for_shop(&state.pool, &session.shop).await?;
    Ok(Json(stats))
}
