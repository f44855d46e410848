//! Read-only aggregates for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardStats, DashboardTotals, FormResponseCount};

/// Provides dashboard counts scoped to one shop.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Totals plus a per-form breakdown ordered like the forms list.
    pub async fn stats_for_shop(pool: &PgPool, shop: &str) -> Result<DashboardStats, sqlx::Error> {
        let totals = sqlx::query_as::<_, DashboardTotals>(
            "SELECT \
                 (SELECT COUNT(*) FROM forms WHERE shop = $1) AS total_forms, \
                 (SELECT COUNT(*) FROM responses r JOIN forms f ON f.id = r.form_id \
                  WHERE f.shop = $1) AS total_responses, \
                 (SELECT COUNT(*) FROM responses r JOIN forms f ON f.id = r.form_id \
                  WHERE f.shop = $1 AND r.created_at >= NOW() - INTERVAL '24 hours') \
                  AS responses_last_24h",
        )
        .bind(shop)
        .fetch_one(pool)
        .await?;

        let forms = sqlx::query_as::<_, FormResponseCount>(
            "SELECT f.id AS form_id, f.title, \
                    COUNT(r.id) AS response_count, \
                    MAX(r.created_at) AS last_response_at \
             FROM forms f \
             LEFT JOIN responses r ON r.form_id = f.id \
             WHERE f.shop = $1 \
             GROUP BY f.id, f.title, f.created_at \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(shop)
        .fetch_all(pool)
        .await?;

        Ok(DashboardStats { totals, forms })
    }
}
