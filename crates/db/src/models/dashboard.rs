//! Aggregate counts for the admin dashboard.

use formify_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Shop-wide totals.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardTotals {
    pub total_forms: i64,
    pub total_responses: i64,
    pub responses_last_24h: i64,
}

/// Per-form response count, for the forms table on the dashboard.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormResponseCount {
    pub form_id: DbId,
    pub title: String,
    pub response_count: i64,
    pub last_response_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub totals: DashboardTotals,
    pub forms: Vec<FormResponseCount>,
}
