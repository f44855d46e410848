//! `forms` rows.

use formify_core::form::Form;
use formify_core::normalize::questions_from_stored;
use formify_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::{form_status_from_id, StatusId};

/// A row from the `forms` table.
#[derive(Debug, Clone, FromRow)]
pub struct FormRow {
    pub id: DbId,
    pub shop: String,
    pub title: String,
    pub questions: serde_json::Value,
    pub settings: serde_json::Value,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FormRow> for Form {
    fn from(row: FormRow) -> Self {
        let settings = match row.settings {
            serde_json::Value::Object(_) => row.settings,
            _ => serde_json::Value::Object(Default::default()),
        };
        Form {
            id: row.id,
            shop: row.shop,
            title: row.title,
            questions: questions_from_stored(row.questions),
            settings,
            status: form_status_from_id(row.status_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Result of [`crate::repositories::FormRepo::upsert`].
#[derive(Debug, Clone)]
pub enum UpsertOutcome {
    Created(Form),
    Updated(Form),
    /// The id exists but belongs to a different shop; nothing was written.
    Foreign,
}
