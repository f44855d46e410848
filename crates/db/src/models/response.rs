//! `responses` rows and the dashboard listing view.

use formify_core::form::{find_email, FormResponse, ResponseListItem};
use formify_core::normalize::{answers_from_stored, questions_from_stored};
use formify_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `responses` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResponseRow {
    pub id: DbId,
    pub form_id: DbId,
    pub answers: serde_json::Value,
    pub created_at: Timestamp,
}

impl From<ResponseRow> for FormResponse {
    fn from(row: ResponseRow) -> Self {
        FormResponse {
            id: row.id,
            form_id: row.form_id,
            answers: answers_from_stored(row.answers),
            created_at: row.created_at,
        }
    }
}

/// A response joined with its form's title and questions.
#[derive(Debug, Clone, FromRow)]
pub struct ResponseListRow {
    pub id: DbId,
    pub form_id: DbId,
    pub form_title: String,
    pub form_questions: serde_json::Value,
    pub answers: serde_json::Value,
    pub created_at: Timestamp,
}

impl From<ResponseListRow> for ResponseListItem {
    fn from(row: ResponseListRow) -> Self {
        let questions = questions_from_stored(row.form_questions);
        let answers = answers_from_stored(row.answers);
        ResponseListItem {
            id: row.id,
            form_id: row.form_id,
            form_title: row.form_title,
            email: find_email(&questions, &answers),
            answers,
            created_at: row.created_at,
        }
    }
}
