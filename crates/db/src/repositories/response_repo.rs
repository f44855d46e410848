//! Repository for the `responses` table.
//!
//! Responses have no shop column; every admin query joins through the
//! owning form to scope by shop.

use formify_core::form::{Answer, FormResponse, ResponseListItem};
use formify_core::types::{new_id, DbId};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::response::{ResponseListRow, ResponseRow};

/// Column list for `responses` queries.
const COLUMNS: &str = "id, form_id, answers, created_at";

/// Column list for listing queries joined with `forms f`.
const LIST_COLUMNS: &str = "\
    r.id, r.form_id, f.title AS form_title, f.questions AS form_questions, \
    r.answers, r.created_at";

/// Provides data access for form responses.
pub struct ResponseRepo;

impl ResponseRepo {
    /// List every response to any of a shop's forms, newest first.
    pub async fn list_by_shop(
        pool: &PgPool,
        shop: &str,
    ) -> Result<Vec<ResponseListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} \
             FROM responses r \
             JOIN forms f ON f.id = r.form_id \
             WHERE f.shop = $1 \
             ORDER BY r.created_at DESC, r.id DESC"
        );
        let rows = sqlx::query_as::<_, ResponseListRow>(&query)
            .bind(shop)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ResponseListItem::from).collect())
    }

    /// List responses to one of a shop's forms, newest first.
    ///
    /// A form owned by another shop yields an empty list.
    pub async fn list_by_form(
        pool: &PgPool,
        form_id: DbId,
        shop: &str,
    ) -> Result<Vec<ResponseListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} \
             FROM responses r \
             JOIN forms f ON f.id = r.form_id \
             WHERE r.form_id = $1 AND f.shop = $2 \
             ORDER BY r.created_at DESC, r.id DESC"
        );
        let rows = sqlx::query_as::<_, ResponseListRow>(&query)
            .bind(form_id)
            .bind(shop)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ResponseListItem::from).collect())
    }

    /// Store a submission.
    ///
    /// Fails with a foreign key violation if `form_id` does not exist.
    pub async fn create(
        pool: &PgPool,
        form_id: DbId,
        answers: &[Answer],
    ) -> Result<FormResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO responses (id, form_id, answers) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResponseRow>(&query)
            .bind(new_id())
            .bind(form_id)
            .bind(Json(answers))
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Delete one response if it belongs to one of the shop's forms.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_for_shop(pool: &PgPool, id: DbId, shop: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM responses r USING forms f \
             WHERE r.id = $1 AND r.form_id = f.id AND f.shop = $2",
        )
        .bind(id)
        .bind(shop)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every response to a form. Returns the number removed.
    ///
    /// Unscoped; callers must have verified ownership of the form, usually
    /// inside the same transaction.
    pub async fn delete_by_form<'e, E>(executor: E, form_id: DbId) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM responses WHERE form_id = $1")
            .bind(form_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
