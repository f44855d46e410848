//! Repository for the `forms` table.

use formify_core::form::Form;
use formify_core::types::{new_id, DbId};
use formify_core::validation::ValidatedForm;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::form::{FormRow, UpsertOutcome};
use crate::models::status::{FormStatusId, StatusId};
use crate::repositories::ResponseRepo;

/// Column list for `forms` queries.
const COLUMNS: &str = "id, shop, title, questions, settings, status_id, created_at, updated_at";

/// Provides data access for forms.
pub struct FormRepo;

impl FormRepo {
    /// List a shop's forms, newest first.
    pub async fn list_by_shop(pool: &PgPool, shop: &str) -> Result<Vec<Form>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM forms WHERE shop = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, FormRow>(&query)
            .bind(shop)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Form::from).collect())
    }

    /// Find a form owned by `shop`.
    pub async fn find_for_shop(
        pool: &PgPool,
        id: DbId,
        shop: &str,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1 AND shop = $2");
        let row = sqlx::query_as::<_, FormRow>(&query)
            .bind(id)
            .bind(shop)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Form::from))
    }

    /// Find a form the storefront may see.
    ///
    /// Returns `None` when the form does not exist, is not active, or (when
    /// `shop` is given) belongs to a different shop.
    pub async fn find_public(
        pool: &PgPool,
        id: DbId,
        shop: Option<&str>,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM forms \
             WHERE id = $1 AND status_id = $2 AND ($3::text IS NULL OR shop = $3)"
        );
        let row = sqlx::query_as::<_, FormRow>(&query)
            .bind(id)
            .bind(FormStatusId::Active.id())
            .bind(shop)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Form::from))
    }

    /// Create a form for `shop` with a fresh id.
    pub async fn create(
        pool: &PgPool,
        shop: &str,
        form: &ValidatedForm,
    ) -> Result<Form, sqlx::Error> {
        Self::insert(pool, new_id(), shop, form).await
    }

    /// Full-document upsert.
    ///
    /// Without an id, or with an id that does not exist, a new form is
    /// created under a fresh id. An id owned by `shop` is updated in place;
    /// its `shop` and `created_at` never change, and its status only changes
    /// when the payload carries one. An id owned by another shop
    /// is left untouched and reported as [`UpsertOutcome::Foreign`].
    pub async fn upsert(
        pool: &PgPool,
        shop: &str,
        id: Option<DbId>,
        form: &ValidatedForm,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let Some(id) = id else {
            return Self::create(pool, shop, form)
                .await
                .map(UpsertOutcome::Created);
        };

        let mut tx = pool.begin().await?;

        let owner: Option<String> =
            sqlx::query_scalar("SELECT shop FROM forms WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let outcome = match owner {
            None => UpsertOutcome::Created(Self::insert(&mut *tx, new_id(), shop, form).await?),
            Some(owner) if owner != shop => UpsertOutcome::Foreign,
            Some(_) => {
                let query = format!(
                    "UPDATE forms SET \
                         title = $3, \
                         questions = $4, \
                         settings = $5, \
                         status_id = COALESCE($6, status_id), \
                         updated_at = NOW() \
                     WHERE id = $1 AND shop = $2 \
                     RETURNING {COLUMNS}"
                );
                let row = sqlx::query_as::<_, FormRow>(&query)
                    .bind(id)
                    .bind(shop)
                    .bind(&form.title)
                    .bind(Json(&form.questions))
                    .bind(&form.settings)
                    .bind(form.status.map(|s| FormStatusId::from(s).id()))
                    .fetch_one(&mut *tx)
                    .await?;
                UpsertOutcome::Updated(row.into())
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Delete a shop's form and all of its responses in one transaction.
    ///
    /// Returns `false` (and deletes nothing) if the shop owns no such form.
    pub async fn delete_for_shop(pool: &PgPool, id: DbId, shop: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM forms WHERE id = $1 AND shop = $2 FOR UPDATE")
                .bind(id)
                .bind(shop)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Ok(false);
        }

        let removed = ResponseRepo::delete_by_form(&mut *tx, id).await?;
        sqlx::query("DELETE FROM forms WHERE id = $1 AND shop = $2")
            .bind(id)
            .bind(shop)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(form_id = %id, responses = removed, "Form deleted with its responses");
        Ok(true)
    }

    async fn insert<'e, E>(
        executor: E,
        id: DbId,
        shop: &str,
        form: &ValidatedForm,
    ) -> Result<Form, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO forms (id, shop, title, questions, settings, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FormRow>(&query)
            .bind(id)
            .bind(shop)
            .bind(&form.title)
            .bind(Json(&form.questions))
            .bind(&form.settings)
            .bind(initial_status_id(form))
            .fetch_one(executor)
            .await?;
        Ok(row.into())
    }
}

/// Status for a new row; forms start active unless told otherwise.
fn initial_status_id(form: &ValidatedForm) -> StatusId {
    FormStatusId::from(form.status.unwrap_or_default()).id()
}
