//! PostgreSQL store for teas

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::catalog::entity::Entity;
use crate::catalog::{HoursPolicy, ListQuery, Page, RecordStore, StoreError};
use crate::db::{Database, classify_write_error, fetch_page};

use super::models::{Tea, TeaDraft, TeaUpdate};

const COLUMNS: &str = "id, name, category, origin, description, rating, is_active, \
                       opening_time, closing_time, created_at, updated_at";

const CONSTRAINTS: &[(&str, &str)] = &[("teas_name_key", "name"), ("teas_pkey", "id")];

pub struct PgTeaStore {
    db: Arc<Database>,
}

impl PgTeaStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore<Tea> for PgTeaStore {
    async fn create(&self, draft: TeaDraft) -> Result<Tea, StoreError> {
        let mut tx = self.db.pool().begin().await?;

        let sql = match draft.id {
            Some(_) => format!(
                "INSERT INTO teas (name, category, origin, description, rating, is_active, \
                 opening_time, closing_time, id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
            ),
            None => format!(
                "INSERT INTO teas (name, category, origin, description, rating, is_active, \
                 opening_time, closing_time) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
            ),
        };

        let mut insert = sqlx::query_as::<_, Tea>(&sql)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(&draft.origin)
            .bind(&draft.description)
            .bind(draft.rating)
            .bind(draft.is_active)
            .bind(draft.opening_time)
            .bind(draft.closing_time);
        if let Some(id) = draft.id {
            insert = insert.bind(id);
        }

        let tea = insert
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| classify_write_error(e, CONSTRAINTS))?;

        // Move the sequence forward past a caller-assigned id, never back
        if let Some(id) = draft.id {
            sqlx::query(
                "SELECT setval('teas_id_seq', $1) FROM teas_id_seq \
                 WHERE $1 > last_value OR NOT is_called",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(id = tea.id, "tea row inserted");
        Ok(tea)
    }

    async fn get(&self, id: i64) -> Result<Option<Tea>, StoreError> {
        let row: Option<Tea> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM teas WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row)
    }

    async fn get_by_unique(&self, field: &str, value: &str) -> Result<Option<Tea>, StoreError> {
        if field != "name" {
            return Ok(None);
        }
        let row: Option<Tea> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM teas WHERE name = $1"))
                .bind(value)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: TeaUpdate,
        hours: HoursPolicy,
    ) -> Result<Option<Tea>, StoreError> {
        let mut tx = self.db.pool().begin().await?;

        let current: Option<Tea> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM teas WHERE id = $1 FOR UPDATE"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current) = current else {
            return Ok(None);
        };
        let tea = current.apply_patch(patch, hours, Utc::now())?;

        let updated: Tea = sqlx::query_as(&format!(
            "UPDATE teas SET name = $2, category = $3, origin = $4, description = $5, \
             rating = $6, is_active = $7, opening_time = $8, closing_time = $9, \
             updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&tea.name)
        .bind(&tea.category)
        .bind(&tea.origin)
        .bind(&tea.description)
        .bind(tea.rating)
        .bind(tea.is_active)
        .bind(tea.opening_time)
        .bind(tea.closing_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, CONSTRAINTS))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.db.pool().begin().await?;
        let result = sqlx::query("DELETE FROM teas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Tea>, StoreError> {
        Ok(fetch_page(self.db.pool(), "teas", COLUMNS, "category", query).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(self.db.health_check().await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
