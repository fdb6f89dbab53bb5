//! PostgreSQL store for restaurants

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::catalog::entity::Entity;
use crate::catalog::{HoursPolicy, ListQuery, Page, RecordStore, StoreError};
use crate::db::{Database, classify_write_error, fetch_page};

use super::models::{Restaurant, RestaurantDraft, RestaurantUpdate};

const COLUMNS: &str = "id, name, description, cuisine_type, address, phone_number, rating, \
                       is_active, opening_time, closing_time, created_at, updated_at";

const CONSTRAINTS: &[(&str, &str)] = &[
    ("restaurants_name_key", "name"),
    ("restaurants_phone_number_key", "phone_number"),
    ("restaurants_pkey", "id"),
];

pub struct PgRestaurantStore {
    db: Arc<Database>,
}

impl PgRestaurantStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore<Restaurant> for PgRestaurantStore {
    async fn create(&self, draft: RestaurantDraft) -> Result<Restaurant, StoreError> {
        let mut tx = self.db.pool().begin().await?;

        let restaurant: Restaurant = sqlx::query_as(&format!(
            "INSERT INTO restaurants (name, description, cuisine_type, address, phone_number, \
             rating, is_active, opening_time, closing_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.cuisine_type)
        .bind(&draft.address)
        .bind(&draft.phone_number)
        .bind(draft.rating)
        .bind(draft.is_active)
        .bind(draft.opening_time)
        .bind(draft.closing_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, CONSTRAINTS))?;

        tx.commit().await?;
        tracing::debug!(id = restaurant.id, "restaurant row inserted");
        Ok(restaurant)
    }

    async fn get(&self, id: i64) -> Result<Option<Restaurant>, StoreError> {
        let row: Option<Restaurant> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(row)
    }

    async fn get_by_unique(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Restaurant>, StoreError> {
        // Column names come from this match only, never from the caller
        let column = match field {
            "name" => "name",
            "phone_number" => "phone_number",
            _ => return Ok(None),
        };
        let row: Option<Restaurant> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM restaurants WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: RestaurantUpdate,
        hours: HoursPolicy,
    ) -> Result<Option<Restaurant>, StoreError> {
        let mut tx = self.db.pool().begin().await?;

        let current: Option<Restaurant> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM restaurants WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current) = current else {
            return Ok(None);
        };
        let restaurant = current.apply_patch(patch, hours, Utc::now())?;

        let updated: Restaurant = sqlx::query_as(&format!(
            "UPDATE restaurants SET name = $2, description = $3, cuisine_type = $4, \
             address = $5, phone_number = $6, rating = $7, is_active = $8, \
             opening_time = $9, closing_time = $10, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.cuisine_type)
        .bind(&restaurant.address)
        .bind(&restaurant.phone_number)
        .bind(restaurant.rating)
        .bind(restaurant.is_active)
        .bind(restaurant.opening_time)
        .bind(restaurant.closing_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, CONSTRAINTS))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.db.pool().begin().await?;
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Restaurant>, StoreError> {
        Ok(fetch_page(self.db.pool(), "restaurants", COLUMNS, "cuisine_type", query).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(self.db.health_check().await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
