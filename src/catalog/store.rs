//! Persistence contract

use async_trait::async_trait;

use super::entity::Entity;
use super::error::StoreError;
use super::query::{ListQuery, Page};
use super::validation::HoursPolicy;

/// Storage backend for one entity type.
///
/// Every mutating call is atomic with respect to the uniqueness constraint:
/// two concurrent creates with the same unique value cannot both succeed.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    /// Insert a validated draft, assigning `id` and timestamps.
    async fn create(&self, draft: E::Draft) -> Result<E, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<E>, StoreError>;

    /// Exact lookup on one of `E::UNIQUE_FIELDS`.
    ///
    /// Used for the advisory duplicate pre-check only; the store's own
    /// constraint in `create`/`update` stays authoritative.
    async fn get_by_unique(&self, field: &str, value: &str) -> Result<Option<E>, StoreError>;

    /// Merge the patch into the record; `Ok(None)` when `id` is absent.
    ///
    /// The hours rule is checked against the merged record under the same
    /// lock as the write, so concurrent patches cannot combine into an
    /// invalid pair of times.
    async fn update(
        &self,
        id: i64,
        patch: E::Patch,
        hours: HoursPolicy,
    ) -> Result<Option<E>, StoreError>;

    /// Hard delete; returns whether a record existed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn list(&self, query: &ListQuery) -> Result<Page<E>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
