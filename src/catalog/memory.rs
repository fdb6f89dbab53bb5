//! In-process store backed by a lock-guarded `Vec`
//!
//! Records live only as long as the process. The write lock is held across
//! the uniqueness check and the write, which makes create/update atomic with
//! respect to concurrent handlers.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::entity::{Draft, Entity, Patch};
use super::error::StoreError;
use super::query::{ListQuery, Page};
use super::store::RecordStore;
use super::validation::HoursPolicy;

struct Inner<E> {
    /// Sorted by ascending id.
    records: Vec<E>,
    next_id: i64,
}

impl<E: Entity> Inner<E> {
    fn position(&self, id: i64) -> Result<usize, usize> {
        self.records.binary_search_by_key(&id, |r| r.id())
    }

    /// First unique field in `values` already held by a record other than `exclude`.
    fn conflicting_field(
        &self,
        values: &[(&'static str, &str)],
        exclude: Option<i64>,
    ) -> Option<&'static str> {
        values.iter().find_map(|(field, value)| {
            self.records
                .iter()
                .filter(|r| Some(r.id()) != exclude)
                .any(|r| r.unique_value(field) == Some(*value))
                .then_some(*field)
        })
    }
}

pub struct MemoryStore<E> {
    inner: RwLock<Inner<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for MemoryStore<E> {
    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        let mut inner = self.inner.write().await;

        let id = match draft.requested_id() {
            Some(id) => {
                if inner.position(id).is_ok() {
                    return Err(StoreError::Conflict { field: "id" });
                }
                id
            }
            // Only reachable once the id space is used up
            None if inner.position(inner.next_id).is_ok() => {
                return Err(StoreError::Conflict { field: "id" });
            }
            None => inner.next_id,
        };

        if let Some(field) = inner.conflicting_field(&draft.unique_values(), None) {
            return Err(StoreError::Conflict { field });
        }

        let record = E::materialize(id, draft, Utc::now());
        let slot = inner.position(id).unwrap_or_else(|slot| slot);
        inner.records.insert(slot, record.clone());
        inner.next_id = inner.next_id.max(id.saturating_add(1));

        tracing::debug!(kind = E::KIND, id, "record created");
        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<E>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.position(id).ok().map(|idx| inner.records[idx].clone()))
    }

    async fn get_by_unique(&self, field: &str, value: &str) -> Result<Option<E>, StoreError> {
        if !E::UNIQUE_FIELDS.iter().any(|f| *f == field) {
            return Ok(None);
        }
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .find(|r| r.unique_value(field) == Some(value))
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        patch: E::Patch,
        hours: HoursPolicy,
    ) -> Result<Option<E>, StoreError> {
        let mut inner = self.inner.write().await;

        let Ok(idx) = inner.position(id) else {
            return Ok(None);
        };

        if let Some(field) = inner.conflicting_field(&patch.unique_values(), Some(id)) {
            return Err(StoreError::Conflict { field });
        }

        let next = inner.records[idx].apply_patch(patch, hours, Utc::now())?;
        inner.records[idx] = next.clone();
        Ok(Some(next))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.position(id) {
            Ok(idx) => {
                inner.records.remove(idx);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<E>, StoreError> {
        let inner = self.inner.read().await;
        let matching: Vec<&E> = inner
            .records
            .iter()
            .filter(|r| r.matches(&query.filter))
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(Page { items, total })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
