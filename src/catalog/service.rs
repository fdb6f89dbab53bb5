//! Validation → advisory pre-check → store pipeline
//!
//! Handlers call into [`CatalogService`] and only ever see a record or a
//! [`CatalogError`]; store failures are logged here and never leak their
//! detail to the caller.

use std::sync::Arc;

use super::entity::{Draft, Entity, Patch, Validate};
use super::error::{CatalogError, StoreError};
use super::query::{ListQuery, Page};
use super::store::RecordStore;
use super::validation::ValidationRules;

pub struct CatalogService<E: Entity> {
    store: Arc<dyn RecordStore<E>>,
    rules: Arc<ValidationRules>,
}

impl<E: Entity> Clone for CatalogService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<E: Entity> CatalogService<E> {
    pub fn new(store: Arc<dyn RecordStore<E>>, rules: Arc<ValidationRules>) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore<E>> {
        &self.store
    }

    pub async fn create(&self, input: E::Create) -> Result<E, CatalogError> {
        let draft = input.validate(&self.rules)?;

        if let Some(id) = draft.requested_id() {
            if self.store.get(id).await.map_err(internal::<E>)?.is_some() {
                return Err(CatalogError::Conflict {
                    kind: E::KIND,
                    field: "id",
                });
            }
        }
        self.precheck_unique(&draft.unique_values(), None).await?;

        let record = self
            .store
            .create(draft)
            .await
            .map_err(store_failure::<E>)?;
        tracing::info!(kind = E::KIND, id = record.id(), "created");
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<E, CatalogError> {
        self.store
            .get(id)
            .await
            .map_err(internal::<E>)?
            .ok_or(CatalogError::NotFound { kind: E::KIND, id })
    }

    pub async fn update(&self, id: i64, input: E::Update) -> Result<E, CatalogError> {
        let patch = input.validate(&self.rules)?;

        // Nothing to write; `updated_at` stays as it is
        if patch.is_empty() {
            return self.get(id).await;
        }

        self.precheck_unique(&patch.unique_values(), Some(id))
            .await?;

        let record = self
            .store
            .update(id, patch, self.rules.hours)
            .await
            .map_err(store_failure::<E>)?
            .ok_or(CatalogError::NotFound { kind: E::KIND, id })?;
        tracing::info!(kind = E::KIND, id, "updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        if self.store.delete(id).await.map_err(internal::<E>)? {
            tracing::info!(kind = E::KIND, id, "deleted");
            Ok(())
        } else {
            Err(CatalogError::NotFound { kind: E::KIND, id })
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<E>, CatalogError> {
        self.store.list(query).await.map_err(internal::<E>)
    }

    /// Friendlier duplicate error before the write; not a substitute for the
    /// store's own constraint.
    async fn precheck_unique(
        &self,
        values: &[(&'static str, &str)],
        exclude: Option<i64>,
    ) -> Result<(), CatalogError> {
        for (field, value) in values {
            let existing = self
                .store
                .get_by_unique(field, value)
                .await
                .map_err(internal::<E>)?;
            if let Some(existing) = existing {
                if Some(existing.id()) != exclude {
                    tracing::warn!(kind = E::KIND, field, "duplicate rejected by pre-check");
                    return Err(CatalogError::Conflict {
                        kind: E::KIND,
                        field,
                    });
                }
            }
        }
        Ok(())
    }
}

fn store_failure<E: Entity>(err: StoreError) -> CatalogError {
    match err {
        StoreError::Conflict { field } => {
            tracing::warn!(kind = E::KIND, field, "unique constraint rejected write");
            CatalogError::Conflict {
                kind: E::KIND,
                field,
            }
        }
        StoreError::Invalid(e) => CatalogError::Invalid(e),
        other => internal::<E>(other),
    }
}

fn internal<E: Entity>(err: StoreError) -> CatalogError {
    tracing::error!(kind = E::KIND, error = %err, "store failure");
    CatalogError::from_store(E::KIND, err)
}
