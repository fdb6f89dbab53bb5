//! Store and service error types

use thiserror::Error;

use super::validation::ValidationError;

/// Failure reported by a [`RecordStore`](super::store::RecordStore)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {field}")]
    Conflict { field: &'static str },

    /// Merged record breaks a field rule
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of a catalog operation that did not produce a record
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{kind} with this {field} already exists")]
    Conflict {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn from_store(kind: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::Conflict { field } => Self::Conflict { kind, field },
            StoreError::Invalid(e) => Self::Invalid(e),
            other => Self::Internal(other.to_string()),
        }
    }
}
