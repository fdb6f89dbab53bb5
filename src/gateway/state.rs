use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{CatalogService, Entity};
use crate::config::ServiceKind;

use super::types::PageLimits;

/// Shared state for one collection's routes
pub struct CatalogState<E: Entity> {
    pub catalog: CatalogService<E>,
    pub limits: PageLimits,
}

impl<E: Entity> CatalogState<E> {
    pub fn new(catalog: CatalogService<E>, limits: PageLimits) -> Self {
        Self { catalog, limits }
    }
}

/// Storage liveness as seen by `/health`
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn is_healthy(&self) -> bool;

    fn backend(&self) -> &'static str;
}

#[async_trait]
impl<E: Entity> HealthProbe for CatalogService<E> {
    async fn is_healthy(&self) -> bool {
        match self.store().health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(kind = E::KIND, error = %e, "[HEALTH] store check failed");
                false
            }
        }
    }

    fn backend(&self) -> &'static str {
        self.store().backend()
    }
}

/// State for the service-level routes (`/`, `/health`)
#[derive(Clone)]
pub struct SystemState {
    pub service: ServiceKind,
    pub probe: Arc<dyn HealthProbe>,
}
