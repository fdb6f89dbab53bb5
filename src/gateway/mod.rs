pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod state;
pub mod types;

use anyhow::Context;
use axum::{Router, middleware::from_fn, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::{CatalogService, MemoryStore, RecordStore, ValidationRules};
use crate::config::{AppConfig, ServiceKind, StorageBackend};
use crate::db::Database;
use crate::restaurant::{PgRestaurantStore, Restaurant};
use crate::tea::{PgTeaStore, Tea};

use handlers::{health, restaurant, tea};
use openapi::{RestaurantApiDoc, TeaApiDoc};
use state::{CatalogState, SystemState};
use types::PageLimits;

/// `/teas` routes
pub fn tea_router(state: Arc<CatalogState<Tea>>) -> Router {
    Router::new()
        .route("/teas", get(tea::list_teas).post(tea::create_tea))
        .route("/teas/search", get(tea::search_teas))
        .route(
            "/teas/{id}",
            get(tea::get_tea).put(tea::update_tea).delete(tea::delete_tea),
        )
        .with_state(state)
}

/// `/restaurants` routes
pub fn restaurant_router(state: Arc<CatalogState<Restaurant>>) -> Router {
    Router::new()
        .route(
            "/restaurants",
            get(restaurant::list_restaurants).post(restaurant::create_restaurant),
        )
        .route("/restaurants/active", get(restaurant::list_active_restaurants))
        .route("/restaurants/search", get(restaurant::search_restaurants))
        .route(
            "/restaurants/{id}",
            get(restaurant::get_restaurant)
                .put(restaurant::update_restaurant)
                .delete(restaurant::delete_restaurant),
        )
        .with_state(state)
}

/// Collection routes + `/`, `/health`, Swagger UI and request logging
fn assemble(collection: Router, system: SystemState, docs: utoipa::openapi::OpenApi) -> Router {
    let system_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .with_state(system);

    collection
        .merge(system_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs))
        .layer(from_fn(middleware::log_requests))
}

pub fn tea_app(service: CatalogService<Tea>, limits: PageLimits) -> Router {
    let system = SystemState {
        service: ServiceKind::Tea,
        probe: Arc::new(service.clone()),
    };
    let state = Arc::new(CatalogState::new(service, limits));
    assemble(tea_router(state), system, TeaApiDoc::openapi())
}

pub fn restaurant_app(service: CatalogService<Restaurant>, limits: PageLimits) -> Router {
    let system = SystemState {
        service: ServiceKind::Restaurant,
        probe: Arc::new(service.clone()),
    };
    let state = Arc::new(CatalogState::new(service, limits));
    assemble(restaurant_router(state), system, RestaurantApiDoc::openapi())
}

/// Build the configured service: storage backend, rules, page limits.
///
/// With the `postgres` backend this connects and creates the schema.
pub async fn app_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let rules = Arc::new(config.validation.rules()?);
    let limits = PageLimits {
        default_limit: config.pagination.default_limit_for(config.service),
        max_limit: config.pagination.max_limit,
    };

    let db = match config.storage.backend {
        StorageBackend::Memory => None,
        StorageBackend::Postgres => {
            let url = config
                .storage
                .postgres_url
                .as_deref()
                .context("storage.postgres_url is required for the postgres backend")?;
            let db = Database::connect(url, config.storage.max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to create catalog schema")?;
            Some(Arc::new(db))
        }
    };

    tracing::info!(
        service = config.service.name(),
        storage = ?config.storage.backend,
        phone_pattern = rules.phone.as_str(),
        closing_time_policy = ?rules.hours,
        default_limit = limits.default_limit,
        max_limit = limits.max_limit,
        "Catalog configured"
    );

    let app = match config.service {
        ServiceKind::Tea => {
            let store: Arc<dyn RecordStore<Tea>> = match db {
                Some(db) => Arc::new(PgTeaStore::new(db)),
                None => Arc::new(MemoryStore::<Tea>::new()),
            };
            tea_app(CatalogService::new(store, rules), limits)
        }
        ServiceKind::Restaurant => {
            let store: Arc<dyn RecordStore<Restaurant>> = match db {
                Some(db) => Arc::new(PgRestaurantStore::new(db)),
                None => Arc::new(MemoryStore::<Restaurant>::new()),
            };
            restaurant_app(CatalogService::new(store, rules), limits)
        }
    };
    Ok(app)
}

/// In-memory service with default rules; used by tests and demos.
pub fn memory_app(service: ServiceKind, limits: PageLimits) -> Router {
    let rules = Arc::new(ValidationRules::default());
    match service {
        ServiceKind::Tea => tea_app(
            CatalogService::new(Arc::new(MemoryStore::<Tea>::new()), rules),
            limits,
        ),
        ServiceKind::Restaurant => restaurant_app(
            CatalogService::new(Arc::new(MemoryStore::<Restaurant>::new()), rules),
            limits,
        ),
    }
}

/// Start HTTP server; returns after Ctrl-C.
pub async fn run_server(host: &str, port: u16, app: Router) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use)",
            addr, port
        )
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
