//! Catalog API - tea house catalog and restaurant directory
//!
//! Two CRUD services sharing one validation and persistence contract.
//!
//! # Modules
//!
//! - [`catalog`] - entity contract, validation rules, stores, service pipeline
//! - [`tea`] - tea records, their rules and PostgreSQL repository
//! - [`restaurant`] - restaurant records, their rules and PostgreSQL repository
//! - [`db`] - connection pool, schema bootstrap, shared SQL helpers
//! - [`gateway`] - axum routes, handlers, extractors, OpenAPI
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod restaurant;
pub mod tea;

pub use catalog::{CatalogError, CatalogService, MemoryStore, RecordStore, ValidationRules};
pub use config::{AppConfig, ServiceKind, StorageBackend};
pub use restaurant::Restaurant;
pub use tea::Tea;
