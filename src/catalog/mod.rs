//! Generic catalog machinery
//!
//! Everything here is shared by the tea and restaurant collections:
//! - [`validation`] - field rules and the configurable rule set
//! - [`entity`] - the contract each record type implements
//! - [`store`] - persistence trait, with [`memory`] as the in-process backend
//! - [`service`] - validate, pre-check, persist

pub mod entity;
pub mod error;
pub mod memory;
pub mod query;
pub mod serde_helpers;
pub mod service;
pub mod store;
pub mod validation;

pub use entity::{Draft, Entity, Patch, Validate};
pub use error::{CatalogError, StoreError};
pub use memory::MemoryStore;
pub use query::{ListFilter, ListQuery, Page};
pub use service::CatalogService;
pub use store::RecordStore;
pub use validation::{HoursPolicy, PhonePattern, ValidationError, ValidationRules};
