//! Tea house catalog
//!
//! Tea names are unique; `category` is the searchable field. Unlike
//! restaurants, a tea may be created with a caller-chosen id.

pub mod models;
pub mod repository;
pub mod validation;

pub use models::{Tea, TeaCreate, TeaDraft, TeaUpdate};
pub use repository::PgTeaStore;
