//! Restaurant directory
//!
//! Both `name` and `phone_number` are unique; `cuisine_type` is the
//! searchable field.

pub mod models;
pub mod repository;
pub mod validation;

pub use models::{Restaurant, RestaurantCreate, RestaurantDraft, RestaurantUpdate};
pub use repository::PgRestaurantStore;
