//! Tea record and request bodies

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::catalog::entity::{Draft, Entity, Patch};
use crate::catalog::serde_helpers::{nullable, patch_time_of_day, time_of_day};

/// A tea in the tea house catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tea {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Green Tea House")]
    pub name: String,
    /// Tea family, e.g. green, black, oolong
    #[schema(example = "green")]
    pub category: String,
    #[schema(example = "Hangzhou, China")]
    pub origin: String,
    pub description: Option<String>,
    #[schema(example = 4.5)]
    pub rating: f64,
    pub is_active: bool,
    /// Serving hours
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub closing_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body. `id` may be chosen by the caller.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeaCreate {
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Green Tea House")]
    pub name: String,
    #[schema(example = "green")]
    pub category: String,
    #[schema(example = "Hangzhou, China")]
    pub origin: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to 0.0
    #[serde(default)]
    pub rating: Option<f64>,
    /// Defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "09:00")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "18:00")]
    pub closing_time: Option<NaiveTime>,
}

/// Validated create body with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct TeaDraft {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub origin: String,
    pub description: Option<String>,
    pub rating: f64,
    pub is_active: bool,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
}

/// Partial update body.
///
/// Absent (or `null`) required fields are left untouched; `null` clears
/// `description` and the serving hours.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct TeaUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "patch_time_of_day::deserialize")]
    #[schema(value_type = Option<String>, example = "10:00")]
    pub opening_time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "patch_time_of_day::deserialize")]
    #[schema(value_type = Option<String>, example = "19:00")]
    pub closing_time: Option<Option<NaiveTime>>,
}

impl Draft for TeaDraft {
    fn requested_id(&self) -> Option<i64> {
        self.id
    }

    fn unique_values(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str())]
    }
}

impl Patch for TeaUpdate {
    fn unique_values(&self) -> Vec<(&'static str, &str)> {
        self.name.as_deref().map(|n| ("name", n)).into_iter().collect()
    }

    fn touches_hours(&self) -> bool {
        self.opening_time.is_some() || self.closing_time.is_some()
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Entity for Tea {
    type Create = TeaCreate;
    type Update = TeaUpdate;
    type Draft = TeaDraft;
    type Patch = TeaUpdate;

    const KIND: &'static str = "tea";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn search_field(&self) -> &str {
        &self.category
    }

    fn hours(&self) -> (Option<NaiveTime>, Option<NaiveTime>) {
        (self.opening_time, self.closing_time)
    }

    fn materialize(id: i64, draft: TeaDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            origin: draft.origin,
            description: draft.description,
            rating: draft.rating,
            is_active: draft.is_active,
            opening_time: draft.opening_time,
            closing_time: draft.closing_time,
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, patch: TeaUpdate, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(origin) = patch.origin {
            self.origin = origin;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(opening) = patch.opening_time {
            self.opening_time = opening;
        }
        if let Some(closing) = patch.closing_time {
            self.closing_time = closing;
        }
        self.updated_at = now;
    }
}
