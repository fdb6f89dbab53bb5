//! Restaurant record and request bodies

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::catalog::entity::{Draft, Entity, Patch};
use crate::catalog::serde_helpers::{nullable, patch_time_of_day, time_of_day};

/// A restaurant in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Trattoria Roma")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "Italian")]
    pub cuisine_type: String,
    #[schema(example = "12 Via Roma, Springfield")]
    pub address: String,
    /// Stored as submitted. Uniqueness compares the stored text, so
    /// `555-123-4567` and `5551234567` count as different numbers.
    #[schema(example = "+1 (555) 123-4567")]
    pub phone_number: String,
    #[schema(example = 4.2)]
    pub rating: f64,
    pub is_active: bool,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "11:00:00")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "22:00:00")]
    pub closing_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RestaurantCreate {
    #[schema(example = "Trattoria Roma")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = "Italian")]
    pub cuisine_type: String,
    #[schema(example = "12 Via Roma, Springfield")]
    pub address: String,
    /// 7-15 digits, optional leading `+`; spaces, dashes and parentheses
    /// are ignored when validating but kept in the stored value. Uniqueness
    /// compares the stored text exactly.
    #[schema(example = "+1 (555) 123-4567")]
    pub phone_number: String,
    /// Defaults to 0.0
    #[serde(default)]
    pub rating: Option<f64>,
    /// Defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "11:00")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    #[schema(value_type = Option<String>, example = "22:00")]
    pub closing_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: String,
    pub address: String,
    pub phone_number: String,
    pub rating: f64,
    pub is_active: bool,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
}

/// Partial update; see [`TeaUpdate`](crate::tea::TeaUpdate) for `null` handling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct RestaurantUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "patch_time_of_day::deserialize")]
    #[schema(value_type = Option<String>)]
    pub opening_time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "patch_time_of_day::deserialize")]
    #[schema(value_type = Option<String>)]
    pub closing_time: Option<Option<NaiveTime>>,
}

impl Draft for RestaurantDraft {
    fn unique_values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("phone_number", self.phone_number.as_str()),
        ]
    }
}

impl Patch for RestaurantUpdate {
    fn unique_values(&self) -> Vec<(&'static str, &str)> {
        let mut values = Vec::with_capacity(2);
        if let Some(name) = &self.name {
            values.push(("name", name.as_str()));
        }
        if let Some(phone) = &self.phone_number {
            values.push(("phone_number", phone.as_str()));
        }
        values
    }

    fn touches_hours(&self) -> bool {
        self.opening_time.is_some() || self.closing_time.is_some()
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Entity for Restaurant {
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Draft = RestaurantDraft;
    type Patch = RestaurantUpdate;

    const KIND: &'static str = "restaurant";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name", "phone_number"];

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "phone_number" => Some(&self.phone_number),
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn search_field(&self) -> &str {
        &self.cuisine_type
    }

    fn hours(&self) -> (Option<NaiveTime>, Option<NaiveTime>) {
        (self.opening_time, self.closing_time)
    }

    fn materialize(id: i64, draft: RestaurantDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            cuisine_type: draft.cuisine_type,
            address: draft.address,
            phone_number: draft.phone_number,
            rating: draft.rating,
            is_active: draft.is_active,
            opening_time: draft.opening_time,
            closing_time: draft.closing_time,
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, patch: RestaurantUpdate, now: DateTime<Utc>) {
        let RestaurantUpdate {
            name,
            description,
            cuisine_type,
            address,
            phone_number,
            rating,
            is_active,
            opening_time,
            closing_time,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = cuisine_type {
            self.cuisine_type = v;
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = phone_number {
            self.phone_number = v;
        }
        if let Some(v) = rating {
            self.rating = v;
        }
        if let Some(v) = is_active {
            self.is_active = v;
        }
        if let Some(v) = opening_time {
            self.opening_time = v;
        }
        if let Some(v) = closing_time {
            self.closing_time = v;
        }
        self.updated_at = now;
    }
}
