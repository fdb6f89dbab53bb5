//! Entity contract shared by the tea and restaurant records
//!
//! A catalog entity comes in four shapes:
//!
//! | Shape | Role |
//! |---|---|
//! | `Self` | stored record, server fields included |
//! | `Create` | raw create body as deserialized from JSON |
//! | `Draft` | validated create body, defaults applied |
//! | `Patch` | validated partial update |
//!
//! Stores and the service layer are generic over this trait; only the
//! PostgreSQL repositories are written per entity.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use super::query::ListFilter;
use super::validation::{HoursPolicy, ValidationError, ValidationRules, check_hours};

/// A raw request body that can be checked into its validated form.
pub trait Validate {
    type Output;

    /// Run all field rules in declaration order, returning the first violation.
    fn validate(self, rules: &ValidationRules) -> Result<Self::Output, ValidationError>;
}

/// Validated create input
pub trait Draft: Send + Sync {
    /// Caller-assigned id, if the entity allows it.
    fn requested_id(&self) -> Option<i64> {
        None
    }

    /// `(field, value)` pairs subject to a uniqueness constraint.
    fn unique_values(&self) -> Vec<(&'static str, &str)>;
}

/// Validated partial update
pub trait Patch: Clone + Send + Sync {
    /// Unique fields this patch sets.
    fn unique_values(&self) -> Vec<(&'static str, &str)>;

    /// Whether the patch sets either time-of-day field.
    fn touches_hours(&self) -> bool;

    fn is_empty(&self) -> bool;
}

pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    type Create: Validate<Output = Self::Draft> + Send;
    type Update: Validate<Output = Self::Patch> + Send;
    type Draft: Draft;
    type Patch: Patch;

    /// Singular name used in messages ("tea", "restaurant").
    const KIND: &'static str;

    /// Fields carrying a uniqueness constraint.
    const UNIQUE_FIELDS: &'static [&'static str];

    fn id(&self) -> i64;

    fn unique_value(&self, field: &str) -> Option<&str>;

    fn is_active(&self) -> bool;

    /// Value the `search` filter matches against.
    fn search_field(&self) -> &str;

    fn hours(&self) -> (Option<NaiveTime>, Option<NaiveTime>);

    /// Build the stored record from a validated draft.
    fn materialize(id: i64, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Apply every field the patch supplies; refresh `updated_at`.
    fn merge(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// The record as it would be after `patch`.
    ///
    /// A patch may carry only one of the two times, so the hours rule is
    /// checked on the merged values. Stores call this while holding the
    /// record lock.
    fn apply_patch(
        &self,
        patch: Self::Patch,
        hours: HoursPolicy,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let touches_hours = patch.touches_hours();
        let mut next = self.clone();
        next.merge(patch, now);
        if touches_hours {
            let (opening, closing) = next.hours();
            check_hours(hours, opening, closing)?;
        }
        Ok(next)
    }

    fn matches(&self, filter: &ListFilter) -> bool {
        if filter.active_only && !self.is_active() {
            return false;
        }
        match filter.search.as_deref() {
            Some(term) => self
                .search_field()
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}
