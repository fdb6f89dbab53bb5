//! Field rules for tea bodies

use crate::catalog::entity::Validate;
use crate::catalog::validation::{
    ValidationError, ValidationRules, check_hours, check_length, check_optional_length,
    check_caller_id, check_rating,
};

use super::models::{TeaCreate, TeaDraft, TeaUpdate};

pub const NAME_LEN: (u64, u64) = (3, 100);
pub const CATEGORY_LEN: (u64, u64) = (2, 50);
pub const ORIGIN_LEN: (u64, u64) = (2, 100);
pub const DESCRIPTION_LEN: (u64, u64) = (0, 1000);

impl Validate for TeaCreate {
    type Output = TeaDraft;

    fn validate(self, rules: &ValidationRules) -> Result<TeaDraft, ValidationError> {
        if let Some(id) = self.id {
            check_caller_id(id)?;
        }
        check_length("name", &self.name, NAME_LEN.0, NAME_LEN.1)?;
        check_length("category", &self.category, CATEGORY_LEN.0, CATEGORY_LEN.1)?;
        check_length("origin", &self.origin, ORIGIN_LEN.0, ORIGIN_LEN.1)?;
        check_optional_length(
            "description",
            self.description.as_deref(),
            DESCRIPTION_LEN.0,
            DESCRIPTION_LEN.1,
        )?;
        let rating = self.rating.unwrap_or(0.0);
        check_rating(rating)?;
        check_hours(rules.hours, self.opening_time, self.closing_time)?;

        Ok(TeaDraft {
            id: self.id,
            name: self.name,
            category: self.category,
            origin: self.origin,
            description: self.description,
            rating,
            is_active: self.is_active.unwrap_or(true),
            opening_time: self.opening_time,
            closing_time: self.closing_time,
        })
    }
}

impl Validate for TeaUpdate {
    type Output = TeaUpdate;

    fn validate(self, rules: &ValidationRules) -> Result<TeaUpdate, ValidationError> {
        if let Some(name) = &self.name {
            check_length("name", name, NAME_LEN.0, NAME_LEN.1)?;
        }
        if let Some(category) = &self.category {
            check_length("category", category, CATEGORY_LEN.0, CATEGORY_LEN.1)?;
        }
        if let Some(origin) = &self.origin {
            check_length("origin", origin, ORIGIN_LEN.0, ORIGIN_LEN.1)?;
        }
        if let Some(description) = &self.description {
            check_optional_length(
                "description",
                description.as_deref(),
                DESCRIPTION_LEN.0,
                DESCRIPTION_LEN.1,
            )?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let (Some(opening), Some(closing)) = (self.opening_time, self.closing_time) {
            check_hours(rules.hours, opening, closing)?;
        }
        Ok(self)
    }
}
