//! Field rules for restaurant bodies

use crate::catalog::entity::Validate;
use crate::catalog::validation::{
    ValidationError, ValidationRules, check_hours, check_length, check_optional_length,
    check_phone, check_rating,
};

use super::models::{RestaurantCreate, RestaurantDraft, RestaurantUpdate};

pub const NAME_LEN: (u64, u64) = (3, 100);
pub const DESCRIPTION_LEN: (u64, u64) = (0, 1000);
pub const CUISINE_LEN: (u64, u64) = (2, 50);
pub const ADDRESS_LEN: (u64, u64) = (3, 255);

impl Validate for RestaurantCreate {
    type Output = RestaurantDraft;

    fn validate(self, rules: &ValidationRules) -> Result<RestaurantDraft, ValidationError> {
        check_length("name", &self.name, NAME_LEN.0, NAME_LEN.1)?;
        check_optional_length(
            "description",
            self.description.as_deref(),
            DESCRIPTION_LEN.0,
            DESCRIPTION_LEN.1,
        )?;
        check_length("cuisine_type", &self.cuisine_type, CUISINE_LEN.0, CUISINE_LEN.1)?;
        check_length("address", &self.address, ADDRESS_LEN.0, ADDRESS_LEN.1)?;
        check_phone(&rules.phone, &self.phone_number)?;
        let rating = self.rating.unwrap_or(0.0);
        check_rating(rating)?;
        check_hours(rules.hours, self.opening_time, self.closing_time)?;

        Ok(RestaurantDraft {
            name: self.name,
            description: self.description,
            cuisine_type: self.cuisine_type,
            address: self.address,
            phone_number: self.phone_number,
            rating,
            is_active: self.is_active.unwrap_or(true),
            opening_time: self.opening_time,
            closing_time: self.closing_time,
        })
    }
}

impl Validate for RestaurantUpdate {
    type Output = RestaurantUpdate;

    fn validate(self, rules: &ValidationRules) -> Result<RestaurantUpdate, ValidationError> {
        if let Some(name) = &self.name {
            check_length("name", name, NAME_LEN.0, NAME_LEN.1)?;
        }
        if let Some(description) = &self.description {
            check_optional_length(
                "description",
                description.as_deref(),
                DESCRIPTION_LEN.0,
                DESCRIPTION_LEN.1,
            )?;
        }
        if let Some(cuisine) = &self.cuisine_type {
            check_length("cuisine_type", cuisine, CUISINE_LEN.0, CUISINE_LEN.1)?;
        }
        if let Some(address) = &self.address {
            check_length("address", address, ADDRESS_LEN.0, ADDRESS_LEN.1)?;
        }
        if let Some(phone) = &self.phone_number {
            check_phone(&rules.phone, phone)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validation::{HoursPolicy, PhonePattern};
    use chrono::NaiveTime;

    fn body(phone: &str) -> RestaurantCreate {
        RestaurantCreate {
            name: "Golden Dragon".to_string(),
            description: Some("Dim sum all day".to_string()),
            cuisine_type: "Chinese".to_string(),
            address: "88 Harbour Road".to_string(),
            phone_number: phone.to_string(),
            rating: Some(4.5),
            is_active: None,
            opening_time: NaiveTime::from_hms_opt(10, 0, 0),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0),
        }
    }

    #[test]
    fn test_phone_examples() {
        let rules = ValidationRules::default();
        assert!(body("123-456-78901").validate(&rules).is_ok());
        assert!(body("+1 (555) 123-4567").validate(&rules).is_ok());

        let err = body("12345").validate(&rules).unwrap_err();
        assert_eq!(err.field(), "phone_number");
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_custom_phone_pattern() {
        let rules = ValidationRules::new(
            PhonePattern::new(r"^\d{10,15}$").unwrap(),
            HoursPolicy::StrictlyAfter,
        );
        assert!(body("5551234567").validate(&rules).is_ok());
        assert!(body("+15551234567").validate(&rules).is_err());
    }

    #[test]
    fn test_order_description_before_cuisine() {
        let mut b = body("5551234567");
        b.description = Some("x".repeat(1001));
        b.cuisine_type = "X".to_string();
        let err = b.validate(&ValidationRules::default()).unwrap_err();
        assert_eq!(err.field(), "description");
    }

    #[test]
    fn test_address_bounds() {
        let mut b = body("5551234567");
        b.address = "ab".to_string();
        let err = b.validate(&ValidationRules::default()).unwrap_err();
        assert_eq!(err.field(), "address");

        let mut b = body("5551234567");
        b.address = "a".repeat(255);
        assert!(b.validate(&ValidationRules::default()).is_ok());
    }

    #[test]
    fn test_equal_times_rejected() {
        let mut b = body("5551234567");
        b.opening_time = NaiveTime::from_hms_opt(9, 0, 0);
        b.closing_time = NaiveTime::from_hms_opt(9, 0, 0);
        let err = b.validate(&ValidationRules::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHours { .. }));
    }

    #[test]
    fn test_update_phone_checked() {
        let patch = RestaurantUpdate {
            phone_number: Some("abc".to_string()),
            ..RestaurantUpdate::default()
        };
        let err = patch.validate(&ValidationRules::default()).unwrap_err();
        assert_eq!(err.field(), "phone_number");
    }
}
