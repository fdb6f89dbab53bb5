//! Field validation rules shared by every catalog entity
//!
//! Each check returns the first violation it finds. Entity validators call
//! these in field declaration order and stop at the first error, so the
//! reported field is deterministic.

use std::fmt;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{ValidateLength, ValidateRange};

/// Default phone pattern: 7-15 digits, optional leading `+`.
pub const DEFAULT_PHONE_PATTERN: &str = r"^\+?\d{7,15}$";

/// Inclusive rating bounds.
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// Largest caller-assigned id; leaves room for the next generated one.
pub const MAX_CALLER_ID: i64 = i64::MAX - 1;

static DEFAULT_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_PHONE_PATTERN).expect("default phone pattern compiles"));

// ============================================================================
// Validation Errors
// ============================================================================

/// A single field-level violation
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be {min}-{max} characters, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: u64,
        max: u64,
        actual: u64,
    },

    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Invalid format for {field}: '{value}' (expected: {expected})")]
    InvalidFormat {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("closing_time must {requirement} opening_time")]
    InvalidHours { requirement: &'static str },

    #[error("{field} must be between 1 and {max}, got {actual}")]
    IdOutOfRange {
        field: &'static str,
        max: i64,
        actual: i64,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidLength { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::IdOutOfRange { field, .. } => field,
            Self::InvalidHours { .. } => "closing_time",
        }
    }

    /// Machine-readable rule name
    pub fn rule(&self) -> &'static str {
        match self {
            Self::InvalidLength { .. } => "length",
            Self::OutOfRange { .. } => "range",
            Self::InvalidFormat { .. } => "format",
            Self::InvalidHours { .. } => "hours",
            Self::IdOutOfRange { .. } => "id_range",
        }
    }
}

// ============================================================================
// Rule Configuration
// ============================================================================

/// How `closing_time` relates to `opening_time` when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursPolicy {
    /// Closing must differ from opening (overnight hours allowed).
    #[default]
    Distinct,
    /// Closing must be strictly later than opening on the same day.
    StrictlyAfter,
}

impl HoursPolicy {
    fn requirement(self) -> &'static str {
        match self {
            Self::Distinct => "be different from",
            Self::StrictlyAfter => "be after",
        }
    }
}

/// Compiled phone number pattern.
///
/// Interior spaces, dashes and parentheses are stripped before matching.
#[derive(Clone)]
pub struct PhonePattern(Regex);

impl PhonePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, phone: &str) -> bool {
        self.0.is_match(&strip_phone_separators(phone))
    }
}

impl Default for PhonePattern {
    fn default() -> Self {
        Self(DEFAULT_PHONE_REGEX.clone())
    }
}

impl fmt::Debug for PhonePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PhonePattern").field(&self.0.as_str()).finish()
    }
}

/// Configurable part of the validator
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    pub phone: PhonePattern,
    pub hours: HoursPolicy,
}

impl ValidationRules {
    pub fn new(phone: PhonePattern, hours: HoursPolicy) -> Self {
        Self { phone, hours }
    }
}

// ============================================================================
// Rule Helpers
// ============================================================================

fn strip_phone_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Check a string's length in characters against inclusive bounds.
pub fn check_length(
    field: &'static str,
    value: &str,
    min: u64,
    max: u64,
) -> Result<(), ValidationError> {
    if value.validate_length(Some(min), Some(max), None) {
        return Ok(());
    }
    Err(ValidationError::InvalidLength {
        field,
        min,
        max,
        actual: value.chars().count() as u64,
    })
}

/// Same as [`check_length`] for an optional field; `None` always passes.
pub fn check_optional_length(
    field: &'static str,
    value: Option<&str>,
    min: u64,
    max: u64,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_length(field, v, min, max),
        None => Ok(()),
    }
}

/// Check that a rating is finite and inside `[RATING_MIN, RATING_MAX]`.
pub fn check_rating(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value.validate_range(Some(RATING_MIN), Some(RATING_MAX), None, None) {
        return Ok(());
    }
    Err(ValidationError::OutOfRange {
        field: "rating",
        min: RATING_MIN,
        max: RATING_MAX,
        actual: value,
    })
}

pub fn check_phone(pattern: &PhonePattern, value: &str) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: "phone_number",
        value: value.to_string(),
        expected: "digits with optional leading '+'; ' ', '-', '(' and ')' are ignored",
    })
}

/// Cross-field rule; only applies when both times are present.
pub fn check_hours(
    policy: HoursPolicy,
    opening: Option<NaiveTime>,
    closing: Option<NaiveTime>,
) -> Result<(), ValidationError> {
    let (Some(opening), Some(closing)) = (opening, closing) else {
        return Ok(());
    };
    let ok = match policy {
        HoursPolicy::Distinct => closing != opening,
        HoursPolicy::StrictlyAfter => closing > opening,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours {
            requirement: policy.requirement(),
        })
    }
}

pub fn check_caller_id(value: i64) -> Result<(), ValidationError> {
    if (1..=MAX_CALLER_ID).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::IdOutOfRange {
            field: "id",
            max: MAX_CALLER_ID,
            actual: value,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
