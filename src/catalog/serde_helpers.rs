//! Serde adapters for request/response bodies
//!
//! - [`time_of_day`]: `Option<NaiveTime>` as `"HH:MM"` / `"HH:MM:SS"` in,
//!   `"HH:MM:SS"` out
//! - [`patch_time_of_day`]: same, wrapped for partial updates where `null`
//!   clears the field
//! - [`nullable`]: generic "absent vs null vs value" for partial updates

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

const OUTPUT_FORMAT: &str = "%H:%M:%S";

/// Parse a time of day, seconds optional.
///
/// Fractional seconds are rejected; output carries whole seconds only.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, OUTPUT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_or_error<E: serde::de::Error>(raw: &str) -> Result<NaiveTime, E> {
    parse_time_of_day(raw)
        .ok_or_else(|| E::custom(format!("invalid time of day '{raw}', expected HH:MM[:SS]")))
}

pub mod time_of_day {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.serialize_str(&t.format(OUTPUT_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.as_deref().map(parse_or_error::<D::Error>).transpose()
    }
}

pub mod patch_time_of_day {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Option<NaiveTime>>, D::Error> {
        super::time_of_day::deserialize(d).map(Some)
    }
}

/// Distinguishes an explicit `null` from a missing key.
///
/// Use with `#[serde(default, deserialize_with = "nullable::deserialize")]`:
/// missing key -> `None`, `null` -> `Some(None)`, value -> `Some(Some(v))`.
pub mod nullable {
    use super::*;

    pub fn deserialize<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(d).map(Some)
    }
}
