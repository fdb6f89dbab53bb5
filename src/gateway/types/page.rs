//! Pagination query parameters

use serde::Deserialize;
use utoipa::IntoParams;

use super::response::ApiError;

/// `?skip=&limit=`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Records to skip (>= 0, default 0)
    pub skip: Option<i64>,
    /// Page size (1..=max_limit, default per service)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl PageLimits {
    /// Validated `(skip, limit)`; out-of-range values are rejected, not clamped.
    pub fn resolve(&self, skip: Option<i64>, limit: Option<i64>) -> Result<(u64, u64), ApiError> {
        let skip = match skip {
            None => 0,
            Some(s) if s >= 0 => s as u64,
            Some(s) => {
                return Err(
                    ApiError::invalid_parameter(format!("skip must be >= 0, got {s}"))
                        .with_field("skip"),
                );
            }
        };
        let limit = match limit {
            None => self.default_limit,
            Some(l) if l >= 1 && l as u64 <= self.max_limit => l as u64,
            Some(l) => {
                return Err(ApiError::invalid_parameter(format!(
                    "limit must be between 1 and {}, got {l}",
                    self.max_limit
                ))
                .with_field("limit"));
            }
        };
        Ok((skip, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: PageLimits = PageLimits {
        default_limit: 10,
        max_limit: 100,
    };

    #[test]
    fn test_defaults() {
        assert_eq!(LIMITS.resolve(None, None).unwrap(), (0, 10));
        assert_eq!(LIMITS.resolve(Some(20), Some(100)).unwrap(), (20, 100));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(LIMITS.resolve(Some(-1), None).unwrap_err().field, Some("skip"));
        assert_eq!(LIMITS.resolve(None, Some(0)).unwrap_err().field, Some("limit"));
        assert_eq!(LIMITS.resolve(None, Some(101)).unwrap_err().field, Some("limit"));
    }
}
