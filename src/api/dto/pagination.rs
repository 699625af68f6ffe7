//! Offset/limit query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Default number of items returned when `limit` is omitted.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest accepted `limit`.
pub const MAX_LIMIT: u32 = 1000;

/// `?skip=&limit=` query parameters.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SkipLimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub skip: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SkipLimitParams {
    /// Validates the parameters and converts them to SQL `(offset, limit)`.
    ///
    /// # Defaults
    ///
    /// - `skip`: 0
    /// - `limit`: 100
    ///
    /// # Validation
    ///
    /// - `limit` must not exceed 1000
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if limit > MAX_LIMIT {
            return Err(format!("Limit must be at most {MAX_LIMIT}"));
        }

        Ok((i64::from(skip), i64::from(limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(skip: Option<u32>, limit: Option<u32>) -> SkipLimitParams {
        SkipLimitParams { skip, limit }
    }

    #[test]
    fn test_defaults() {
        let (offset, limit) = params(None, None).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 100);
    }

    #[test]
    fn test_custom_values() {
        let (offset, limit) = params(Some(20), Some(10))
            .validate_and_get_offset_limit()
            .unwrap();
        assert_eq!(offset, 20);
        assert_eq!(limit, 10);
    }

    #[test]
    fn test_zero_limit_is_ok() {
        assert!(params(None, Some(0)).validate_and_get_offset_limit().is_ok());
    }

    #[test]
    fn test_limit_at_maximum_is_ok() {
        assert!(params(None, Some(1000)).validate_and_get_offset_limit().is_ok());
    }

    #[test]
    fn test_limit_above_maximum_is_error() {
        assert!(params(None, Some(1001)).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_parse_from_query_string_values() {
        let json = r#"{"skip": "5", "limit": "7"}"#;
        let p: SkipLimitParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.skip, Some(5));
        assert_eq!(p.limit, Some(7));
    }

    #[test]
    fn test_parse_rejects_negative() {
        let json = r#"{"skip": "-1"}"#;
        assert!(serde_json::from_str::<SkipLimitParams>(json).is_err());
    }
}
