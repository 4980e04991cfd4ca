//! Storefront API version handling.
//!
//! Shopify releases a new API version every quarter (January, April, July,
//! October) and supports each for roughly a year. This module provides the
//! [`ApiVersion`] type and derives the currently supported window from the
//! calendar date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};

use crate::clients::{ClientLogger, LogContent};
use crate::error::ConfigError;

/// The version name for the unstable API.
pub const UNSTABLE: &str = "unstable";

/// A Storefront API version, such as `2024-10` or `unstable`.
///
/// Any non-empty string is accepted so that versions released after this
/// crate keep working. Whether a version is inside the supported window is a
/// warning, not an error; see [`validate_api_version`].
///
/// # Example
///
/// ```rust
/// use storefront_api_client::ApiVersion;
///
/// let version: ApiVersion = " 2024-10 ".parse().unwrap();
/// assert_eq!(version.as_ref(), "2024-10");
/// assert!(ApiVersion::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates a new API version from a trimmed, non-empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if the version is empty.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidApiVersion {
                version,
                supported: current_supported_api_versions().join(", "),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the unstable API version.
    #[must_use]
    pub fn unstable() -> Self {
        Self(UNSTABLE.to_string())
    }

    /// Returns the version released in the current quarter (UTC).
    #[must_use]
    pub fn current() -> Self {
        current_api_version(&Utc::now())
    }

    /// Returns `true` if this is the unstable version.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.0 == UNSTABLE
    }

    /// Returns `true` if this version appears in `supported`.
    #[must_use]
    pub fn is_supported_in(&self, supported: &[String]) -> bool {
        supported.iter().any(|version| version == &self.0)
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

const fn quarter_month(quarter: u32) -> u32 {
    quarter * 3 - 2
}

fn format_version(year: i32, quarter: u32) -> String {
    format!("{year}-{:02}", quarter_month(quarter))
}

fn quarter_of<D: Datelike>(date: &D) -> u32 {
    (date.month0() / 3) + 1
}

fn previous_version(year: i32, quarter: u32, quarters_back: u32) -> String {
    if quarter <= quarters_back {
        format_version(year - 1, quarter + 4 - quarters_back)
    } else {
        format_version(year, quarter - quarters_back)
    }
}

/// Returns the version released in the quarter containing `date`.
#[must_use]
pub fn current_api_version<D: Datelike>(date: &D) -> ApiVersion {
    ApiVersion(format_version(date.year(), quarter_of(date)))
}

/// Returns the versions supported on `date`, oldest first.
///
/// The window is the three previous quarterly versions, the current one, the
/// next one and `unstable`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use storefront_api_client::supported_api_versions;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// assert_eq!(
///     supported_api_versions(&date),
///     vec!["2023-04", "2023-07", "2023-10", "2024-01", "2024-04", "unstable"]
/// );
/// ```
#[must_use]
pub fn supported_api_versions<D: Datelike>(date: &D) -> Vec<String> {
    let year = date.year();
    let quarter = quarter_of(date);
    let next_version = if quarter == 4 {
        format_version(year + 1, 1)
    } else {
        format_version(year, quarter + 1)
    };

    vec![
        previous_version(year, quarter, 3),
        previous_version(year, quarter, 2),
        previous_version(year, quarter, 1),
        format_version(year, quarter),
        next_version,
        UNSTABLE.to_string(),
    ]
}

/// Returns the versions supported today (UTC).
#[must_use]
pub fn current_supported_api_versions() -> Vec<String> {
    supported_api_versions(&Utc::now())
}

/// Warns when `version` is outside the `supported` window.
///
/// An unsupported version is reported to the client logger as an
/// [`LogContent::UnsupportedApiVersion`] event and through `tracing`. The
/// call never fails.
pub fn validate_api_version(version: &ApiVersion, supported: &[String], logger: &ClientLogger) {
    if version.is_supported_in(supported) {
        return;
    }

    tracing::warn!(
        "Storefront API Client: the provided apiVersion (\"{}\") is deprecated or not supported. Current supported API versions: {}",
        version,
        supported.join(", ")
    );
    logger.log(&LogContent::UnsupportedApiVersion {
        api_version: version.as_ref(),
        supported_api_versions: supported,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_api_version_trims_input() {
        let version = ApiVersion::new("  2024-10\n").unwrap();
        assert_eq!(version.as_ref(), "2024-10");
        assert_eq!(format!("{version}"), "2024-10");
    }

    #[test]
    fn test_api_version_rejects_empty() {
        let result = ApiVersion::new("   ");
        match result {
            Err(ConfigError::InvalidApiVersion { version, supported }) => {
                assert_eq!(version, "   ");
                assert!(supported.ends_with("unstable"));
            }
            other => panic!("Expected InvalidApiVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_api_version_unstable() {
        assert!(ApiVersion::unstable().is_unstable());
        assert!(!ApiVersion::new("2024-10").unwrap().is_unstable());
    }

    #[test]
    fn test_current_api_version_per_quarter() {
        assert_eq!(current_api_version(&date(2024, 1, 1)).as_ref(), "2024-01");
        assert_eq!(current_api_version(&date(2024, 3, 31)).as_ref(), "2024-01");
        assert_eq!(current_api_version(&date(2024, 5, 10)).as_ref(), "2024-04");
        assert_eq!(current_api_version(&date(2024, 8, 1)).as_ref(), "2024-07");
        assert_eq!(current_api_version(&date(2024, 12, 31)).as_ref(), "2024-10");
    }

    #[test]
    fn test_supported_versions_in_first_quarter_wrap_to_previous_year() {
        assert_eq!(
            supported_api_versions(&date(2024, 1, 20)),
            vec!["2023-04", "2023-07", "2023-10", "2024-01", "2024-04", "unstable"]
        );
    }

    #[test]
    fn test_supported_versions_in_last_quarter_include_next_year() {
        assert_eq!(
            supported_api_versions(&date(2025, 11, 3)),
            vec!["2025-01", "2025-04", "2025-07", "2025-10", "2026-01", "unstable"]
        );
    }

    #[test]
    fn test_supported_versions_mid_year() {
        assert_eq!(
            supported_api_versions(&date(2024, 7, 1)),
            vec!["2023-10", "2024-01", "2024-04", "2024-07", "2024-10", "unstable"]
        );
    }

    #[test]
    fn test_current_supported_versions_contains_current() {
        let versions = current_supported_api_versions();
        assert_eq!(versions.len(), 6);
        assert!(ApiVersion::current().is_supported_in(&versions));
        assert!(ApiVersion::unstable().is_supported_in(&versions));
    }

    #[test]
    fn test_validate_api_version_logs_unsupported_version() {
        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let logger = ClientLogger::new(move |content: &LogContent<'_>| {
            if let LogContent::UnsupportedApiVersion {
                api_version,
                supported_api_versions,
            } = content
            {
                assert_eq!(supported_api_versions.len(), 2);
                sink.lock().unwrap().push((*api_version).to_string());
            }
        });
        let supported = vec!["2024-01".to_string(), UNSTABLE.to_string()];

        validate_api_version(&ApiVersion::new("2022-01").unwrap(), &supported, &logger);
        validate_api_version(&ApiVersion::new("2024-01").unwrap(), &supported, &logger);

        assert_eq!(*events.lock().unwrap(), vec!["2022-01".to_string()]);
    }

    #[test]
    fn test_validate_api_version_without_logger_does_not_fail() {
        let supported = vec!["2024-01".to_string()];
        validate_api_version(
            &ApiVersion::new("1999-01").unwrap(),
            &supported,
            &ClientLogger::default(),
        );
    }
}
