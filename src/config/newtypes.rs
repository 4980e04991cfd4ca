//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// A validated store domain, normalised to an `https` origin.
///
/// Any host is accepted, with or without a scheme. The scheme is always
/// forced to `https` and everything after the origin (path, query, fragment)
/// is dropped.
///
/// # Serialization
///
/// `StoreDomain` serializes to and deserializes from the origin string:
///
/// ```rust
/// use storefront_api_client::StoreDomain;
///
/// let domain = StoreDomain::new("my-store.myshopify.com").unwrap();
/// let json = serde_json::to_string(&domain).unwrap();
/// assert_eq!(json, r#""https://my-store.myshopify.com""#);
/// ```
///
/// # Example
///
/// ```rust
/// use storefront_api_client::StoreDomain;
///
/// let domain = StoreDomain::new("http://my-store.myshopify.com/some/path").unwrap();
/// assert_eq!(domain.as_ref(), "https://my-store.myshopify.com");
/// assert_eq!(domain.host(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreDomain {
    origin: String,
    host_start: usize,
}

impl StoreDomain {
    const SCHEME_PREFIX: &'static str = "https://";

    /// Creates a new validated store domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreDomain`] if the domain is empty or
    /// cannot be parsed as a URL with a host.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let invalid = || ConfigError::InvalidStoreDomain {
            domain: domain.clone(),
        };

        let trimmed = domain.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("{}{trimmed}", Self::SCHEME_PREFIX)
        };

        let mut url = Url::parse(&with_scheme).map_err(|_| invalid())?;
        url.set_scheme("https").map_err(|()| invalid())?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }

        Ok(Self {
            origin: url.origin().ascii_serialization(),
            host_start: Self::SCHEME_PREFIX.len(),
        })
    }

    /// Returns the host (and port, when not the default) of the store.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.origin[self.host_start..]
    }
}

impl AsRef<str> for StoreDomain {
    fn as_ref(&self) -> &str {
        &self.origin
    }
}

impl fmt::Display for StoreDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin)
    }
}

impl Serialize for StoreDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.origin)
    }
}

impl<'de> Deserialize<'de> for StoreDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_domain_adds_https_scheme() {
        let domain = StoreDomain::new("my-store.myshopify.com").unwrap();
        assert_eq!(domain.as_ref(), "https://my-store.myshopify.com");
        assert_eq!(domain.host(), "my-store.myshopify.com");
    }

    #[test]
    fn test_store_domain_forces_https_and_drops_path() {
        let domain = StoreDomain::new("http://my-store.myshopify.com/api/2024-01").unwrap();
        assert_eq!(domain.as_ref(), "https://my-store.myshopify.com");
    }

    #[test]
    fn test_store_domain_trims_whitespace() {
        let domain = StoreDomain::new("  shop.example.com  ").unwrap();
        assert_eq!(domain.to_string(), "https://shop.example.com");
    }

    #[test]
    fn test_store_domain_keeps_non_default_port() {
        let domain = StoreDomain::new("localhost:3457").unwrap();
        assert_eq!(domain.as_ref(), "https://localhost:3457");
        assert_eq!(domain.host(), "localhost:3457");
    }

    #[test]
    fn test_store_domain_rejects_invalid_domains() {
        // Empty
        assert!(StoreDomain::new("").is_err());
        assert!(StoreDomain::new("   ").is_err());

        // Not a URL
        assert!(StoreDomain::new("my store").is_err());
        assert!(StoreDomain::new("https://").is_err());
    }

    #[test]
    fn test_store_domain_error_keeps_original_input() {
        let error = StoreDomain::new("my store").unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidStoreDomain {
                domain: "my store".to_string()
            }
        );
    }

    #[test]
    fn test_store_domain_deserializes_from_string() {
        let json = r#""test-shop.myshopify.com""#;
        let domain: StoreDomain = serde_json::from_str(json).unwrap();
        assert_eq!(domain.as_ref(), "https://test-shop.myshopify.com");
    }

    #[test]
    fn test_store_domain_deserialize_rejects_invalid() {
        let result: Result<StoreDomain, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }
}
