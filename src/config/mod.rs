//! Configuration types for the Storefront API client.
//!
//! This module holds the long-lived, immutable client configuration and the
//! validated values it is built from.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Base URL, base headers and default retry budget of a
//!   GraphQL client, plus the per-call derivation functions
//! - [`Retries`]: A retry budget validated against [`MIN_RETRIES`] and [`MAX_RETRIES`]
//! - [`StoreDomain`]: A validated store origin
//! - [`ApiVersion`]: A Storefront API version string
//!
//! Per-call overrides never mutate a [`ClientConfig`]. Every derivation
//! returns a fresh value computed from the base configuration and the
//! overrides.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use storefront_api_client::{ClientConfig, Retries};
//!
//! let mut headers = HashMap::new();
//! headers.insert("Accept".to_string(), "application/json".to_string());
//!
//! let config = ClientConfig::new(
//!     "https://example.com/graphql",
//!     headers,
//!     Retries::new(2).unwrap(),
//! );
//!
//! assert_eq!(config.effective_url(None), "https://example.com/graphql");
//! assert_eq!(config.effective_retries(Some(1)).unwrap().get(), 1);
//! ```

mod newtypes;
pub mod version;

pub use newtypes::StoreDomain;
pub use version::{current_supported_api_versions, supported_api_versions, ApiVersion};

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;

/// Smallest accepted retry budget.
pub const MIN_RETRIES: i64 = 0;

/// Largest accepted retry budget.
pub const MAX_RETRIES: i64 = 3;

/// A retry budget: the number of retries allowed after the initial attempt.
///
/// Out-of-range values are rejected, never clamped.
///
/// # Example
///
/// ```rust
/// use storefront_api_client::Retries;
///
/// let retries = Retries::new(2).unwrap();
/// assert_eq!(retries.get(), 2);
/// assert_eq!(retries.max_tries(), 3);
///
/// assert!(Retries::new(-1).is_err());
/// assert!(Retries::new(4).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Retries(u32);

impl Retries {
    /// Creates a validated retry budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetries`] if `retries` is less than
    /// [`MIN_RETRIES`] or greater than [`MAX_RETRIES`].
    pub fn new(retries: i64) -> Result<Self, ConfigError> {
        if !(MIN_RETRIES..=MAX_RETRIES).contains(&retries) {
            return Err(ConfigError::InvalidRetries { retries });
        }
        u32::try_from(retries)
            .map(Self)
            .map_err(|_| ConfigError::InvalidRetries { retries })
    }

    /// Returns the number of retries.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the total number of physical attempts this budget allows.
    #[must_use]
    pub const fn max_tries(self) -> u32 {
        self.0 + 1
    }
}

impl TryFrom<i64> for Retries {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Retries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Overlays `overrides` on top of `base`.
///
/// The override wins per key. Keys are compared ASCII case-insensitively, as
/// HTTP header names are, and the override's spelling is kept.
#[must_use]
pub fn merge_headers(
    base: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = base
        .iter()
        .filter(|(key, _)| {
            !overrides
                .keys()
                .any(|override_key| override_key.eq_ignore_ascii_case(key))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    merged.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    merged
}

/// Configuration of a GraphQL client.
///
/// Holds the base URL, the base headers and the default retry budget. The
/// value is immutable after construction; the `effective_*` methods compute
/// the configuration of a single call without touching `self`.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    url: String,
    headers: HashMap<String, String>,
    retries: Retries,
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

impl ClientConfig {
    /// Creates a new configuration.
    #[must_use]
    pub fn new(url: impl Into<String>, headers: HashMap<String, String>, retries: Retries) -> Self {
        Self {
            url: url.into(),
            headers,
            retries,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the base headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the default retry budget.
    #[must_use]
    pub const fn retries(&self) -> Retries {
        self.retries
    }

    /// Returns the URL override if present, else the base URL.
    #[must_use]
    pub fn effective_url(&self, url_override: Option<&str>) -> String {
        url_override.unwrap_or(&self.url).to_string()
    }

    /// Returns the base headers overlaid with the per-call overrides.
    #[must_use]
    pub fn effective_headers(
        &self,
        overrides: Option<&HashMap<String, String>>,
    ) -> HashMap<String, String> {
        overrides.map_or_else(
            || self.headers.clone(),
            |overrides| merge_headers(&self.headers, overrides),
        )
    }

    /// Returns the per-call retry budget, validated with the same bounds as
    /// construction, or the default budget when no override is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetries`] if the override is out of range.
    pub fn effective_retries(&self, retries_override: Option<i64>) -> Result<Retries, ConfigError> {
        retries_override.map_or(Ok(self.retries), Retries::new)
    }
}
