//! Error types for the Storefront API client.
//!
//! This module contains the configuration error type. Configuration errors
//! are the only errors the clients surface as `Err` from
//! [`request`](crate::StorefrontClient::request); every per-request failure
//! (network, HTTP status, payload shape) is returned as data in a
//! [`ClientResponse`](crate::ClientResponse).
//!
//! # Error Handling
//!
//! All constructors and builders return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are prefixed with the name of the
//! client that raised them.
//!
//! # Example
//!
//! ```rust
//! use storefront_api_client::{ConfigError, StoreDomain};
//!
//! let result = StoreDomain::new("   ");
//! assert!(matches!(result, Err(ConfigError::InvalidStoreDomain { .. })));
//! ```

use thiserror::Error;

use crate::config::{MAX_RETRIES, MIN_RETRIES};

/// Errors that can occur while configuring a client or resolving per-call
/// overrides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Store domain could not be turned into an origin URL.
    #[error("Storefront API Client: a valid store domain (\"{domain}\") must be provided")]
    InvalidStoreDomain {
        /// The domain that was provided.
        domain: String,
    },

    /// API version is empty.
    #[error("Storefront API Client: the provided apiVersion (\"{version}\") is invalid. Current supported API versions: {supported}")]
    InvalidApiVersion {
        /// The version string that was provided.
        version: String,
        /// Comma separated list of the currently supported versions.
        supported: String,
    },

    /// Retry budget outside of `[MIN_RETRIES, MAX_RETRIES]`.
    #[error("GraphQL Client: The provided \"retries\" value ({retries}) is invalid - it cannot be less than {min} or greater than {max}", min = MIN_RETRIES, max = MAX_RETRIES)]
    InvalidRetries {
        /// The rejected retry count.
        retries: i64,
    },

    /// Neither a public nor a private access token was supplied.
    #[error("Storefront API Client: a public or private access token must be provided")]
    MissingAccessToken,

    /// Both a public and a private access token were supplied.
    #[error("Storefront API Client: only provide either a public or private access token")]
    ConflictingAccessTokens,

    /// A private access token was supplied in a browser-like target.
    #[error("Storefront API Client: private access tokens and headers should only be used in a server-to-server implementation. Use the public API access token in nonserver environments.")]
    PrivateTokenInBrowser,

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the client.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
