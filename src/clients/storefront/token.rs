//! Storefront API access tokens.
//!
//! The Storefront API accepts two kinds of access tokens:
//!
//! - **Public tokens**: Safe to expose to buyers' browsers. Sent in the
//!   `X-Shopify-Storefront-Access-Token` header.
//! - **Private tokens**: Server-to-server only. Sent in the
//!   `Shopify-Storefront-Private-Token` header.
//!
//! A client uses exactly one of them.
//!
//! # Security
//!
//! [`StorefrontToken`] implements a custom [`Debug`] that masks the token
//! value, so tokens do not leak into logs.
//!
//! # Example
//!
//! ```rust
//! use storefront_api_client::StorefrontToken;
//!
//! let token = StorefrontToken::from_options(Some("public-token".to_string()), None).unwrap();
//! assert_eq!(token.header_name(), "X-Shopify-Storefront-Access-Token");
//!
//! let debug_output = format!("{:?}", token);
//! assert!(!debug_output.contains("public-token"));
//! ```

use std::fmt;

use crate::error::ConfigError;

/// HTTP header name for public storefront access tokens.
pub const PUBLIC_HEADER_NAME: &str = "X-Shopify-Storefront-Access-Token";

/// HTTP header name for private storefront access tokens.
pub const PRIVATE_HEADER_NAME: &str = "Shopify-Storefront-Private-Token";

/// A Storefront API access token.
#[derive(Clone, PartialEq, Eq)]
pub enum StorefrontToken {
    /// Public token for buyer-facing code.
    Public(String),

    /// Private token for server-to-server code.
    Private(String),
}

impl StorefrontToken {
    /// Selects the token from the two optional inputs of a client.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingAccessToken`] if neither token is given
    /// - [`ConfigError::ConflictingAccessTokens`] if both are given
    /// - [`ConfigError::PrivateTokenInBrowser`] if a private token is used
    ///   on a `wasm32` target
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_api_client::{ConfigError, StorefrontToken};
    ///
    /// let result = StorefrontToken::from_options(None, None);
    /// assert_eq!(result, Err(ConfigError::MissingAccessToken));
    ///
    /// let result = StorefrontToken::from_options(Some("a".into()), Some("b".into()));
    /// assert_eq!(result, Err(ConfigError::ConflictingAccessTokens));
    /// ```
    pub fn from_options(
        public_access_token: Option<String>,
        private_access_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let public_access_token = public_access_token.filter(|token| !token.is_empty());
        let private_access_token = private_access_token.filter(|token| !token.is_empty());

        let token = match (public_access_token, private_access_token) {
            (None, None) => return Err(ConfigError::MissingAccessToken),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingAccessTokens),
            (Some(token), None) => Self::Public(token),
            (None, Some(token)) => Self::Private(token),
        };

        if token.is_private() && cfg!(target_arch = "wasm32") {
            return Err(ConfigError::PrivateTokenInBrowser);
        }
        Ok(token)
    }

    /// Returns the HTTP header name for this token type.
    #[must_use]
    pub const fn header_name(&self) -> &'static str {
        match self {
            Self::Public(_) => PUBLIC_HEADER_NAME,
            Self::Private(_) => PRIVATE_HEADER_NAME,
        }
    }

    /// Returns the token value.
    #[must_use]
    pub fn header_value(&self) -> &str {
        match self {
            Self::Public(token) | Self::Private(token) => token,
        }
    }

    /// Returns `true` for a private token.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
}

impl fmt::Debug for StorefrontToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public(_) => f.write_str("StorefrontToken::Public(*****)"),
            Self::Private(_) => f.write_str("StorefrontToken::Private(*****)"),
        }
    }
}
