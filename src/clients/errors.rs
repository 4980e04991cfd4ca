//! Transport error types for the GraphQL clients.
//!
//! This module contains the error types of the physical HTTP layer.
//!
//! # Error Handling
//!
//! - [`FetchError`]: A single physical attempt failed before a response was
//!   received (connection, DNS, TLS or transport timeout)
//! - [`HttpError`]: The retry budget of a call was exhausted by fetch
//!   failures
//!
//! Non-2xx responses are not errors at this layer. They are returned to the
//! caller as [`HttpResponse`](crate::clients::HttpResponse) values.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api_client::clients::HttpError;
//!
//! match client.fetch("query { shop { name } }", &options).await {
//!     Ok(response) => println!("Status: {}", response.status),
//!     Err(GraphqlError::Http(HttpError::MaxRetries { retries, message })) => {
//!         println!("Gave up after {retries} retries: {message}");
//!     }
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::CLIENT;

/// Error returned by a [`FetchApi`](crate::clients::FetchApi) when a physical
/// attempt fails without a response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or connection error raised by reqwest.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// Failure raised by a custom fetch implementation.
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Creates an error from a message, for custom fetch implementations.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Error returned when a call ends with a fetch failure.
///
/// The innermost error message is kept verbatim in `message`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The only allowed attempt failed.
    #[error("{client}: {message}", client = CLIENT)]
    Network {
        /// Message of the underlying fetch error.
        message: String,
    },

    /// Every allowed attempt failed.
    #[error("{client}: Attempted maximum number of {retries} network retries. Last message - {message}", client = CLIENT)]
    MaxRetries {
        /// The retry budget that was used up.
        retries: u32,
        /// Message of the last fetch error.
        message: String,
    },
}

impl HttpError {
    /// Builds the terminal error for a call whose last attempt failed with `error`.
    #[must_use]
    pub fn exhausted(max_retries: u32, error: &FetchError) -> Self {
        let message = error.to_string();
        if max_retries > 0 {
            Self::MaxRetries {
                retries: max_retries,
                message,
            }
        } else {
            Self::Network { message }
        }
    }

    /// Returns the message of the underlying fetch error.
    #[must_use]
    pub fn source_message(&self) -> &str {
        match self {
            Self::Network { message } | Self::MaxRetries { message, .. } => message,
        }
    }
}
