//! Error type of the raw GraphQL fetch path.
//!
//! [`GraphqlClient::request`](crate::clients::GraphqlClient::request) folds
//! transport failures into its [`ClientResponse`](crate::ClientResponse) and
//! only fails on configuration. The lower-level `fetch` returns the raw
//! response and needs both failure kinds, hence [`GraphqlError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api_client::clients::GraphqlError;
//!
//! match client.fetch("query { shop { name } }", &options).await {
//!     Ok(response) => println!("Status: {}", response.status),
//!     Err(GraphqlError::Config(e)) => println!("Bad options: {e}"),
//!     Err(GraphqlError::Http(e)) => println!("Network failure: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ConfigError;

/// Error type for raw GraphQL fetches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphqlError {
    /// A per-call override was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every allowed attempt failed without a response.
    #[error(transparent)]
    Http(#[from] HttpError),
}
