//! # Storefront API Client
//!
//! An async client for the Shopify Storefront GraphQL API, with a generic
//! GraphQL client underneath.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`StorefrontClient`]: Validated store, version and token configuration,
//!   derived endpoint and headers, per-call overrides
//! - [`GraphqlClient`]: A generic GraphQL client for any endpoint
//! - Bounded fixed-delay retries on network failures, 429 and 503
//! - Normalized results: every request failure is reported as data in
//!   [`ClientResponse`], never as a panic or a transport error
//! - Pluggable transport ([`clients::FetchApi`]) and logging ([`clients::Logger`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_api_client::{StorefrontClient, StorefrontRequestOptions};
//!
//! let client = StorefrontClient::builder()
//!     .store_domain("my-shop.myshopify.com")
//!     .api_version("2024-10")
//!     .public_access_token("public-token")
//!     .build()?;
//!
//! let response = client
//!     .request("query { shop { name } }", &StorefrontRequestOptions::new())
//!     .await?;
//!
//! if let Some(errors) = &response.errors {
//!     eprintln!("Request failed: {}", errors.message);
//! }
//! ```
//!
//! ## Observing Requests
//!
//! Any `Fn(&LogContent<'_>) + Send + Sync` closure can be passed as a logger:
//!
//! ```rust,ignore
//! use storefront_api_client::clients::LogContent;
//!
//! let client = StorefrontClient::builder()
//!     // ...
//!     .logger(|content: &LogContent<'_>| match content {
//!         LogContent::HttpRetry { retry_attempt, max_retries, .. } => {
//!             eprintln!("retry {retry_attempt}/{max_retries}");
//!         }
//!         other => eprintln!("{}", other.kind()),
//!     })
//!     .build()?;
//! ```
//!
//! The crate also emits `tracing` events; install a subscriber to see them.
//!
//! ## Design Principles
//!
//! - **No global state**: Every client owns its configuration
//! - **Fail-fast validation**: Invalid configuration is rejected at build time
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Immutable clients**: Per-call overrides never change a client

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    current_supported_api_versions, supported_api_versions, ApiVersion, ClientConfig, Retries,
    StoreDomain,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ClientResponse, GraphqlClient, GraphqlError, HttpError, ResponseErrors, StorefrontClient,
    StorefrontRequestOptions, StorefrontToken,
};
