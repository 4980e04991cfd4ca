//! Storefront API client.
//!
//! The Storefront API powers custom storefronts and headless commerce. This
//! module provides a client for it, built on the generic
//! [`GraphqlClient`](crate::clients::GraphqlClient).
//!
//! # Overview
//!
//! - [`StorefrontClient`]: The client, created through [`StorefrontClientBuilder`]
//! - [`StorefrontRequestOptions`]: Per-call variables, API version, headers and retries
//! - [`StorefrontClientConfig`]: The read-only configuration of a client
//! - [`StorefrontToken`]: The public or private access token
//!
//! # Endpoint and Headers
//!
//! Requests go to `https://{store}/api/{version}/graphql.json` and carry:
//!
//! - `Content-Type` and `Accept`: `application/json`
//! - `X-SDK-Variant` and `X-SDK-Version`
//! - `X-SDK-Variant-Source`: the client name, when one is given
//! - `User-Agent`
//! - The access token header matching the token type
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use storefront_api_client::{StorefrontClient, StorefrontRequestOptions};
//!
//! let client = StorefrontClient::builder()
//!     .store_domain("my-shop.myshopify.com")
//!     .api_version("2024-10")
//!     .public_access_token("public-token")
//!     .retries(1)
//!     .build()?;
//!
//! let response = client
//!     .request(
//!         "query Products($first: Int!) { products(first: $first) { nodes { title } } }",
//!         &StorefrontRequestOptions::new().variables(json!({ "first": 10 })),
//!     )
//!     .await?;
//! ```

mod client;
mod config;
mod token;

pub use client::{StorefrontClient, StorefrontClientBuilder, StorefrontRequestOptions};
pub use config::{
    api_url, StorefrontClientConfig, DEFAULT_CONTENT_TYPE, DEFAULT_SDK_VARIANT,
    SDK_VARIANT_HEADER, SDK_VARIANT_SOURCE_HEADER, SDK_VERSION_HEADER,
};
pub use token::{StorefrontToken, PRIVATE_HEADER_NAME, PUBLIC_HEADER_NAME};
