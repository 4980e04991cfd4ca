//! GraphQL clients and their HTTP layer.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: Retrying transport that executes one logical request
//! - [`FetchApi`]: The pluggable physical transport, [`ReqwestFetchApi`] by default
//! - [`HttpRequest`] / [`RequestOptions`]: A resolved request and its per-call overrides
//! - [`HttpResponse`]: A raw response
//! - [`Logger`] / [`LogContent`]: Observability hooks
//! - [`graphql::GraphqlClient`]: Generic GraphQL client
//! - [`storefront::StorefrontClient`]: Storefront API client
//!
//! # Retry Behavior
//!
//! A logical request makes at most `retries + 1` sequential attempts:
//!
//! - **Fetch failure** (connection, DNS, TLS): retried after 1 second
//! - **429 / 503**: retried after 1 second
//! - **Any other status**: returned immediately, never retried
//!
//! The retry budget defaults to 0 and is bounded to `0..=3`.

mod errors;
mod fetch_api;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod logger;
pub mod storefront;

/// Name used to prefix transport and response messages.
pub const CLIENT: &str = "GraphQL Client";

pub use errors::{FetchError, HttpError};
pub use fetch_api::{FetchApi, ReqwestFetchApi};
pub use http_client::{HttpClient, RETRIABLE_STATUS_CODES, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{graphql_body, HttpRequest, RequestOptions};
pub use http_response::HttpResponse;
pub use logger::{ClientLogger, LogContent, Logger, NoopLogger};

pub use graphql::{ClientResponse, GraphqlClient, GraphqlClientBuilder, GraphqlError, ResponseErrors};
pub use storefront::{StorefrontClient, StorefrontClientBuilder, StorefrontRequestOptions, StorefrontToken};
