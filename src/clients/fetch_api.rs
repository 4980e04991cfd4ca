//! Pluggable physical HTTP transport.
//!
//! Clients perform every physical attempt through a [`FetchApi`]. The
//! default, [`ReqwestFetchApi`], uses a rustls-backed `reqwest` client.
//! Supply your own implementation to add timeouts, proxies, instrumentation
//! or a test double.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use storefront_api_client::clients::{FetchApi, FetchError, HttpRequest, HttpResponse};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl FetchApi for Offline {
//!     async fn fetch(&self, _request: &HttpRequest) -> Result<HttpResponse, FetchError> {
//!         Err(FetchError::other("offline"))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::clients::errors::FetchError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{parse_response_headers, HttpResponse};

/// Performs one physical HTTP attempt.
///
/// Implementations return `Ok` for every response received, whatever its
/// status, and `Err` only when no response could be obtained.
///
/// A failure while reading the body after the status line arrived is not a
/// fetch failure: report it through [`HttpResponse::body_error`] so the call
/// is classified without being retried.
#[async_trait]
pub trait FetchApi: Send + Sync {
    /// Sends `request` once.
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// The default [`FetchApi`], backed by `reqwest`.
///
/// No request timeout is configured: a call can wait on a stalled
/// connection indefinitely. Pass a [`reqwest::Client`] with a timeout to
/// [`ReqwestFetchApi::with_client`] to bound it.
#[derive(Clone, Debug)]
pub struct ReqwestFetchApi {
    client: reqwest::Client,
}

impl ReqwestFetchApi {
    /// Creates a fetch implementation with a rustls `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a fetch implementation around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestFetchApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchApi for ReqwestFetchApi {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut req_builder = self
            .client
            .request(request.method.clone(), request.url.as_str());

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        let res = req_builder.body(request.body.clone()).send().await?;

        let status = res.status();
        let headers = parse_response_headers(res.headers());
        let (body, body_error) = match res.text().await {
            Ok(body) => (body, None),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read response body");
                (String::new(), Some(e.to_string()))
            }
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
            body_error,
        })
    }
}

// Verify ReqwestFetchApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestFetchApi>();
};
