//! Retrying HTTP transport for GraphQL requests.
//!
//! This module provides the [`HttpClient`] type, which turns one logical
//! request into one or more sequential physical attempts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::HttpError;
use crate::clients::fetch_api::FetchApi;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::logger::{ClientLogger, LogContent};
use crate::config::Retries;

/// Fixed wait between two attempts.
pub const RETRY_WAIT_TIME: Duration = Duration::from_millis(1000);

/// Response statuses that are retried.
pub const RETRIABLE_STATUS_CODES: [u16; 2] = [429, 503];

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Retrying transport shared by the GraphQL clients.
///
/// A call is retried, after a fixed [`RETRY_WAIT_TIME`], when the fetch
/// fails without a response or when the response status is in
/// [`RETRIABLE_STATUS_CODES`], as long as the retry budget allows. Every
/// other response is returned untouched, whatever its status.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no per-call state; concurrent
/// calls are independent.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use storefront_api_client::clients::{ClientLogger, HttpClient, HttpRequest, ReqwestFetchApi};
/// use storefront_api_client::Retries;
///
/// let client = HttpClient::new(Arc::new(ReqwestFetchApi::new()), ClientLogger::default());
/// let request = HttpRequest::graphql(url, headers, "query { shop { name } }", None);
///
/// let response = client.request(&request, Retries::new(2)?).await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    fetch_api: Arc<dyn FetchApi>,
    logger: ClientLogger,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport performing attempts through `fetch_api`.
    #[must_use]
    pub fn new(fetch_api: Arc<dyn FetchApi>, logger: ClientLogger) -> Self {
        Self { fetch_api, logger }
    }

    /// Returns the logger events are sent to.
    #[must_use]
    pub const fn logger(&self) -> &ClientLogger {
        &self.logger
    }

    /// Sends `request`, retrying within `retries`.
    ///
    /// At most `retries + 1` attempts are made, one after another.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the last allowed attempt failed without a
    /// response. A received response is never an error, even when its
    /// status is retriable and the budget is spent.
    pub async fn request(
        &self,
        request: &HttpRequest,
        retries: Retries,
    ) -> Result<HttpResponse, HttpError> {
        let max_retries = retries.get();
        let max_tries = retries.max_tries();
        let mut count: u32 = 1;

        loop {
            let next_count = count + 1;
            tracing::debug!(
                url = %request.url,
                attempt = count,
                max_tries,
                "Sending GraphQL request"
            );

            let last_response = match self.fetch_api.fetch(request).await {
                Ok(response) => {
                    self.logger.log(&LogContent::HttpResponse {
                        request,
                        response: &response,
                    });

                    let retriable =
                        !response.is_ok() && RETRIABLE_STATUS_CODES.contains(&response.status);
                    if !retriable || next_count > max_tries {
                        return Ok(response);
                    }
                    tracing::debug!(
                        status = response.status,
                        attempt = count,
                        "Retriable response status"
                    );
                    Some(response)
                }
                Err(error) => {
                    if next_count > max_tries {
                        return Err(HttpError::exhausted(max_retries, &error));
                    }
                    tracing::debug!(error = %error, attempt = count, "GraphQL request failed");
                    None
                }
            };

            tokio::time::sleep(RETRY_WAIT_TIME).await;

            self.logger.log(&LogContent::HttpRetry {
                request,
                last_response: last_response.as_ref(),
                retry_attempt: count,
                max_retries,
            });
            count = next_count;
        }
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}
