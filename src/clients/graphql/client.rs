//! Generic GraphQL client.
//!
//! [`GraphqlClient`] sends GraphQL operations to a fixed endpoint through the
//! retrying [`HttpClient`]. It knows nothing about Storefront specifics; the
//! [`StorefrontClient`](crate::StorefrontClient) is built on top of it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::graphql::{ClientResponse, GraphqlError};
use crate::clients::{
    ClientLogger, FetchApi, HttpClient, HttpRequest, HttpResponse, Logger, RequestOptions,
    ReqwestFetchApi,
};
use crate::config::{ClientConfig, Retries};
use crate::error::ConfigError;

/// GraphQL client bound to one endpoint.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`. Its configuration never changes after
/// [`build`](GraphqlClientBuilder::build), so it can be shared freely across
/// tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api_client::clients::{GraphqlClient, RequestOptions};
/// use serde_json::json;
///
/// let client = GraphqlClient::builder()
///     .url("https://my-shop.myshopify.com/api/2024-10/graphql.json")
///     .header("X-Shopify-Storefront-Access-Token", "public-token")
///     .retries(1)
///     .build()?;
///
/// let response = client
///     .request(
///         "query Product($handle: String!) { product(handle: $handle) { title } }",
///         &RequestOptions::new().variables(json!({ "handle": "snowboard" })),
///     )
///     .await?;
///
/// if let Some(errors) = &response.errors {
///     println!("{}", errors.message);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    config: ClientConfig,
    http_client: HttpClient,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> GraphqlClientBuilder {
        GraphqlClientBuilder::new()
    }

    pub(crate) const fn from_parts(config: ClientConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the logger events are sent to.
    #[must_use]
    pub const fn logger(&self) -> &ClientLogger {
        self.http_client.logger()
    }

    /// Sends an operation and returns the raw response.
    ///
    /// Responses are returned whatever their status; see
    /// [`request`](Self::request) for a classified result.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Config`] if an override in `options` is
    /// invalid, and [`GraphqlError::Http`] if every allowed attempt failed
    /// without a response.
    pub async fn fetch(
        &self,
        operation: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, GraphqlError> {
        let (request, retries) = HttpRequest::resolve(&self.config, operation, options)?;
        Ok(self.http_client.request(&request, retries).await?)
    }

    /// Sends an operation and classifies the outcome.
    ///
    /// Network failures, error statuses and GraphQL errors are all reported
    /// through [`ClientResponse::errors`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override in `options` is invalid. No
    /// request is sent in that case.
    pub async fn request(
        &self,
        operation: &str,
        options: &RequestOptions,
    ) -> Result<ClientResponse, ConfigError> {
        match self.fetch(operation, options).await {
            Ok(response) => Ok(ClientResponse::classify(&response)),
            Err(GraphqlError::Http(error)) => Ok(ClientResponse::from_http_error(&error)),
            Err(GraphqlError::Config(error)) => Err(error),
        }
    }
}

/// Builder for [`GraphqlClient`].
///
/// Only the URL is required. Retries default to 0, the fetch implementation
/// to [`ReqwestFetchApi`] and the logger to [`NoopLogger`](crate::clients::NoopLogger).
#[derive(Default)]
pub struct GraphqlClientBuilder {
    url: Option<String>,
    headers: HashMap<String, String>,
    retries: Option<i64>,
    fetch_api: Option<Arc<dyn FetchApi>>,
    logger: Option<ClientLogger>,
}

impl GraphqlClientBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Adds a base header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds several base headers.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the default retry budget.
    #[must_use]
    pub const fn retries(mut self, retries: i64) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the fetch implementation.
    #[must_use]
    pub fn fetch_api(mut self, fetch_api: impl FetchApi + 'static) -> Self {
        self.fetch_api = Some(Arc::new(fetch_api));
        self
    }

    /// Sets an already shared fetch implementation.
    #[must_use]
    pub fn shared_fetch_api(mut self, fetch_api: Arc<dyn FetchApi>) -> Self {
        self.fetch_api = Some(fetch_api);
        self
    }

    /// Sets the logger.
    #[must_use]
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(ClientLogger::new(logger));
        self
    }

    /// Sets an already wrapped logger.
    #[must_use]
    pub fn client_logger(mut self, logger: ClientLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no URL was set, and
    /// [`ConfigError::InvalidRetries`] if the retry budget is out of range.
    pub fn build(self) -> Result<GraphqlClient, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let retries = self.retries.map_or(Ok(Retries::default()), Retries::new)?;

        let fetch_api = self
            .fetch_api
            .unwrap_or_else(|| Arc::new(ReqwestFetchApi::new()));
        let http_client = HttpClient::new(fetch_api, self.logger.unwrap_or_default());

        Ok(GraphqlClient::from_parts(
            ClientConfig::new(url, self.headers, retries),
            http_client,
        ))
    }
}

impl std::fmt::Debug for GraphqlClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClientBuilder")
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}
