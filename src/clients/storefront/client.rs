//! Storefront API client.
//!
//! [`StorefrontClient`] validates the store, API version and access token
//! once, derives the endpoint and headers from them, and sends operations
//! through a [`GraphqlClient`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::graphql::{ClientResponse, GraphqlClient, GraphqlError};
use crate::clients::storefront::config::{api_url, StorefrontClientConfig};
use crate::clients::storefront::StorefrontToken;
use crate::clients::{
    ClientLogger, FetchApi, HttpClient, HttpResponse, Logger, RequestOptions, ReqwestFetchApi,
};
use crate::config::version::validate_api_version;
use crate::config::{current_supported_api_versions, ApiVersion, ClientConfig, Retries, StoreDomain};
use crate::error::ConfigError;

/// Per-call options of a Storefront request.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use storefront_api_client::StorefrontRequestOptions;
///
/// let options = StorefrontRequestOptions::new()
///     .variables(json!({ "handle": "snowboard" }))
///     .api_version("unstable")
///     .custom_header("Shopify-Storefront-Buyer-IP", "192.0.2.1")
///     .retries(2);
/// # let _ = options;
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorefrontRequestOptions {
    /// Variables for the operation.
    pub variables: Option<Value>,
    /// API version used instead of the client's default.
    pub api_version: Option<String>,
    /// Headers overlaid on the client's headers.
    pub custom_headers: Option<HashMap<String, String>>,
    /// Retry budget used instead of the client's default.
    pub retries: Option<i64>,
}

impl StorefrontRequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation variables.
    #[must_use]
    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets the API version override.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets all custom headers at once.
    #[must_use]
    pub fn custom_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.custom_headers = Some(headers);
        self
    }

    /// Adds a single custom header.
    #[must_use]
    pub fn custom_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the retry budget override.
    #[must_use]
    pub const fn retries(mut self, retries: i64) -> Self {
        self.retries = Some(retries);
        self
    }
}

/// GraphQL client for the Storefront API.
///
/// # Endpoint Format
///
/// `https://{store}/api/{version}/graphql.json`
///
/// # Thread Safety
///
/// `StorefrontClient` is `Send + Sync` and immutable after
/// [`build`](StorefrontClientBuilder::build).
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api_client::{StorefrontClient, StorefrontRequestOptions};
///
/// let client = StorefrontClient::builder()
///     .store_domain("my-shop.myshopify.com")
///     .api_version("2024-10")
///     .public_access_token("public-token")
///     .build()?;
///
/// let response = client
///     .request("query { shop { name } }", &StorefrontRequestOptions::new())
///     .await?;
///
/// match response.errors {
///     None => println!("{}", response.data.unwrap()["shop"]["name"]),
///     Some(errors) => println!("{}", errors.message),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct StorefrontClient {
    config: StorefrontClientConfig,
    graphql_client: GraphqlClient,
    supported_api_versions: Vec<String>,
}

// Verify StorefrontClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontClient>();
};

impl StorefrontClient {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::new()
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontClientConfig {
        &self.config
    }

    /// Returns the API versions considered supported by this client.
    #[must_use]
    pub fn supported_api_versions(&self) -> &[String] {
        &self.supported_api_versions
    }

    /// Returns `custom_headers` merged with the client headers.
    ///
    /// Client headers win over custom headers with the same name, compared
    /// case-insensitively. Custom headers only add new names.
    #[must_use]
    pub fn get_headers(&self, custom_headers: Option<&HashMap<String, String>>) -> HashMap<String, String> {
        self.config.headers_with(custom_headers)
    }

    /// Returns the endpoint URL for `api_version`, or the client's default
    /// endpoint when `None`.
    ///
    /// A version outside the supported window only produces a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if `api_version` is empty.
    pub fn get_api_url(&self, api_version: Option<&str>) -> Result<String, ConfigError> {
        let Some(api_version) = api_version else {
            return Ok(self.config.api_url().to_string());
        };

        let api_version = ApiVersion::new(api_version)?;
        validate_api_version(
            &api_version,
            &self.supported_api_versions,
            self.graphql_client.logger(),
        );
        Ok(api_url(self.config.store_domain(), &api_version))
    }

    /// Sends an operation and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Config`] if an option is invalid, and
    /// [`GraphqlError::Http`] if every allowed attempt failed without a
    /// response.
    pub async fn fetch(
        &self,
        operation: &str,
        options: &StorefrontRequestOptions,
    ) -> Result<HttpResponse, GraphqlError> {
        let options = self.request_options(options)?;
        self.graphql_client.fetch(operation, &options).await
    }

    /// Sends an operation and classifies the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an option is invalid. Every other failure
    /// is reported in [`ClientResponse::errors`].
    pub async fn request(
        &self,
        operation: &str,
        options: &StorefrontRequestOptions,
    ) -> Result<ClientResponse, ConfigError> {
        let options = self.request_options(options)?;
        self.graphql_client.request(operation, &options).await
    }

    fn request_options(&self, options: &StorefrontRequestOptions) -> Result<RequestOptions, ConfigError> {
        let url = options
            .api_version
            .as_deref()
            .map(|version| self.get_api_url(Some(version)))
            .transpose()?;

        Ok(RequestOptions {
            variables: options.variables.clone(),
            headers: options
                .custom_headers
                .as_ref()
                .map(|custom| self.get_headers(Some(custom))),
            url,
            retries: options.retries,
        })
    }
}

/// Builder for [`StorefrontClient`].
///
/// `store_domain`, `api_version` and exactly one access token are required.
#[derive(Default)]
pub struct StorefrontClientBuilder {
    store_domain: Option<String>,
    api_version: Option<String>,
    public_access_token: Option<String>,
    private_access_token: Option<String>,
    client_name: Option<String>,
    retries: Option<i64>,
    fetch_api: Option<Arc<dyn FetchApi>>,
    logger: Option<ClientLogger>,
}

impl StorefrontClientBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store domain, such as `my-shop.myshopify.com`.
    #[must_use]
    pub fn store_domain(mut self, store_domain: impl Into<String>) -> Self {
        self.store_domain = Some(store_domain.into());
        self
    }

    /// Sets the default API version.
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets the public access token.
    #[must_use]
    pub fn public_access_token(mut self, token: impl Into<String>) -> Self {
        self.public_access_token = Some(token.into());
        self
    }

    /// Sets the private access token.
    #[must_use]
    pub fn private_access_token(mut self, token: impl Into<String>) -> Self {
        self.private_access_token = Some(token.into());
        self
    }

    /// Sets the name reported in `X-SDK-Variant-Source` and `User-Agent`.
    #[must_use]
    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
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

    /// Builds the client.
    ///
    /// Validation happens in this order: store domain, API version, access
    /// tokens, retries. An API version outside the supported window is
    /// reported to the logger and through `tracing`, but is accepted.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if the domain or version is unset
    /// - [`ConfigError::InvalidStoreDomain`] if the domain cannot be parsed
    /// - [`ConfigError::InvalidApiVersion`] if the version is empty
    /// - [`ConfigError::MissingAccessToken`], [`ConfigError::ConflictingAccessTokens`]
    ///   or [`ConfigError::PrivateTokenInBrowser`] for an invalid token setup
    /// - [`ConfigError::InvalidRetries`] if the retry budget is out of range
    pub fn build(self) -> Result<StorefrontClient, ConfigError> {
        let logger = self.logger.unwrap_or_default();
        let supported_api_versions = current_supported_api_versions();

        let store_domain = StoreDomain::new(
            self.store_domain
                .ok_or(ConfigError::MissingRequiredField {
                    field: "store_domain",
                })?,
        )?;

        let api_version = ApiVersion::new(
            self.api_version
                .ok_or(ConfigError::MissingRequiredField {
                    field: "api_version",
                })?,
        )?;
        validate_api_version(&api_version, &supported_api_versions, &logger);

        let access_token =
            StorefrontToken::from_options(self.public_access_token, self.private_access_token)?;
        let retries = self.retries.map_or(Ok(Retries::default()), Retries::new)?;

        let config = StorefrontClientConfig::new(
            store_domain,
            api_version,
            access_token,
            self.client_name.filter(|name| !name.is_empty()),
            retries,
        );

        let fetch_api = self
            .fetch_api
            .unwrap_or_else(|| Arc::new(ReqwestFetchApi::new()));
        let graphql_client = GraphqlClient::from_parts(
            ClientConfig::new(config.api_url(), config.headers().clone(), retries),
            HttpClient::new(fetch_api, logger),
        );

        tracing::debug!(
            store_domain = %config.store_domain(),
            api_version = %config.api_version(),
            "Created Storefront API client"
        );

        Ok(StorefrontClient {
            config,
            graphql_client,
            supported_api_versions,
        })
    }
}

impl std::fmt::Debug for StorefrontClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClientBuilder")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field("client_name", &self.client_name)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}
