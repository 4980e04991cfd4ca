//! HTTP request types for the GraphQL clients.
//!
//! This module provides the physical [`HttpRequest`] sent for an operation,
//! and [`RequestOptions`], the per-call overrides it is resolved from.

use std::collections::HashMap;

use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::{ClientConfig, Retries};
use crate::error::ConfigError;

/// Serializes a GraphQL operation into a request body.
///
/// `variables` is omitted entirely when `None`, never sent as `null`.
///
/// # Example
///
/// ```rust
/// use storefront_api_client::clients::graphql_body;
///
/// assert_eq!(graphql_body("{ shop { name } }", None), r#"{"query":"{ shop { name } }"}"#);
/// ```
#[must_use]
pub fn graphql_body(operation: &str, variables: Option<&Value>) -> String {
    let mut body = Map::new();
    body.insert("query".to_string(), Value::String(operation.to_string()));
    if let Some(variables) = variables {
        body.insert("variables".to_string(), variables.clone());
    }
    Value::Object(body).to_string()
}

/// A fully resolved HTTP request for one GraphQL operation.
///
/// The same request is reused, unchanged, for every attempt of a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The target URL.
    pub url: String,
    /// The HTTP method, always `POST` for GraphQL operations.
    pub method: Method,
    /// The merged request headers.
    pub headers: HashMap<String, String>,
    /// The serialized JSON body.
    pub body: String,
}

impl HttpRequest {
    /// Creates a `POST` request carrying `operation` and `variables`.
    #[must_use]
    pub fn graphql(
        url: impl Into<String>,
        headers: HashMap<String, String>,
        operation: &str,
        variables: Option<&Value>,
    ) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            headers,
            body: graphql_body(operation, variables),
        }
    }

    /// Resolves the request and retry budget of a call from the client
    /// configuration and the call's options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetries`] if the retry override is out
    /// of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use storefront_api_client::{ClientConfig, Retries};
    /// use storefront_api_client::clients::{HttpRequest, RequestOptions};
    ///
    /// let config = ClientConfig::new("https://example.com/graphql", HashMap::new(), Retries::default());
    /// let options = RequestOptions::new().retries(2).header("X-Test", "1");
    ///
    /// let (request, retries) = HttpRequest::resolve(&config, "{ shop { name } }", &options).unwrap();
    /// assert_eq!(request.url, "https://example.com/graphql");
    /// assert_eq!(request.headers.get("X-Test"), Some(&"1".to_string()));
    /// assert_eq!(retries.get(), 2);
    /// ```
    pub fn resolve(
        config: &ClientConfig,
        operation: &str,
        options: &RequestOptions,
    ) -> Result<(Self, Retries), ConfigError> {
        let retries = config.effective_retries(options.retries)?;
        let request = Self::graphql(
            config.effective_url(options.url.as_deref()),
            config.effective_headers(options.headers.as_ref()),
            operation,
            options.variables.as_ref(),
        );
        Ok((request, retries))
    }
}

/// Per-call overrides for a GraphQL request.
///
/// Every field is optional; unset fields fall back to the client
/// configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Variables for the operation.
    pub variables: Option<Value>,
    /// Headers overlaid on the client's base headers.
    pub headers: Option<HashMap<String, String>>,
    /// URL used instead of the client's base URL.
    pub url: Option<String>,
    /// Retry budget used instead of the client's default.
    pub retries: Option<i64>,
}

impl RequestOptions {
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

    /// Sets all header overrides at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single header override.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the URL override.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the retry budget override.
    #[must_use]
    pub const fn retries(mut self, retries: i64) -> Self {
        self.retries = Some(retries);
        self
    }
}
