//! HTTP response types for the GraphQL clients.
//!
//! This module provides the raw [`HttpResponse`] returned by a
//! [`FetchApi`](crate::clients::FetchApi). It is classified into a
//! [`ClientResponse`](crate::ClientResponse) only by the caller; the retry
//! loop never looks at the body.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A raw HTTP response.
///
/// Header names are stored lowercased; a header may carry several values.
///
/// # Example
///
/// ```rust
/// use storefront_api_client::clients::HttpResponse;
///
/// let response = HttpResponse::new(200, Default::default(), r#"{"data":{}}"#)
///     .with_header("Content-Type", "application/json; charset=utf-8");
///
/// assert!(response.is_ok());
/// assert_eq!(response.status_text, "OK");
/// assert_eq!(response.content_type(), "application/json; charset=utf-8");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The status reason phrase.
    pub status_text: String,
    /// Response headers, keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The unparsed response body.
    pub body: String,
    /// Set when the status line arrived but the body could not be read.
    /// `body` is empty in that case.
    pub body_error: Option<String>,
}

impl HttpResponse {
    /// Creates a response whose status text is the canonical reason phrase
    /// of `status`.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            status_text,
            headers: headers
                .into_iter()
                .map(|(name, values)| (name.to_lowercase(), values))
                .collect(),
            body: body.into(),
            body_error: None,
        }
    }

    /// Returns the response with an additional header value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns the response with an empty body and a body read failure.
    #[must_use]
    pub fn with_body_error(mut self, message: impl Into<String>) -> Self {
        self.body.clear();
        self.body_error = Some(message.into());
        self
    }

    /// Returns the response with a different status text.
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header, or an empty string.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Parses response headers into a `HashMap`.
pub(crate) fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
