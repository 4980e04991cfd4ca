//! Normalized GraphQL responses.
//!
//! A [`ClientResponse`] is the result of classifying one raw
//! [`HttpResponse`]. Every failure of a single request (HTTP status, content
//! type, payload shape, undecodable body, exhausted transport) is expressed
//! as data in [`ClientResponse::errors`] rather than as an `Err`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpError, HttpResponse, CLIENT};

/// Content type of a regular GraphQL JSON response.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type of incremental delivery responses. Reserved; such responses
/// are classified like any other non-JSON response.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/mixed";

/// Message used when the API reported GraphQL errors.
pub const GQL_API_ERROR: &str =
    "GraphQL Client: An error occurred while fetching from the API. Review 'graphQLErrors' for details.";

/// Message used when the payload has neither data nor errors.
pub const NO_DATA_OR_ERRORS: &str =
    "GraphQL Client: An unknown error has occurred. The API did not return a data object or any errors in its response.";

/// Message used when the JSON body is `null`.
pub const NULL_BODY: &str = "GraphQL Client: The API returned a null response body.";

/// The error part of a [`ClientResponse`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseErrors {
    /// HTTP status of the response, absent when no response was classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_status_code: Option<u16>,
    /// Human-readable description of the failure.
    pub message: String,
    /// The raw `errors` array returned by the API.
    #[serde(rename = "graphQLErrors", skip_serializing_if = "Option::is_none")]
    pub graphql_errors: Option<Vec<Value>>,
}

/// A classified GraphQL response.
///
/// `data` and `extensions` are kept even when `errors` is set, so partial
/// results stay available.
///
/// # Example
///
/// ```rust
/// use storefront_api_client::clients::HttpResponse;
/// use storefront_api_client::ClientResponse;
///
/// let raw = HttpResponse::new(200, Default::default(), r#"{"data":{"shop":{"name":"Snowdevil"}}}"#)
///     .with_header("Content-Type", "application/json");
///
/// let response = ClientResponse::classify(&raw);
/// assert!(response.is_ok());
/// assert_eq!(response.data.unwrap()["shop"]["name"], "Snowdevil");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    /// The `data` object of the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// The `extensions` object of the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    /// Set when the request did not produce a clean result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ResponseErrors>,
}

/// The top-level fields of a GraphQL payload.
///
/// Only a JSON object carries fields. Any other top-level value yields an
/// empty payload.
#[derive(Default)]
struct GraphqlPayload {
    data: Option<Value>,
    errors: Option<Value>,
    extensions: Option<Value>,
}

impl GraphqlPayload {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => Self {
                data: fields.remove("data"),
                errors: fields.remove("errors"),
                extensions: fields.remove("extensions"),
            },
            _ => Self::default(),
        }
    }
}

impl ClientResponse {
    /// Classifies a raw response.
    ///
    /// Checks, in order: the status is 2xx, the content type contains
    /// `application/json`, and the payload carries `data` and no `errors`.
    #[must_use]
    pub fn classify(response: &HttpResponse) -> Self {
        if !response.is_ok() {
            return Self::error(Some(response.status), response.status_text.clone());
        }

        let content_type = response.content_type();
        if !content_type.contains(CONTENT_TYPE_JSON) {
            return Self::error(
                Some(response.status),
                format!("{CLIENT}: Response returned unexpected Content-Type: {content_type}"),
            );
        }

        if let Some(message) = &response.body_error {
            return Self::error(None, message.clone());
        }

        match response.json::<Value>() {
            Ok(Value::Null) => Self::error(None, NULL_BODY.to_string()),
            Ok(value) => Self::from_payload(response.status, GraphqlPayload::from_value(value)),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to decode GraphQL response body");
                Self::error(None, e.to_string())
            }
        }
    }

    /// Converts a transport failure into a response carrying only a message.
    #[must_use]
    pub fn from_http_error(error: &HttpError) -> Self {
        Self::error(None, error.to_string())
    }

    /// Returns `true` when no error was recorded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.errors.is_none()
    }

    /// Deserializes `data` into `T`.
    ///
    /// Returns `None` when there is no data.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if `data` does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data
            .as_ref()
            .map(|data| T::deserialize(data))
            .transpose()
    }

    fn from_payload(status: u16, payload: GraphqlPayload) -> Self {
        let data = payload.data.filter(|data| !data.is_null());
        let extensions = payload.extensions.filter(|extensions| !extensions.is_null());

        let graphql_errors = payload.errors.and_then(|errors| match errors {
            Value::Null => None,
            Value::Array(errors) => Some(errors),
            other => Some(vec![other]),
        });

        let errors = match (graphql_errors, &data) {
            (Some(errors), _) => Some(ResponseErrors {
                network_status_code: Some(status),
                message: GQL_API_ERROR.to_string(),
                graphql_errors: Some(errors),
            }),
            (None, None) => Some(ResponseErrors {
                network_status_code: Some(status),
                message: NO_DATA_OR_ERRORS.to_string(),
                graphql_errors: None,
            }),
            (None, Some(_)) => None,
        };

        Self {
            data,
            extensions,
            errors,
        }
    }

    fn error(status: Option<u16>, message: String) -> Self {
        Self {
            data: None,
            extensions: None,
            errors: Some(ResponseErrors {
                network_status_code: status,
                message,
                graphql_errors: None,
            }),
        }
    }
}

impl From<&HttpResponse> for ClientResponse {
    fn from(response: &HttpResponse) -> Self {
        Self::classify(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, HashMap::new(), body).with_header("Content-Type", "application/json")
    }

    #[test]
    fn test_data_only_is_ok() {
        let response = ClientResponse::classify(&json_response(200, r#"{"data":{"shop":{"name":"X"}}}"#));

        assert!(response.is_ok());
        assert_eq!(response.data, Some(json!({ "shop": { "name": "X" } })));
        assert!(response.extensions.is_none());
    }

    #[test]
    fn test_data_and_extensions_are_kept() {
        let response = ClientResponse::classify(&json_response(
            200,
            r#"{"data":{"x":1},"extensions":{"cost":{"requestedQueryCost":1}}}"#,
        ));

        assert!(response.is_ok());
        assert_eq!(response.extensions, Some(json!({ "cost": { "requestedQueryCost": 1 } })));
    }

    #[test]
    fn test_graphql_errors_with_partial_data() {
        let response = ClientResponse::classify(&json_response(
            200,
            r#"{"data":{"x":1},"errors":[{"message":"Field 'y' doesn't exist"}]}"#,
        ));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(200));
        assert_eq!(errors.message, GQL_API_ERROR);
        assert_eq!(
            errors.graphql_errors,
            Some(vec![json!({ "message": "Field 'y' doesn't exist" })])
        );
        assert_eq!(response.data, Some(json!({ "x": 1 })));
    }

    #[test]
    fn test_graphql_errors_without_data() {
        let response = ClientResponse::classify(&json_response(200, r#"{"errors":[{"message":"bad"}]}"#));

        let errors = response.errors.unwrap();
        assert_eq!(errors.message, GQL_API_ERROR);
        assert!(response.data.is_none());
    }

    #[test]
    fn test_graphql_errors_with_null_data() {
        let response = ClientResponse::classify(&json_response(
            200,
            r#"{"errors":[{"message":"bad field"}],"data":null}"#,
        ));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(200));
        assert_eq!(errors.message, GQL_API_ERROR);
        assert_eq!(errors.graphql_errors, Some(vec![json!({ "message": "bad field" })]));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_top_level_array_reports_unknown_error() {
        let response = ClientResponse::classify(&json_response(200, r#"[{"x":1}]"#));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(200));
        assert_eq!(errors.message, NO_DATA_OR_ERRORS);
        assert!(response.data.is_none());
        assert!(response.extensions.is_none());
    }

    #[test]
    fn test_scalar_body_reports_unknown_error() {
        let response = ClientResponse::classify(&json_response(200, "42"));

        assert_eq!(response.errors.unwrap().message, NO_DATA_OR_ERRORS);
    }

    #[test]
    fn test_null_body_reports_message_without_status() {
        let response = ClientResponse::classify(&json_response(200, "null"));

        let errors = response.errors.unwrap();
        assert!(errors.network_status_code.is_none());
        assert_eq!(errors.message, NULL_BODY);
        assert!(errors.graphql_errors.is_none());
        assert!(response.data.is_none());
    }

    #[test]
    fn test_empty_payload_reports_unknown_error() {
        let response = ClientResponse::classify(&json_response(200, "{}"));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(200));
        assert_eq!(errors.message, NO_DATA_OR_ERRORS);
        assert!(errors.graphql_errors.is_none());
    }

    #[test]
    fn test_null_data_counts_as_absent() {
        let response = ClientResponse::classify(&json_response(200, r#"{"data":null}"#));

        assert!(response.data.is_none());
        assert_eq!(response.errors.unwrap().message, NO_DATA_OR_ERRORS);
    }

    #[test]
    fn test_extensions_kept_when_data_missing() {
        let response =
            ClientResponse::classify(&json_response(200, r#"{"extensions":{"context":{"country":"CA"}}}"#));

        assert_eq!(response.extensions, Some(json!({ "context": { "country": "CA" } })));
        assert_eq!(response.errors.unwrap().message, NO_DATA_OR_ERRORS);
    }

    #[test]
    fn test_non_ok_status_uses_status_text() {
        let response = ClientResponse::classify(&json_response(404, r#"{"data":{"x":1}}"#));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(404));
        assert_eq!(errors.message, "Not Found");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_exhausted_retriable_status_is_classified_as_error() {
        let response = ClientResponse::classify(&HttpResponse::new(503, HashMap::new(), ""));

        let errors = response.errors.unwrap();
        assert_eq!(errors.network_status_code, Some(503));
        assert_eq!(errors.message, "Service Unavailable");
    }

    #[test]
    fn test_unexpected_content_type() {
        let raw = HttpResponse::new(200, HashMap::new(), "<html></html>").with_header("Content-Type", "text/html");

        let errors = ClientResponse::classify(&raw).errors.unwrap();

        assert_eq!(errors.network_status_code, Some(200));
        assert_eq!(
            errors.message,
            "GraphQL Client: Response returned unexpected Content-Type: text/html"
        );
    }

    #[test]
    fn test_missing_content_type_is_unexpected() {
        let raw = HttpResponse::new(200, HashMap::new(), r#"{"data":{}}"#);

        let errors = ClientResponse::classify(&raw).errors.unwrap();

        assert_eq!(errors.message, "GraphQL Client: Response returned unexpected Content-Type: ");
    }

    #[test]
    fn test_multipart_is_not_handled_specially() {
        let raw = HttpResponse::new(200, HashMap::new(), "--graphql")
            .with_header("Content-Type", "multipart/mixed; boundary=\"graphql\"");

        let errors = ClientResponse::classify(&raw).errors.unwrap();

        assert!(errors.message.contains(MULTIPART_CONTENT_TYPE));
    }

    #[test]
    fn test_json_content_type_with_charset_is_accepted() {
        let raw = HttpResponse::new(200, HashMap::new(), r#"{"data":{"x":1}}"#)
            .with_header("content-type", "application/json; charset=utf-8");

        assert!(ClientResponse::classify(&raw).is_ok());
    }

    #[test]
    fn test_malformed_json_reports_decoder_message_without_status() {
        let response = ClientResponse::classify(&json_response(200, "{not json"));

        let errors = response.errors.unwrap();
        assert!(errors.network_status_code.is_none());
        assert!(!errors.message.is_empty());
        assert!(errors.graphql_errors.is_none());
    }

    #[test]
    fn test_body_read_failure_reports_message_without_status() {
        let raw = json_response(200, r#"{"data":{"x":1}}"#).with_body_error("error decoding response body");

        let response = ClientResponse::classify(&raw);

        let errors = response.errors.unwrap();
        assert!(errors.network_status_code.is_none());
        assert_eq!(errors.message, "error decoding response body");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_body_read_failure_on_error_status_uses_status_text() {
        let raw = json_response(502, "").with_body_error("connection reset");

        let errors = ClientResponse::classify(&raw).errors.unwrap();
        assert_eq!(errors.network_status_code, Some(502));
        assert_eq!(errors.message, "Bad Gateway");
    }

    #[test]
    fn test_from_http_error_carries_only_message() {
        let error = HttpError::MaxRetries {
            retries: 2,
            message: "connection refused".to_string(),
        };

        let response = ClientResponse::from_http_error(&error);

        let errors = response.errors.unwrap();
        assert!(errors.network_status_code.is_none());
        assert_eq!(
            errors.message,
            "GraphQL Client: Attempted maximum number of 2 network retries. Last message - connection refused"
        );
        assert!(response.data.is_none());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let response = ClientResponse::classify(&json_response(200, r#"{"errors":[{"message":"bad"}]}"#));

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "errors": {
                    "networkStatusCode": 200,
                    "message": GQL_API_ERROR,
                    "graphQLErrors": [{ "message": "bad" }]
                }
            })
        );
    }

    #[test]
    fn test_data_as_deserializes_typed_view() {
        #[derive(serde::Deserialize)]
        struct Shop {
            name: String,
        }
        #[derive(serde::Deserialize)]
        struct ShopQuery {
            shop: Shop,
        }

        let response = ClientResponse::classify(&json_response(200, r#"{"data":{"shop":{"name":"Snowdevil"}}}"#));
        let typed: ShopQuery = response.data_as().unwrap().unwrap();

        assert_eq!(typed.shop.name, "Snowdevil");
        assert!(ClientResponse::default().data_as::<ShopQuery>().unwrap().is_none());
    }
}
