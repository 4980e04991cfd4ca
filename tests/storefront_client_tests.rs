//! Integration tests for the Storefront API client.
//!
//! Store domains are always turned into `https://` origins, so these tests
//! route requests to the wiremock server through a [`FetchApi`] that swaps
//! the origin before delegating to [`ReqwestFetchApi`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use storefront_api_client::clients::{
    FetchApi, FetchError, HttpRequest, HttpResponse, LogContent, ReqwestFetchApi,
};
use storefront_api_client::{
    ConfigError, GraphqlError, StorefrontClient, StorefrontRequestOptions,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STORE_ORIGIN: &str = "https://test-shop.myshopify.com";

/// Sends every request to the mock server, keeping its path.
struct MockServerFetch {
    mock_origin: String,
    inner: ReqwestFetchApi,
}

impl MockServerFetch {
    fn new(server: &MockServer) -> Self {
        Self {
            mock_origin: server.uri(),
            inner: ReqwestFetchApi::new(),
        }
    }
}

#[async_trait]
impl FetchApi for MockServerFetch {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut request = request.clone();
        request.url = request.url.replacen(STORE_ORIGIN, &self.mock_origin, 1);
        self.inner.fetch(&request).await
    }
}

fn create_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::builder()
        .store_domain("test-shop.myshopify.com")
        .api_version("unstable")
        .public_access_token("public-token")
        .client_name("integration-tests")
        .fetch_api(MockServerFetch::new(server))
        .build()
        .unwrap()
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_store_domain_is_normalized_to_https_origin() {
    for domain in [
        "test-shop.myshopify.com",
        " https://test-shop.myshopify.com/ ",
        "http://test-shop.myshopify.com/some/path?x=1",
    ] {
        let client = StorefrontClient::builder()
            .store_domain(domain)
            .api_version("unstable")
            .public_access_token("public-token")
            .build()
            .unwrap();

        assert_eq!(client.config().store_domain().as_ref(), STORE_ORIGIN);
        assert_eq!(
            client.config().api_url(),
            "https://test-shop.myshopify.com/api/unstable/graphql.json"
        );
    }
}

#[test]
fn test_build_errors_name_the_storefront_client() {
    let error = StorefrontClient::builder()
        .store_domain("test-shop.myshopify.com")
        .api_version("unstable")
        .build()
        .unwrap_err();

    assert_eq!(error, ConfigError::MissingAccessToken);
    assert_eq!(
        error.to_string(),
        "Storefront API Client: a public or private access token must be provided"
    );
}

#[test]
fn test_private_token_client_uses_private_header() {
    let client = StorefrontClient::builder()
        .store_domain("test-shop.myshopify.com")
        .api_version("unstable")
        .private_access_token("private-token")
        .build()
        .unwrap();

    let headers = client.config().headers();
    assert_eq!(
        headers.get("Shopify-Storefront-Private-Token"),
        Some(&"private-token".to_string())
    );
    assert!(!headers.contains_key("X-Shopify-Storefront-Access-Token"));
}

#[test]
fn test_unsupported_version_event_reaches_logger() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let client = StorefrontClient::builder()
        .store_domain("test-shop.myshopify.com")
        .api_version("2019-01")
        .public_access_token("public-token")
        .logger(move |content: &LogContent<'_>| {
            if let LogContent::UnsupportedApiVersion {
                api_version,
                supported_api_versions,
            } = content
            {
                sink.lock()
                    .unwrap()
                    .push((api_version.to_string(), supported_api_versions.len()));
            }
        })
        .build()
        .unwrap();

    assert_eq!(client.config().api_version().as_ref(), "2019-01");
    assert_eq!(*events.lock().unwrap(), vec![("2019-01".to_string(), 6)]);
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_request_sends_storefront_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/unstable/graphql.json"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(header("X-SDK-Variant", "storefront-api-client"))
        .and(header("X-SDK-Variant-Source", "integration-tests"))
        .and(header("X-Shopify-Storefront-Access-Token", "public-token"))
        .and(body_json(json!({
            "query": "query Product($handle: String!) { product(handle: $handle) { title } }",
            "variables": { "handle": "snowboard" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": { "title": "Snowboard" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = create_client(&server)
        .request(
            "query Product($handle: String!) { product(handle: $handle) { title } }",
            &StorefrontRequestOptions::new().variables(json!({ "handle": "snowboard" })),
        )
        .await
        .unwrap();

    assert!(response.is_ok());

    #[derive(serde::Deserialize)]
    struct Product {
        title: String,
    }
    #[derive(serde::Deserialize)]
    struct ProductQuery {
        product: Product,
    }
    let typed: ProductQuery = response.data_as().unwrap().unwrap();
    assert_eq!(typed.product.title, "Snowboard");
}

#[tokio::test]
async fn test_request_with_api_version_and_custom_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2019-01/graphql.json"))
        .and(header("Shopify-Storefront-Buyer-IP", "192.0.2.1"))
        .and(header("X-Shopify-Storefront-Access-Token", "public-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "shop": {} } })))
        .expect(1)
        .mount(&server)
        .await;

    let options = StorefrontRequestOptions::new()
        .api_version("2019-01")
        .custom_header("Shopify-Storefront-Buyer-IP", "192.0.2.1");
    let response = create_client(&server)
        .request("{ shop { name } }", &options)
        .await
        .unwrap();

    assert!(response.is_ok());
}

#[tokio::test]
async fn test_request_reports_missing_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = create_client(&server)
        .request("{ shop { name } }", &StorefrontRequestOptions::new())
        .await
        .unwrap();

    let errors = response.errors.unwrap();
    assert_eq!(errors.network_status_code, Some(200));
    assert_eq!(
        errors.message,
        "GraphQL Client: An unknown error has occurred. The API did not return a data object or any errors in its response."
    );
}

#[tokio::test]
async fn test_request_retries_rate_limited_response_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "shop": {} } })))
        .expect(1)
        .mount(&server)
        .await;

    let response = create_client(&server)
        .request(
            "{ shop { name } }",
            &StorefrontRequestOptions::new().retries(1),
        )
        .await
        .unwrap();

    assert!(response.is_ok());
}

#[tokio::test]
async fn test_request_returns_rate_limited_response_without_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let response = create_client(&server)
        .request("{ shop { name } }", &StorefrontRequestOptions::new())
        .await
        .unwrap();

    let errors = response.errors.unwrap();
    assert_eq!(errors.network_status_code, Some(429));
    assert_eq!(errors.message, "Too Many Requests");
}

#[tokio::test]
async fn test_fetch_rejects_invalid_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = create_client(&server)
        .fetch("{ x }", &StorefrontRequestOptions::new().retries(-1))
        .await;

    assert!(matches!(
        result,
        Err(GraphqlError::Config(ConfigError::InvalidRetries { retries: -1 }))
    ));
}

#[test]
fn test_storefront_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontClient>();
}
