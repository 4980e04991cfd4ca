//! Read-only configuration of a [`StorefrontClient`](super::StorefrontClient).

use std::collections::HashMap;

use crate::clients::storefront::StorefrontToken;
use crate::clients::SDK_VERSION;
use crate::config::{merge_headers, ApiVersion, Retries, StoreDomain};

/// Default content type for requests and accepted responses.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Value of the [`SDK_VARIANT_HEADER`].
pub const DEFAULT_SDK_VARIANT: &str = "storefront-api-client";

/// Header naming the SDK flavour.
pub const SDK_VARIANT_HEADER: &str = "X-SDK-Variant";

/// Header carrying the SDK version.
pub const SDK_VERSION_HEADER: &str = "X-SDK-Version";

/// Header carrying the caller-supplied client name.
pub const SDK_VARIANT_SOURCE_HEADER: &str = "X-SDK-Variant-Source";

/// Returns the GraphQL endpoint of a store for an API version.
///
/// # Example
///
/// ```rust
/// use storefront_api_client::{ApiVersion, StoreDomain};
/// use storefront_api_client::clients::storefront::api_url;
///
/// let domain = StoreDomain::new("my-shop.myshopify.com").unwrap();
/// let version = ApiVersion::new("2024-10").unwrap();
///
/// assert_eq!(
///     api_url(&domain, &version),
///     "https://my-shop.myshopify.com/api/2024-10/graphql.json"
/// );
/// ```
#[must_use]
pub fn api_url(store_domain: &StoreDomain, api_version: &ApiVersion) -> String {
    format!("{store_domain}/api/{api_version}/graphql.json")
}

/// Configuration of a Storefront client, fixed at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorefrontClientConfig {
    store_domain: StoreDomain,
    api_version: ApiVersion,
    access_token: StorefrontToken,
    client_name: Option<String>,
    headers: HashMap<String, String>,
    api_url: String,
    retries: Retries,
}

// Verify StorefrontClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontClientConfig>();
};

impl StorefrontClientConfig {
    pub(crate) fn new(
        store_domain: StoreDomain,
        api_version: ApiVersion,
        access_token: StorefrontToken,
        client_name: Option<String>,
        retries: Retries,
    ) -> Self {
        let headers = base_headers(&access_token, client_name.as_deref());
        let api_url = api_url(&store_domain, &api_version);
        Self {
            store_domain,
            api_version,
            access_token,
            client_name,
            headers,
            api_url,
            retries,
        }
    }

    /// Returns the store origin, such as `https://my-shop.myshopify.com`.
    #[must_use]
    pub const fn store_domain(&self) -> &StoreDomain {
        &self.store_domain
    }

    /// Returns the default API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &StorefrontToken {
        &self.access_token
    }

    /// Returns the client name, if one was given.
    #[must_use]
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the default endpoint URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the default retry budget.
    #[must_use]
    pub const fn retries(&self) -> Retries {
        self.retries
    }

    /// Returns `custom_headers` overlaid with the base headers.
    ///
    /// Base headers win per key, compared case-insensitively, so custom
    /// headers can only add new names.
    #[must_use]
    pub fn headers_with(&self, custom_headers: Option<&HashMap<String, String>>) -> HashMap<String, String> {
        custom_headers.map_or_else(
            || self.headers.clone(),
            |custom| merge_headers(custom, &self.headers),
        )
    }
}

fn base_headers(access_token: &StorefrontToken, client_name: Option<&str>) -> HashMap<String, String> {
    let user_agent_prefix = client_name.map_or(String::new(), |name| format!("{name} | "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    let user_agent = format!("{user_agent_prefix}Storefront API Client v{SDK_VERSION} | Rust {rust_version}");

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string());
    headers.insert("Accept".to_string(), DEFAULT_CONTENT_TYPE.to_string());
    headers.insert(SDK_VARIANT_HEADER.to_string(), DEFAULT_SDK_VARIANT.to_string());
    headers.insert(SDK_VERSION_HEADER.to_string(), SDK_VERSION.to_string());
    headers.insert("User-Agent".to_string(), user_agent);
    if let Some(name) = client_name {
        headers.insert(SDK_VARIANT_SOURCE_HEADER.to_string(), name.to_string());
    }
    headers.insert(
        access_token.header_name().to_string(),
        access_token.header_value().to_string(),
    );
    headers
}
