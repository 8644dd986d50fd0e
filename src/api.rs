use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response};
use std::sync::Arc;

use crate::config::Config;
use crate::models::{Item, MapLayer};

/// Fixed backend path for map layer deletion
pub const MAP_LAYER_DELETE: &str = "/maps-manager/delete";

/// Bytes left untouched by `encodeURIComponent`: alphanumerics and `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component (UTF-8, uppercase hex)
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Request path for deleting `item` under `base_path`
pub fn delete_item_path(base_path: &str, item: &Item) -> String {
    format!("{}?url={}", base_path, encode_component(&item.url))
}

/// Request path for deleting a single map layer
pub fn delete_map_layer_path(layer: &MapLayer) -> String {
    format!(
        "{}?url={}&layer={}",
        MAP_LAYER_DELETE,
        encode_component(&layer.url),
        encode_component(&layer.layer)
    )
}

/// True for `scheme://...` where the scheme is a letter followed by letters,
/// digits, `+`, `-` or `.`
fn has_scheme(path: &str) -> bool {
    let Some((scheme, rest)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && rest.starts_with("//")
}

/// Shareable HTTP client for the library backend
///
/// Holds one `reqwest::Client` preconfigured with the JSON content type and
/// the backend base URL. Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: Arc::from(base_url),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(config.backend_url.clone())?;
        tracing::info!("Library backend client ready for {}", config.backend_url);
        Ok(client)
    }

    /// Resolve a request path against the base URL
    ///
    /// Paths with any scheme (`scheme://`, case-insensitive) are used as-is.
    /// Protocol-relative `//host/...` paths take the base URL's scheme.
    /// Otherwise exactly one `/` separates the base from the path.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("//") {
            let scheme = self.base_url.split_once(':').map_or("http", |(scheme, _)| scheme);
            return format!("{}:{}", scheme, path);
        }
        if has_scheme(path) {
            return path.to_string();
        }
        if path.is_empty() {
            return self.base_url.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Check the backend origin answers at all; any HTTP status counts
    pub async fn ping(&self) -> reqwest::Result<reqwest::StatusCode> {
        let response = self.http.get(&*self.base_url).send().await?;
        Ok(response.status())
    }

    /// GET a collection from the backend
    pub async fn fetch_items(&self, path: &str) -> reqwest::Result<Response> {
        self.send(Method::GET, path).await
    }

    /// DELETE an item under `base_path`, identified by its URL
    pub async fn delete_item(&self, base_path: &str, item: &Item) -> reqwest::Result<Response> {
        self.send(Method::DELETE, &delete_item_path(base_path, item))
            .await
    }

    /// DELETE one layer from a map
    pub async fn delete_map_layer(&self, layer: &MapLayer) -> reqwest::Result<Response> {
        self.send(Method::DELETE, &delete_map_layer_path(layer)).await
    }

    async fn send(&self, method: Method, path: &str) -> reqwest::Result<Response> {
        let url = self.resolve_url(path);
        tracing::debug!("{} {}", method, url);

        let result = self
            .http
            .request(method.clone(), &url)
            .send()
            .await
            .and_then(Response::error_for_status);

        if let Err(e) = &result {
            tracing::warn!("Backend request {} {} failed: {}", method, url, e);
        }
        result
    }
}
