//! HTTP transport for the image service

use crate::config::ClientConfig;
use crate::endpoints::Route;
use crate::error::{ApiError, ApiResult};
use crate::transport::{RawResponse, Transport};
use crate::workflow::Workflow;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder, Url};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// pixmark HTTP client
///
/// A thin `reqwest` wrapper: one request per call, every request tagged with
/// a fresh correlation ID. Cheap to clone.
#[derive(Clone)]
pub struct PixmarkClient {
    inner: Client,
    base: Url,
    config: Arc<ClientConfig>,
}

impl PixmarkClient {
    /// Create a new client with defaults and environment overrides
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json, image/*"));
        if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
            default_headers.insert(USER_AGENT, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            base,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Wrap this client in the session workflow
    #[must_use]
    pub fn into_workflow(self) -> Workflow<Self> {
        Workflow::new(self)
    }

    /// Absolute URL for a route, percent-encoding each segment
    pub fn url_for(&self, route: &Route) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(route.segments());
        Ok(url)
    }

    /// Send a prepared request and collect the whole response
    async fn execute(&self, method: &'static str, route: &Route, request: RequestBuilder) -> ApiResult<RawResponse> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        debug!(request_id = %request_id, method, route = %route, "Sending request");

        let response = match request.header(X_REQUEST_ID, &request_id).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(request_id = %request_id, route = %route, error = %e, "Request failed");
                return Err(ApiError::Request(e));
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        debug!(
            request_id = %request_id,
            route = %route,
            status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

impl Transport for PixmarkClient {
    async fn post_json(&self, route: &Route, body: serde_json::Value) -> ApiResult<RawResponse> {
        let url = self.url_for(route)?;
        let request = self.inner.post(url).json(&body);
        self.execute("POST", route, request).await
    }

    async fn get(&self, route: &Route) -> ApiResult<RawResponse> {
        let url = self.url_for(route)?;
        let request = self.inner.get(url);
        self.execute("GET", route, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PixmarkClient {
        PixmarkClient::with_config(ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(PixmarkClient::with_config(ClientConfig::default()).is_ok());
        assert!(PixmarkClient::with_config(ClientConfig::default().with_base_url("nonsense")).is_err());
    }

    #[test]
    fn test_url_for() {
        let route = Route::v1(["health", "small"]);
        assert_eq!(
            client("http://localhost:5000").url_for(&route).unwrap().as_str(),
            "http://localhost:5000/v1/health/small"
        );
        assert_eq!(
            client("https://example.com/images/").url_for(&route).unwrap().as_str(),
            "https://example.com/images/v1/health/small"
        );
    }

    #[test]
    fn test_url_for_escapes_segments() {
        let route = Route::v1(["health", "a/b?c", "small"]);
        let url = client("http://localhost:5000").url_for(&route).unwrap();
        assert_eq!(url.path(), "/v1/health/a%2Fb%3Fc/small");
        assert!(url.query().is_none());
    }
}
