//! Request/response seam between the workflow and the network

use crate::endpoints::{ErrorBody, Route};
use crate::error::ApiResult;
use serde::de::DeserializeOwned;
use std::future::Future;

/// One request/response exchange with the image service
///
/// Implementations send exactly one request per call: no retries, no
/// pipelining. [`crate::PixmarkClient`] is the HTTP implementation.
pub trait Transport {
    /// `POST` a JSON body to `route`
    fn post_json(
        &self,
        route: &Route,
        body: serde_json::Value,
    ) -> impl Future<Output = ApiResult<RawResponse>> + Send;

    /// `GET` `route`
    fn get(&self, route: &Route) -> impl Future<Output = ApiResult<RawResponse>> + Send;
}

/// A response as received, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if sent
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// A JSON response, mostly for tests and fakes
    #[must_use]
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Backend-supplied error text from an `{ "error": ... }` body
    ///
    /// Bodies that are not JSON, or carry no non-blank `error`, yield `None`.
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
    }
}
