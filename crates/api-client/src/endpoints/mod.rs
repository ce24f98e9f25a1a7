//! Routes and wire types for the image service
//!
//! ## Backend surface
//!
//! | Action | Method | Path |
//! |--------|--------|------|
//! | Liveness | GET | `/v1/health` |
//! | Upload image | POST | `/v1/health` |
//! | Resize image | POST | `/v1/health/{size}` |
//! | Upload watermark asset | POST | `/v1/uploadWatermark` |
//! | Apply watermark | POST | `/v1/health/{size}/water` |
//! | Preview resized | GET | `/v1/health/{imageID}/{size}` |
//! | Preview watermarked | GET | `/v1/health/{imageID}/{size}/water` |

pub mod health;
pub mod images;
pub mod watermarks;

use serde::Deserialize;
use std::fmt;

/// API version prefix shared by every route
pub const API_VERSION: &str = "v1";

/// A request path as a list of unescaped segments
///
/// Segments are percent-encoded by the transport, so identifiers containing
/// reserved characters cannot change the shape of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    segments: Vec<String>,
}

impl Route {
    /// A route under the `/v1` prefix
    pub fn v1<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = std::iter::once(API_VERSION.to_string())
            .chain(segments.into_iter().map(Into::into))
            .collect();
        Self { segments }
    }

    /// The unescaped segments
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Slash-joined path, for logging and tests
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Generic success body: `{ "status": "..." }`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Human-readable outcome
    #[serde(default)]
    pub status: Option<String>,
}

/// Generic failure body: `{ "error": "..." }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Backend error text
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path() {
        let route = Route::v1(["health", "small", "water"]);
        assert_eq!(route.path(), "/v1/health/small/water");
        assert_eq!(route.segments().len(), 4);
        assert_eq!(route.to_string(), route.path());
    }

    #[test]
    fn test_error_body_lenient() {
        let body: ErrorBody = serde_json::from_str(r#"{"status":"nope"}"#).unwrap();
        assert!(body.error.is_none());
    }
}
