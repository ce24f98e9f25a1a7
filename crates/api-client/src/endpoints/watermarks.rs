//! Watermark endpoints: asset upload and application

use super::images::WATERMARK_SEGMENT;
use super::Route;
use crate::session::SizePreset;
use serde::{Deserialize, Serialize};

/// `POST /v1/uploadWatermark`
#[must_use]
pub fn upload() -> Route {
    Route::v1(["uploadWatermark"])
}

/// `POST /v1/health/{size}/water`
#[must_use]
pub fn apply(preset: &SizePreset) -> Route {
    Route::v1(["health", preset.as_str(), WATERMARK_SEGMENT])
}

/// Watermark asset upload body; `base64image` holds bare base64
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadWatermarkRequest {
    /// Base64 payload without a `data:` prefix
    #[serde(rename = "base64image")]
    pub base64_image: String,
    /// Label the backend stores the asset under
    #[serde(rename = "imagename")]
    pub image_name: String,
}

/// Watermark asset upload success body
///
/// `imageName` is echoed back by the service but not tracked by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadWatermarkResponse {
    /// Human-readable outcome
    #[serde(default)]
    pub status: Option<String>,
    /// Echo of the submitted name
    #[serde(rename = "imageName", default)]
    pub image_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        let preset = SizePreset::parse("medium").unwrap();
        assert_eq!(upload().path(), "/v1/uploadWatermark");
        assert_eq!(apply(&preset).path(), "/v1/health/medium/water");
    }

    #[test]
    fn test_wire_names() {
        let body = serde_json::to_value(UploadWatermarkRequest {
            base64_image: "AAAA".to_string(),
            image_name: "logo".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "base64image": "AAAA", "imagename": "logo" }));
    }
}
