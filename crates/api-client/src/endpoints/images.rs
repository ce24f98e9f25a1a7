//! Source image endpoints: upload, resize, preview

use super::Route;
use crate::session::{ArtifactVariant, ImageId, SizePreset};
use serde::{Deserialize, Serialize};

/// Path segment marking the watermark branch
pub const WATERMARK_SEGMENT: &str = "water";

/// `POST /v1/health`
#[must_use]
pub fn upload() -> Route {
    Route::v1(["health"])
}

/// `POST /v1/health/{size}`
#[must_use]
pub fn resize(preset: &SizePreset) -> Route {
    Route::v1(["health", preset.as_str()])
}

/// `GET /v1/health/{imageID}/{size}` or `GET /v1/health/{imageID}/{size}/water`
#[must_use]
pub fn preview(id: &ImageId, preset: &SizePreset, variant: ArtifactVariant) -> Route {
    let mut segments = vec!["health", id.as_str(), preset.as_str()];
    if variant == ArtifactVariant::Watermarked {
        segments.push(WATERMARK_SEGMENT);
    }
    Route::v1(segments)
}

/// Upload request body; `base64image` holds a full `data:` URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImageRequest {
    /// Data URL of the image
    #[serde(rename = "base64image")]
    pub base64_image: String,
}

/// Upload success body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadImageResponse {
    /// Identifier assigned to the upload
    #[serde(rename = "imageID", default)]
    pub image_id: Option<String>,
    /// Human-readable outcome
    #[serde(default)]
    pub status: Option<String>,
}

/// Body for any request that names the active image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Active image identifier
    #[serde(rename = "imageID")]
    pub image_id: String,
}

impl From<&ImageId> for ImageRef {
    fn from(id: &ImageId) -> Self {
        Self {
            image_id: id.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(name: &str) -> SizePreset {
        SizePreset::parse(name).unwrap()
    }

    #[test]
    fn test_routes() {
        let id = ImageId::new("image_20240101_120000").unwrap();

        assert_eq!(upload().path(), "/v1/health");
        assert_eq!(resize(&preset("small")).path(), "/v1/health/small");
        assert_eq!(
            preview(&id, &preset("large"), ArtifactVariant::Resized).path(),
            "/v1/health/image_20240101_120000/large"
        );
        assert_eq!(
            preview(&id, &preset("large"), ArtifactVariant::Watermarked).path(),
            "/v1/health/image_20240101_120000/large/water"
        );
    }

    #[test]
    fn test_wire_names() {
        let body = serde_json::to_value(UploadImageRequest {
            base64_image: "data:image/png;base64,AA==".to_string(),
        })
        .unwrap();
        assert_eq!(body["base64image"], "data:image/png;base64,AA==");

        let id = ImageId::new("abc123").unwrap();
        let body = serde_json::to_value(ImageRef::from(&id)).unwrap();
        assert_eq!(body, serde_json::json!({ "imageID": "abc123" }));
    }

    #[test]
    fn test_upload_response_missing_id() {
        let response: UploadImageResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(response.image_id.is_none());
        assert_eq!(response.status.as_deref(), Some("ok"));
    }
}
