//! The session workflow: upload, resize, watermark, preview
//!
//! Each operation is one request/response exchange awaited to completion.
//! Local checks (input present, session active) run first and fail without
//! touching the transport. Session state is only ever changed by a
//! successful upload.

use crate::endpoints::health::{self, HealthResponse};
use crate::endpoints::images::{self, ImageRef, UploadImageRequest, UploadImageResponse};
use crate::endpoints::watermarks::{self, UploadWatermarkRequest, UploadWatermarkResponse};
use crate::endpoints::StatusResponse;
use crate::error::{ApiError, ApiResult};
use crate::preview::PreviewImage;
use crate::session::{ArtifactVariant, ImageId, ImageSession, SizePreset};
use crate::transport::{RawResponse, Transport};
use pixmark_image::{to_base64, to_data_url, OCTET_STREAM};
use tracing::{info, instrument, warn};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Result of a successful image upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Identifier now held by the session
    pub image_id: ImageId,
    /// Identifier the session held before, now unrecoverable through it
    pub replaced: Option<ImageId>,
    /// Status line from the service
    pub status: String,
}

/// Sequences the image service operations over a [`Transport`]
#[derive(Debug, Clone)]
pub struct Workflow<T> {
    transport: T,
}

impl<T: Transport> Workflow<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload a source image and make it the session's active image
    ///
    /// The bytes are sent as a `data:` URL. A success response without an
    /// `imageID` is a protocol error and leaves the session untouched.
    #[instrument(skip_all, fields(bytes = file.map(<[u8]>::len)))]
    pub async fn upload_image(
        &self,
        session: &mut ImageSession,
        file: Option<&[u8]>,
    ) -> ApiResult<UploadOutcome> {
        let bytes = require_file(file, "Please select an image")?;

        let request = UploadImageRequest {
            base64_image: to_data_url(bytes),
        };
        let response = self
            .transport
            .post_json(&images::upload(), serde_json::to_value(&request)?)
            .await?;

        if !response.is_success() {
            warn!(status = response.status, "Image upload rejected");
            return Err(ApiError::Upload {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| "Error uploading the image".to_string()),
            });
        }

        let body: UploadImageResponse = response
            .json()
            .map_err(|_| ApiError::protocol("upload response is not valid JSON"))?;
        let image_id = body
            .image_id
            .and_then(ImageId::new)
            .ok_or_else(|| ApiError::protocol("No image ID received after upload"))?;

        let status = body
            .status
            .unwrap_or_else(|| format!("{image_id} uploaded successfully"));
        let replaced = session.replace(image_id.clone());

        info!(image_id = %image_id, replaced = replaced.is_some(), "Image uploaded");
        Ok(UploadOutcome {
            image_id,
            replaced,
            status,
        })
    }

    /// Ask the service to resize the active image to `preset`
    #[instrument(skip(self, session, preset), fields(preset = %preset))]
    pub async fn resize_image(
        &self,
        session: &ImageSession,
        preset: &SizePreset,
    ) -> ApiResult<String> {
        let id = session.require_image_id()?;

        let response = self
            .transport
            .post_json(&images::resize(preset), serde_json::to_value(ImageRef::from(id))?)
            .await?;

        if !response.is_success() {
            warn!(status = response.status, image_id = %id, "Resize rejected");
            return Err(ApiError::Resize {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            });
        }

        let status = status_of(&response)?;
        info!(image_id = %id, "Image resized");
        Ok(status)
    }

    /// Upload a watermark asset under `name`
    ///
    /// The bytes are sent as bare base64. Any identifier the service returns
    /// is not tracked.
    #[instrument(skip(self, file), fields(bytes = file.map(<[u8]>::len)))]
    pub async fn upload_watermark(
        &self,
        file: Option<&[u8]>,
        name: Option<&str>,
    ) -> ApiResult<String> {
        let bytes = require_file(file, "Please select a watermark image")?;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::input("Please enter a watermark image name"))?;

        let request = UploadWatermarkRequest {
            base64_image: to_base64(bytes),
            image_name: name.to_string(),
        };
        let response = self
            .transport
            .post_json(&watermarks::upload(), serde_json::to_value(&request)?)
            .await?;

        if !response.is_success() {
            warn!(status = response.status, "Watermark upload rejected");
            return Err(ApiError::Upload {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| "Error uploading the watermark image".to_string()),
            });
        }

        let body: UploadWatermarkResponse = response
            .json()
            .map_err(|_| ApiError::protocol("watermark upload response is not valid JSON"))?;
        let status = body
            .status
            .unwrap_or_else(|| format!("Watermark image {name} uploaded successfully"));

        info!(name, "Watermark uploaded");
        Ok(status)
    }

    /// Composite the stored watermark onto the active image's `preset` variant
    #[instrument(skip(self, session, preset), fields(preset = %preset))]
    pub async fn apply_watermark(
        &self,
        session: &ImageSession,
        preset: &SizePreset,
    ) -> ApiResult<String> {
        let id = session.require_image_id()?;

        let response = self
            .transport
            .post_json(&watermarks::apply(preset), serde_json::to_value(ImageRef::from(id))?)
            .await?;

        if !response.is_success() {
            warn!(status = response.status, image_id = %id, "Watermark rejected");
            return Err(ApiError::Watermark {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            });
        }

        let status = status_of(&response)?;
        info!(image_id = %id, "Watermark applied");
        Ok(status)
    }

    /// Retrieve the `variant` artifact of the active image at `preset`
    #[instrument(skip(self, session, preset, variant), fields(preset = %preset, variant = %variant))]
    pub async fn preview(
        &self,
        session: &ImageSession,
        preset: &SizePreset,
        variant: ArtifactVariant,
    ) -> ApiResult<PreviewImage> {
        let id = session.require_image_id()?;

        let response = self
            .transport
            .get(&images::preview(id, preset, variant))
            .await?;

        if !response.is_success() {
            warn!(status = response.status, image_id = %id, "Preview fetch rejected");
            return Err(ApiError::Fetch {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| "Error fetching the image".to_string()),
            });
        }

        let content_type = response
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| OCTET_STREAM.to_string());

        Ok(PreviewImage {
            bytes: response.body,
            content_type,
        })
    }

    /// Probe the service's liveness route
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> ApiResult<String> {
        let response = self.transport.get(&health::check()).await?;

        if !response.is_success() {
            return Err(ApiError::Fetch {
                status: response.status,
                message: response
                    .error_text()
                    .unwrap_or_else(|| "Health check failed".to_string()),
            });
        }

        let body: HealthResponse = response
            .json()
            .map_err(|_| ApiError::protocol("health response has no message"))?;
        Ok(body.message)
    }
}

fn require_file<'a>(file: Option<&'a [u8]>, message: &str) -> ApiResult<&'a [u8]> {
    match file {
        Some([]) => Err(ApiError::input("The selected file is empty")),
        Some(bytes) => Ok(bytes),
        None => Err(ApiError::input(message)),
    }
}

fn status_of(response: &RawResponse) -> ApiResult<String> {
    response
        .json::<StatusResponse>()
        .ok()
        .and_then(|b| b.status)
        .ok_or_else(|| ApiError::protocol("success response has no status"))
}
