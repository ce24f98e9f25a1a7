//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Unknown image format
    #[error("Unknown image format")]
    UnknownFormat,

    /// Input too short or otherwise unusable
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// Payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
