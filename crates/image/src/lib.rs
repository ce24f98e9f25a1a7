//! Image helpers for pixmark.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Upload payload encoding (data URLs and bare base64)

#![warn(missing_docs)]

mod detect;
mod encode;
mod error;

pub use detect::{detect_format, mime_for, extension_for_mime, ImageFormat, OCTET_STREAM};
pub use encode::{decode_payload, strip_data_url_prefix, to_base64, to_data_url};
pub use error::{ImageError, Result};
