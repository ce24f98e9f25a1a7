//! Session workflow client for the pixmark image service
//!
//! The service stores uploaded images, produces resized variants at named
//! presets, composites a named watermark onto them, and serves the results.
//! This crate holds the one piece of client state (the active image ID) and
//! sequences those operations against it.
//!
//! # Features
//!
//! - **Session model**: [`ImageSession`] tracks the image every action refers to
//! - **Local validation**: missing input or session fails before any request
//! - **Pluggable transport**: [`Workflow`] runs over any [`Transport`]
//! - **Request correlation**: every HTTP request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use pixmark_api_client::{ClientConfig, ImageSession, PixmarkClient, SizePreset};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workflow = PixmarkClient::with_config(ClientConfig::from_env())?.into_workflow();
//!     let mut session = ImageSession::new();
//!
//!     let photo = std::fs::read("photo.png")?;
//!     let uploaded = workflow.upload_image(&mut session, Some(&photo)).await?;
//!     println!("Uploaded as {}", uploaded.image_id);
//!
//!     let status = workflow.resize_image(&session, &SizePreset::parse("small")?).await?;
//!     println!("{status}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod preview;
pub mod session;
pub mod transport;
pub mod workflow;

pub use client::PixmarkClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use preview::{PreviewImage, PreviewPane};
pub use session::{ArtifactVariant, ImageId, ImageSession, SizePreset, NO_SESSION_MESSAGE};
pub use transport::{RawResponse, Transport};
pub use workflow::{UploadOutcome, Workflow};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::PixmarkClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::preview::{PreviewImage, PreviewPane};
    pub use crate::session::{ArtifactVariant, ImageId, ImageSession, SizePreset};
    pub use crate::transport::Transport;
    pub use crate::workflow::Workflow;
}
