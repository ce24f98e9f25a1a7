//! Core utilities for pixmark
//!
//! This crate provides the pieces shared by the client library and the CLI:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with per-field defaults
//! - **Session storage**: A small key-value store that keeps the active image
//!   identifier across invocations
//!
//! # Example
//!
//! ```rust,no_run
//! use pixmark_core::config::Config;
//! use pixmark_core::store::{FileStore, KeyValueStore, SESSION_KEY};
//!
//! let config = Config::load(None).expect("config");
//! let store = FileStore::new(config.schema.session.resolved_store_path());
//!
//! if let Some(id) = store.get(SESSION_KEY).expect("store") {
//!     println!("Active image: {id}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, PresetsConfig, ServiceConfig, SessionConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore, SESSION_KEY};
}
