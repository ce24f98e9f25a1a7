//! Key-value storage for the active session
//!
//! The client keeps exactly one piece of state between invocations: the
//! identifier of the last uploaded image. It lives under [`SESSION_KEY`] in a
//! small JSON object so it survives restarts until the file is cleared.
//!
//! There is deliberately no removal operation.

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed key under which the active image identifier is stored
pub const SESSION_KEY: &str = "imageID";

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Read a value; a missing key is `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// On-disk layout of the store file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// JSON file backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at `path`; nothing is touched until the first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::from(e).with_context(format!("Reading {}", self.path.display()))
        })?;

        if content.trim().is_empty() {
            return Ok(StoreFile::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| Error::storage_corrupt(&self.path).with_source(e))
    }

    fn write_file(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::new(
                        ErrorCode::StorageWriteFailed,
                        format!("Failed to create {}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        let content = serde_json::to_string_pretty(file)
            .map_err(|e| Error::storage(format!("Failed to serialize session: {e}")))?;

        // Write a sibling first so a crash never leaves a half-written store.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| {
            Error::new(
                ErrorCode::StorageWriteFailed,
                format!("Failed to write {}: {}", tmp.display(), e),
            )
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            Error::new(
                ErrorCode::StorageWriteFailed,
                format!("Failed to replace {}: {}", self.path.display(), e),
            )
        })?;

        debug!(path = %self.path.display(), "Session store written");
        Ok(())
    }

    /// When the store was last written, if it records that
    pub fn updated_at(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        Ok(self.read_file()?.updated_at)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_file()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.read_file()?;
        file.entries.insert(key.to_string(), value.to_string());
        file.updated_at = Some(chrono::Utc::now());
        self.write_file(&file)
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
