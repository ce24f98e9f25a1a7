//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Backend connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Where the active session is kept
    #[serde(default)]
    pub session: SessionConfig,

    /// Size presets offered to the user
    #[serde(default)]
    pub presets: PresetsConfig,
}

/// Image service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the image service (without the `/v1` prefix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Path of the session store file
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl SessionConfig {
    /// The configured store path, or the platform data directory default
    #[must_use]
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from(".pixmark"))
        .join("pixmark")
        .join("session.json")
}

/// Size preset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Preset used when none is given
    #[serde(default = "default_preset")]
    pub default: String,

    /// Presets the backend is known to accept; empty disables the check
    #[serde(default = "default_allowed_presets")]
    pub allowed: Vec<String>,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            default: default_preset(),
            allowed: default_allowed_presets(),
        }
    }
}

fn default_preset() -> String {
    "medium".to_string()
}

fn default_allowed_presets() -> Vec<String> {
    vec!["small", "medium", "large"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl PresetsConfig {
    /// Pick the requested preset (or the default) and check it against `allowed`
    pub fn resolve(&self, requested: Option<&str>) -> Result<String> {
        let preset = requested.map_or(self.default.as_str(), str::trim);

        if preset.is_empty() {
            return Err(Error::validation("Size preset cannot be empty"));
        }

        if !self.allowed.is_empty() && !self.allowed.iter().any(|p| p == preset) {
            return Err(Error::unknown_preset(preset, &self.allowed));
        }

        Ok(preset.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_resolve_uses_default() {
        let presets = PresetsConfig::default();
        assert_eq!(presets.resolve(None).unwrap(), "medium");
    }

    #[test]
    fn test_resolve_accepts_allowed() {
        let presets = PresetsConfig::default();
        assert_eq!(presets.resolve(Some("large")).unwrap(), "large");
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        let presets = PresetsConfig::default();
        let err = presets.resolve(Some("gigantic")).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownPreset);
    }

    #[test]
    fn test_resolve_open_set() {
        let presets = PresetsConfig {
            default: "thumb".to_string(),
            allowed: Vec::new(),
        };
        assert_eq!(presets.resolve(Some("poster")).unwrap(), "poster");
    }

    #[test]
    fn test_resolve_rejects_blank() {
        let presets = PresetsConfig::default();
        assert!(presets.resolve(Some("  ")).is_err());
    }

    #[test]
    fn test_store_path_override() {
        let session = SessionConfig {
            store_path: Some(PathBuf::from("/tmp/pixmark-test.json")),
        };
        assert_eq!(
            session.resolved_store_path(),
            PathBuf::from("/tmp/pixmark-test.json")
        );
        assert!(SessionConfig::default()
            .resolved_store_path()
            .ends_with("pixmark/session.json"));
    }
}
