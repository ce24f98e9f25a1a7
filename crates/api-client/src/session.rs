//! Session model: the active image identifier and the values that key
//! derived artifacts.

use crate::error::{ApiError, ApiResult};
use pixmark_core::store::{KeyValueStore, SESSION_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message shown when an operation needs a session and there is none
pub const NO_SESSION_MESSAGE: &str = "No image ID found. Please upload an image first.";

/// Opaque backend-issued reference to an uploaded source image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Wrap an identifier; blank strings are not identifiers
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named target size recognised by the backend (e.g. `small`, `medium`, `large`)
///
/// Presets end up as URL path segments, so only ASCII alphanumerics, `-` and
/// `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizePreset(String);

impl SizePreset {
    /// Validate and wrap a preset name
    pub fn parse(name: &str) -> ApiResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::input("Please select a size"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ApiError::input(format!("Invalid size preset: {name}")));
        }
        Ok(Self(name.to_string()))
    }

    /// The preset name as sent to the backend
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SizePreset {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SizePreset {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SizePreset> for String {
    fn from(preset: SizePreset) -> Self {
        preset.0
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derived output keyed by (image, preset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactVariant {
    /// The resized image
    Resized,
    /// The resized image with the watermark composited on
    Watermarked,
}

impl ArtifactVariant {
    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resized => "resized",
            Self::Watermarked => "watermarked",
        }
    }
}

impl fmt::Display for ArtifactVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactVariant {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resized" | "resize" => Ok(Self::Resized),
            "watermarked" | "watermark" | "water" => Ok(Self::Watermarked),
            other => Err(ApiError::input(format!("Unknown preview variant: {other}"))),
        }
    }
}

/// The client's only state: which uploaded image subsequent actions refer to
///
/// Lifecycle: `NoSession --upload--> HasSession --upload--> HasSession`.
/// A new upload replaces the identifier; nothing returns the session to
/// `NoSession`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSession {
    image_id: Option<ImageId>,
}

impl ImageSession {
    /// An empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already pointing at `id`
    #[must_use]
    pub fn with_image_id(id: ImageId) -> Self {
        Self { image_id: Some(id) }
    }

    /// The active identifier, if any
    #[must_use]
    pub fn image_id(&self) -> Option<&ImageId> {
        self.image_id.as_ref()
    }

    /// Whether an upload has succeeded in this session
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.image_id.is_some()
    }

    /// The active identifier, or a [`ApiError::Precondition`]
    pub fn require_image_id(&self) -> ApiResult<&ImageId> {
        self.image_id
            .as_ref()
            .ok_or_else(|| ApiError::precondition(NO_SESSION_MESSAGE))
    }

    /// Point the session at a new image, returning the one it replaced
    pub fn replace(&mut self, id: ImageId) -> Option<ImageId> {
        self.image_id.replace(id)
    }

    /// Restore the session from a key-value store
    pub fn load(store: &dyn KeyValueStore) -> ApiResult<Self> {
        let image_id = store.get(SESSION_KEY)?.and_then(ImageId::new);
        Ok(Self { image_id })
    }

    /// Save the session; an empty session writes nothing
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> ApiResult<()> {
        if let Some(id) = &self.image_id {
            store.set(SESSION_KEY, id.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixmark_core::store::MemoryStore;

    #[test]
    fn test_image_id_rejects_blank() {
        assert!(ImageId::new("").is_none());
        assert!(ImageId::new("  ").is_none());
        assert_eq!(ImageId::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_size_preset_validation() {
        assert_eq!(SizePreset::parse(" large ").unwrap().as_str(), "large");
        assert!(matches!(SizePreset::parse(""), Err(ApiError::Input(_))));
        assert!(SizePreset::parse("../etc").is_err());
        assert!(SizePreset::parse("a b").is_err());
    }

    #[test]
    fn test_size_preset_serde() {
        let preset: SizePreset = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(preset.as_str(), "small");
        assert!(serde_json::from_str::<SizePreset>("\"sm all\"").is_err());
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("resized".parse::<ArtifactVariant>().unwrap(), ArtifactVariant::Resized);
        assert_eq!("Water".parse::<ArtifactVariant>().unwrap(), ArtifactVariant::Watermarked);
        assert!("thumbnail".parse::<ArtifactVariant>().is_err());
    }

    #[test]
    fn test_require_image_id() {
        let session = ImageSession::new();
        let err = session.require_image_id().unwrap_err();
        assert!(matches!(err, ApiError::Precondition(_)));

        let session = ImageSession::with_image_id(ImageId::new("abc123").unwrap());
        assert_eq!(session.require_image_id().unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut session = ImageSession::new();
        assert!(session.replace(ImageId::new("first").unwrap()).is_none());
        let previous = session.replace(ImageId::new("second").unwrap());
        assert_eq!(previous.unwrap().as_str(), "first");
        assert_eq!(session.image_id().unwrap().as_str(), "second");
    }

    #[test]
    fn test_persist_and_load() {
        let mut store = MemoryStore::new();
        ImageSession::new().persist(&mut store).unwrap();
        assert!(store.get(SESSION_KEY).unwrap().is_none());

        let session = ImageSession::with_image_id(ImageId::new("abc123").unwrap());
        session.persist(&mut store).unwrap();

        let restored = ImageSession::load(&store).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_load_ignores_blank_value() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "").unwrap();
        assert!(!ImageSession::load(&store).unwrap().is_active());
    }
}
