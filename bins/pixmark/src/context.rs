//! Resolved settings shared by every command
//!
//! Precedence for each setting: command-line flag, then environment, then
//! config file, then built-in default.

use pixmark_api_client::{ClientConfig, ImageSession, PixmarkClient, SizePreset, Workflow};
use pixmark_cli::OutputFormat;
use pixmark_core::config::Config;
use pixmark_core::store::FileStore;
use pixmark_core::{Error, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global flags as parsed from the command line
pub struct GlobalArgs {
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub store: Option<PathBuf>,
    pub format: OutputFormat,
}

pub struct AppContext {
    pub config: Config,
    pub client: ClientConfig,
    pub store_path: PathBuf,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn resolve(args: &GlobalArgs) -> anyhow::Result<Self> {
        let config = Config::load(args.config.as_deref())?;

        let mut client = ClientConfig::from_schema(&config.schema.service).with_env_overrides();
        if let Some(url) = &args.base_url {
            client = client.with_base_url(url.clone());
        }

        let store_path = args
            .store
            .clone()
            .unwrap_or_else(|| config.schema.session.resolved_store_path());

        debug!(
            config = ?config.path,
            base_url = %client.base_url,
            store = %store_path.display(),
            "Resolved settings"
        );

        Ok(Self {
            config,
            client,
            store_path,
            format: args.format,
        })
    }

    pub fn workflow(&self) -> anyhow::Result<Workflow<PixmarkClient>> {
        Ok(PixmarkClient::with_config(self.client.clone())?.into_workflow())
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    pub fn load_session(&self) -> anyhow::Result<ImageSession> {
        Ok(ImageSession::load(&self.store())?)
    }

    /// Write the session back only when an operation changed it
    pub fn save_session(&self, before: &ImageSession, after: &ImageSession) -> anyhow::Result<()> {
        if before != after {
            after.persist(&mut self.store())?;
            debug!(store = %self.store_path.display(), "Session saved");
        }
        Ok(())
    }

    /// The requested preset, or the configured default, checked against the allowed list
    pub fn preset(&self, requested: Option<&str>) -> anyhow::Result<SizePreset> {
        let name = self.config.schema.presets.resolve(requested)?;
        Ok(SizePreset::parse(&name)?)
    }
}

/// Read a user-selected file; `None` passes through so the workflow can reject it
pub fn read_input(path: Option<&Path>) -> pixmark_core::Result<Option<Vec<u8>>> {
    path.map(|p| match std::fs::read(p) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::file_not_found(p)),
        Err(e) => Err(Error::from(e)).context(format!("Reading {}", p.display())),
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixmark_api_client::ImageId;

    fn context(dir: &Path) -> AppContext {
        AppContext {
            config: Config::default(),
            client: ClientConfig::default(),
            store_path: dir.join("session.json"),
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_save_session_only_when_changed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let empty = ImageSession::new();
        ctx.save_session(&empty, &empty).unwrap();
        assert!(!ctx.store_path.exists());

        let active = ImageSession::with_image_id(ImageId::new("abc123").unwrap());
        ctx.save_session(&empty, &active).unwrap();
        assert_eq!(ctx.load_session().unwrap(), active);
    }

    #[test]
    fn test_preset_defaults_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        assert_eq!(ctx.preset(None).unwrap().as_str(), "medium");
        assert_eq!(ctx.preset(Some("large")).unwrap().as_str(), "large");
        assert!(ctx.preset(Some("huge")).is_err());
    }

    #[test]
    fn test_read_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_input(None).unwrap().is_none());

        let missing = dir.path().join("missing.png");
        let err = read_input(Some(&missing)).unwrap_err();
        assert_eq!(err.code, pixmark_core::ErrorCode::FileNotFound);

        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"\x89PNG").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap().unwrap(), b"\x89PNG");
    }
}
