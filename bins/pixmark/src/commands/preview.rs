//! Preview command: fetch derived artifacts and write them to disk

use super::print_json;
use crate::context::AppContext;
use anyhow::{Context, Result};
use clap::ValueEnum;
use pixmark_api_client::{ArtifactVariant, ImageId, PreviewImage, PreviewPane, SizePreset};
use pixmark_cli::output::format_size;
use pixmark_cli::{progress, Status};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Which artifacts to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// The resized image
    Resized,
    /// The watermarked image
    Watermarked,
    /// Both, resized first
    Both,
}

impl Target {
    fn variants(self) -> &'static [ArtifactVariant] {
        match self {
            Self::Resized => &[ArtifactVariant::Resized],
            Self::Watermarked => &[ArtifactVariant::Watermarked],
            Self::Both => &[ArtifactVariant::Resized, ArtifactVariant::Watermarked],
        }
    }
}

/// Fetch the requested variants of the active image into `output`
pub async fn run(ctx: &AppContext, target: Target, size: Option<&str>, output: &Path) -> Result<()> {
    let session = ctx.load_session()?;
    let id = session.require_image_id()?;
    let preset = ctx.preset(size)?;
    let workflow = ctx.workflow()?;

    let mut pane = PreviewPane::new();
    let mut saved = Vec::new();

    for &variant in target.variants() {
        let pb = progress::spinner(&format!("Fetching {variant} image..."));
        let result = workflow.preview(&session, &preset, variant).await;
        progress::finish(&pb);

        let image = result?;
        let path = output.join(file_name(id, &preset, variant, &image));
        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if !ctx.format.is_json() {
            Status::success(&format!(
                "Saved {variant} preview to {} ({}, {})",
                path.display(),
                format_size(image.len() as u64),
                image.content_type
            ));
        }
        saved.push(json!({
            "variant": variant,
            "path": path,
            "content_type": image.content_type,
            "bytes": image.len(),
        }));
        pane.show(image);
    }
    pane.close();

    if ctx.format.is_json() {
        return print_json(&json!({ "imageID": id, "size": preset, "previews": saved }));
    }
    Ok(())
}

/// `<id>_<size>[_watermarked].<ext>`, with anything unsafe in the ID replaced
fn file_name(id: &ImageId, preset: &SizePreset, variant: ArtifactVariant, image: &PreviewImage) -> PathBuf {
    let stem: String = id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let suffix = match variant {
        ArtifactVariant::Resized => String::new(),
        ArtifactVariant::Watermarked => "_watermarked".to_string(),
    };
    PathBuf::from(format!("{stem}_{preset}{suffix}.{}", image.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let id = ImageId::new("img/2024 01").unwrap();
        let preset = SizePreset::parse("small").unwrap();
        let image = PreviewImage {
            bytes: vec![0xFF, 0xD8, 0xFF],
            content_type: "image/jpeg".to_string(),
        };

        assert_eq!(
            file_name(&id, &preset, ArtifactVariant::Resized, &image),
            PathBuf::from("img_2024_01_small.jpg")
        );
        assert_eq!(
            file_name(&id, &preset, ArtifactVariant::Watermarked, &image),
            PathBuf::from("img_2024_01_small_watermarked.jpg")
        );
    }

    #[test]
    fn test_target_variants() {
        assert_eq!(Target::Both.variants().len(), 2);
        assert_eq!(Target::Watermarked.variants(), &[ArtifactVariant::Watermarked]);
    }
}
