//! Watermark commands: upload the asset, apply it

use super::print_json;
use crate::context::{read_input, AppContext};
use anyhow::Result;
use pixmark_cli::{progress, Status};
use serde_json::json;
use std::path::Path;

/// Upload a watermark image under `name`
pub async fn upload(ctx: &AppContext, file: Option<&Path>, name: Option<&str>) -> Result<()> {
    let bytes = read_input(file)?;
    let workflow = ctx.workflow()?;

    let pb = progress::spinner("Uploading watermark...");
    let result = workflow.upload_watermark(bytes.as_deref(), name).await;
    progress::finish(&pb);
    let status = result?;

    if ctx.format.is_json() {
        return print_json(&json!({ "name": name, "status": status }));
    }

    Status::success(&status);
    Ok(())
}

/// Composite the stored watermark onto the active image
pub async fn apply(ctx: &AppContext, size: Option<&str>) -> Result<()> {
    let session = ctx.load_session()?;
    session.require_image_id()?;
    let preset = ctx.preset(size)?;
    let workflow = ctx.workflow()?;

    let pb = progress::spinner(&format!("Applying watermark at {preset}..."));
    let result = workflow.apply_watermark(&session, &preset).await;
    progress::finish(&pb);
    let status = result?;

    if ctx.format.is_json() {
        return print_json(&json!({ "size": preset, "status": status }));
    }

    Status::success(&status);
    Ok(())
}
