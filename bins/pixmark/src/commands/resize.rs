//! Resize command

use super::print_json;
use crate::context::AppContext;
use anyhow::Result;
use pixmark_cli::{progress, Status};
use serde_json::json;

/// Ask the service to resize the active image
pub async fn run(ctx: &AppContext, size: Option<&str>) -> Result<()> {
    let session = ctx.load_session()?;
    session.require_image_id()?;
    let preset = ctx.preset(size)?;
    let workflow = ctx.workflow()?;

    let pb = progress::spinner(&format!("Resizing to {preset}..."));
    let result = workflow.resize_image(&session, &preset).await;
    progress::finish(&pb);
    let status = result?;

    if ctx.format.is_json() {
        return print_json(&json!({ "size": preset, "status": status }));
    }

    Status::success(&status);
    Ok(())
}
