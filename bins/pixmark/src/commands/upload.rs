//! Upload command

use super::print_json;
use crate::context::{read_input, AppContext};
use anyhow::Result;
use pixmark_cli::output::{format_duration, format_size};
use pixmark_cli::{progress, Status};
use pixmark_image::mime_for;
use serde_json::json;
use std::path::Path;
use std::time::Instant;

/// Upload `file` and make it the active image
pub async fn run(ctx: &AppContext, file: Option<&Path>) -> Result<()> {
    let bytes = read_input(file)?;
    let before = ctx.load_session()?;
    let mut session = before.clone();
    let workflow = ctx.workflow()?;

    let pb = progress::spinner("Uploading image...");
    let start = Instant::now();
    let result = workflow.upload_image(&mut session, bytes.as_deref()).await;
    progress::finish(&pb);
    let outcome = result?;

    ctx.save_session(&before, &session)?;

    if ctx.format.is_json() {
        return print_json(&json!({
            "imageID": outcome.image_id,
            "status": outcome.status,
            "replaced": outcome.replaced,
        }));
    }

    Status::success(&outcome.status);
    Status::detail("Image ID", outcome.image_id.as_str());
    if let Some(bytes) = &bytes {
        Status::detail(
            "Sent",
            &format!("{} ({})", format_size(bytes.len() as u64), mime_for(bytes)),
        );
    }
    if let Some(previous) = &outcome.replaced {
        Status::detail("Replaced", previous.as_str());
    }
    Status::detail("Took", &format_duration(start.elapsed()));
    Ok(())
}
