//! Health check command

use super::print_json;
use crate::context::AppContext;
use anyhow::Result;
use pixmark_cli::output::format_duration;
use pixmark_cli::{progress, Status};
use serde_json::json;
use std::time::Instant;

/// Probe the service's liveness route
pub async fn run(ctx: &AppContext) -> Result<()> {
    let workflow = ctx.workflow()?;

    let pb = progress::spinner("Checking service...");
    let start = Instant::now();
    let result = workflow.check_health().await;
    progress::finish(&pb);
    let message = result?;
    let elapsed = start.elapsed();

    if ctx.format.is_json() {
        return print_json(&json!({
            "base_url": ctx.client.base_url,
            "message": message,
            "elapsed_ms": elapsed.as_millis(),
        }));
    }

    Status::success(&message);
    Status::detail("Service", &ctx.client.base_url);
    Status::detail("Took", &format_duration(elapsed));
    Ok(())
}
