//! Session inspection, never touches the network

use super::print_json;
use crate::context::AppContext;
use anyhow::Result;
use pixmark_cli::Status;
use serde_json::json;

/// Show the active image ID and where it is stored
pub fn show(ctx: &AppContext) -> Result<()> {
    let store = ctx.store();
    let session = ctx.load_session()?;
    let updated_at = store.updated_at()?;

    if ctx.format.is_json() {
        return print_json(&json!({
            "imageID": session.image_id(),
            "store": store.path(),
            "updated_at": updated_at,
        }));
    }

    match session.image_id() {
        Some(id) => Status::success(&format!("Active image: {id}")),
        None => Status::info("No active image. Run `pixmark upload <FILE>` first."),
    }
    Status::detail("Store", &store.path().display().to_string());
    if let Some(at) = updated_at {
        Status::detail("Updated", &at.to_rfc3339());
    }
    Ok(())
}
