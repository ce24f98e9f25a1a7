//! CLI command implementations

pub mod health;
pub mod preview;
pub mod resize;
pub mod session;
pub mod upload;
pub mod watermark;

use pixmark_cli::output::to_json;

/// Print a JSON result document on stdout
pub(crate) fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
