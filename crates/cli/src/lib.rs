//! Terminal helpers shared by pixmark binaries
//!
//! - Status lines and key/value details
//! - Text or JSON result rendering
//! - Spinners for requests in flight

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
