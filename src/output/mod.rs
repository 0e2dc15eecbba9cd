//! Output module for rendering extraction results
//!
//! This module handles:
//! - Rendering the module outline as JSON for downstream consumers
//! - Reading producer JSON back into the canonical model
//! - Recording run statistics

mod json;
pub mod stats;

pub use json::{parse_modules, to_json, write_json};
pub use stats::RunSummary;
