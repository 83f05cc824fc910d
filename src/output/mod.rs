//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text reports for the terminal
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use rustdedup::actions::DeletionPlan;
//! use rustdedup::duplicates::DuplicateFinder;
//! use rustdedup::error::ExitCode;
//! use rustdedup::output::json::JsonOutput;
//! use rustdedup::progress::NoopObserver;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new("."), &NoopObserver).unwrap();
//!
//! let plan = DeletionPlan::from_groups(&groups);
//! let output = JsonOutput::new(&plan, &summary, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

use bytesize::ByteSize;

// Re-export main types
pub use csv::CsvOutput;
pub use json::{JsonOutput, JsonStatsOutput};

/// Format a byte count with binary (1024-based) units.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}
