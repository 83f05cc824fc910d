//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "2cf24dba5fb0...",
//!       "size": 1024,
//!       "copies": 2,
//!       "keep": "/path/to/file.txt",
//!       "delete": ["/path/to/file (1).txt"]
//!     }
//!   ],
//!   "summary": {
//!     "root": "/path/to",
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "hashed_files": 100,
//!     "failed_files": 0,
//!     "unique_files": 95,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 5,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 0,
//!     "exit_code_name": "DD000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::actions::{DeletionPlan, PlannedGroup};
use crate::duplicates::{DuplicateStats, ScanSummary};
use crate::error::ExitCode;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Absolute root that was scanned
    pub root: String,
    /// Total number of files discovered
    pub total_files: usize,
    /// Total size of all discovered files in bytes
    pub total_size: u64,
    /// Number of files hashed successfully
    pub hashed_files: usize,
    /// Number of files that could not be read
    pub failed_files: usize,
    /// Number of distinct contents
    pub unique_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding keepers)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates (bytes)
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            root: summary.root.to_string_lossy().into_owned(),
            total_files: summary.total_files,
            total_size: summary.total_size,
            hashed_files: summary.hashed_files,
            failed_files: summary.failed_files,
            unique_files: summary.unique_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output for the `scan` command.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate groups split into keeper and deletions
    pub duplicates: Vec<PlannedGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a plan, summary and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use rustdedup::actions::DeletionPlan;
    /// use rustdedup::duplicates::ScanSummary;
    /// use rustdedup::error::ExitCode;
    /// use rustdedup::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::new(&DeletionPlan::default(), &ScanSummary::default(), ExitCode::NoDuplicates);
    /// assert!(output.duplicates.is_empty());
    /// assert_eq!(output.summary.exit_code, 2);
    /// ```
    #[must_use]
    pub fn new(plan: &DeletionPlan, summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: plan.groups.clone(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(self, writer, pretty)
    }
}

/// Complete JSON output for the `stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct JsonStatsOutput {
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Extension and largest-group breakdowns
    pub duplicates: DuplicateStats,
}

impl JsonStatsOutput {
    /// Create stats output.
    #[must_use]
    pub fn new(summary: &ScanSummary, stats: &DuplicateStats, exit_code: ExitCode) -> Self {
        Self {
            summary: JsonSummary::from_scan_summary(summary, exit_code),
            duplicates: stats.clone(),
        }
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(self, writer, pretty)
    }
}

fn write_json<T: Serialize, W: Write>(
    value: &T,
    writer: &mut W,
    pretty: bool,
) -> Result<(), JsonOutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
