//! CSV output formatter for duplicate scan results.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! One row is generated for each file in a duplicate group.
//!
//! # Columns
//!
//! - `group_id`: Numeric ID identifying the duplicate group (1-based)
//! - `hash`: content digest (hexadecimal)
//! - `path`: Absolute path to the file
//! - `size`: File size in bytes
//! - `action`: `keep` for the surviving copy, `delete` otherwise

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::actions::DeletionPlan;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    hash: &'a str,
    path: String,
    size: u64,
    action: &'static str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    plan: &'a DeletionPlan,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(plan: &'a DeletionPlan) -> Self {
        Self { plan }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (idx, group) in self.plan.groups.iter().enumerate() {
            let group_id = idx + 1;

            csv_writer.serialize(CsvRow {
                group_id,
                hash: &group.hash,
                path: group.keep.to_string_lossy().into_owned(),
                size: group.size,
                action: "keep",
            })?;

            for path in &group.delete {
                csv_writer.serialize(CsvRow {
                    group_id,
                    hash: &group.hash,
                    path: path.to_string_lossy().into_owned(),
                    size: group.size,
                    action: "delete",
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
