//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping hashed files by digest
//! - Deterministic keeper selection
//! - Orchestrating the walk → hash → group pipeline
//! - Summary breakdowns of duplicate groups

pub mod finder;
pub mod groups;
pub mod stats;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{
    find_duplicates, group_by_hash, select_keeper, DuplicateGroup, GroupError, HashBuckets,
};
pub use stats::{DuplicateStats, ExtensionCount, GroupSummary};
