//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion of every non-keeper file in a set of duplicate groups
//! - Planning what a deletion run would remove, for previews
//!
//! # Deletion
//!
//! ```no_run
//! use rustdedup::actions::{delete_duplicates, DeletionPlan};
//! use rustdedup::progress::NoopObserver;
//!
//! let groups = Vec::new();
//! let plan = DeletionPlan::from_groups(&groups);
//! println!("{} file(s) would be deleted", plan.files_to_delete);
//!
//! let result = delete_duplicates(&groups, &NoopObserver);
//! println!("{}", result.summary());
//! ```

pub mod delete;
pub mod plan;

// Re-export commonly used types
pub use delete::{
    delete_duplicates, delete_duplicates_with, delete_file, DeduplicationResult, DeleteError,
    DeleteResult, FileRemover, FsRemover,
};
pub use plan::{DeletionPlan, PlannedGroup};
