//! Permanent removal of duplicate files.
//!
//! # Overview
//!
//! For every [`DuplicateGroup`] the keeper is left alone and each other
//! member is removed from the filesystem:
//! - the file's byte length is read first, then the file is removed
//! - a failure on one file is recorded and processing moves on
//! - the run always completes and returns a [`DeduplicationResult`]
//!
//! Deletion is permanent. There is no trash or undo.
//!
//! Hard links to one inode are separate copies here. Removing one adds its
//! length to `bytes_reclaimed` although no space is freed until the last
//! link goes.
//!
//! # Example
//!
//! ```no_run
//! use rustdedup::actions::delete_duplicates;
//! use rustdedup::duplicates::DuplicateFinder;
//! use rustdedup::progress::NoopObserver;
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("/data"), &NoopObserver)
//!     .unwrap();
//!
//! let result = delete_duplicates(&groups, &NoopObserver);
//! println!("Deleted {} file(s), {} bytes", result.deleted_count(), result.bytes_reclaimed());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::DuplicateGroup;
use crate::progress::{DedupObserver, Phase};

/// Error type for deletion operations.
///
/// The message describes the reason only; [`DeleteError::report`] prefixes
/// the path.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error raised while deleting `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }

    /// One-line description in the form `Error deleting <path>: <reason>`.
    #[must_use]
    pub fn report(&self) -> String {
        format!("Error deleting {}: {}", self.path().display(), self)
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
}

/// Filesystem operations needed to delete a file.
///
/// [`FsRemover`] talks to the real filesystem; tests substitute their own
/// implementation to inject failures.
pub trait FileRemover {
    /// Byte length of the file at `path`.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Remove the file at `path`.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`FileRemover`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl FileRemover for FsRemover {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Delete a single file, capturing its size first.
///
/// # Errors
///
/// Returns [`DeleteError`] if the size cannot be read or removal fails. The
/// file is untouched in either case.
pub fn delete_file(remover: &impl FileRemover, path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = remover
        .file_size(path)
        .map_err(|e| DeleteError::from_io(path, e))?;

    remover
        .remove(path)
        .map_err(|e| DeleteError::from_io(path, e))?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
    })
}

/// Outcome of a deletion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeduplicationResult {
    deleted_count: usize,
    bytes_reclaimed: u64,
    errors: Vec<String>,
}

impl DeduplicationResult {
    /// Number of files removed.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted_count
    }

    /// Sum of the sizes of removed files.
    #[must_use]
    pub fn bytes_reclaimed(&self) -> u64 {
        self.bytes_reclaimed
    }

    /// One message per failed deletion, in processing order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check if every attempted deletion succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {} bytes",
                self.deleted_count, self.bytes_reclaimed
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {} bytes",
                self.deleted_count,
                self.errors.len(),
                self.bytes_reclaimed
            )
        }
    }
}

/// Delete every non-keeper file of every group from the real filesystem.
#[must_use]
pub fn delete_duplicates(
    groups: &[DuplicateGroup],
    observer: &dyn DedupObserver,
) -> DeduplicationResult {
    delete_duplicates_with(groups, &FsRemover, observer)
}

/// Delete every non-keeper file of every group through `remover`.
///
/// Groups are processed in order. Within a group the keeper is never passed
/// to the remover. Failures are recorded in the result and reported to the
/// observer; they never stop the run.
#[must_use]
pub fn delete_duplicates_with(
    groups: &[DuplicateGroup],
    remover: &impl FileRemover,
    observer: &dyn DedupObserver,
) -> DeduplicationResult {
    let total: usize = groups.iter().map(DuplicateGroup::duplicate_count).sum();
    let mut result = DeduplicationResult::default();

    observer.on_phase_start(Phase::Deleting, total);
    log::info!(
        "Deleting {} duplicate file(s) across {} group(s)",
        total,
        groups.len()
    );

    for group in groups {
        log::debug!(
            "Keeping {} ({} copies)",
            group.keeper().display(),
            group.len()
        );

        for path in group.duplicates() {
            match delete_file(remover, path) {
                Ok(deleted) => {
                    result.deleted_count += 1;
                    result.bytes_reclaimed += deleted.size;
                    observer.on_deleted(&deleted.path, deleted.size);
                }
                Err(e) => {
                    let message = e.report();
                    log::warn!("{message}");
                    observer.on_delete_failed(path, &message);
                    result.errors.push(message);
                }
            }
        }
    }

    observer.on_phase_end(Phase::Deleting);
    log::info!("{}", result.summary());
    result
}
