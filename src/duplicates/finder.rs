//! Duplicate finder orchestrating walk, hash, and group.
//!
//! # Overview
//!
//! The pipeline runs in three steps:
//! 1. **Discovery**: enumerate regular files under the root ([`Walker`])
//! 2. **Hashing**: digest every file's full content in parallel ([`hash_files`])
//! 3. **Grouping**: bucket paths by digest and keep buckets with 2+ members
//!
//! Callers that want to report between steps can call
//! [`DuplicateFinder::discover`] and [`DuplicateFinder::find_duplicates_in_files`]
//! separately; [`DuplicateFinder::find_duplicates`] runs everything at once.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::groups::{find_duplicates, group_by_hash, DuplicateGroup};
use crate::progress::DedupObserver;
use crate::scanner::{hash_files, FileEntry, HashConfig, HashError, ScanError, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Directory traversal options
    pub walker: WalkerConfig,
    /// Hashing options
    pub hash: HashConfig,
}

impl FinderConfig {
    /// Set the traversal options.
    #[must_use]
    pub fn with_walker(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    /// Set the hashing options.
    #[must_use]
    pub fn with_hash(mut self, hash: HashConfig) -> Self {
        self.hash = hash;
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Absolute root that was scanned
    pub root: PathBuf,
    /// Number of files discovered
    pub total_files: usize,
    /// Total size of all discovered files in bytes
    pub total_size: u64,
    /// Number of files hashed successfully
    pub hashed_files: usize,
    /// Number of files that could not be read
    pub failed_files: usize,
    /// Number of distinct digests among hashed files
    pub unique_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Hashed files beyond the first of each digest
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Per-file read failures during hashing
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// Percentage of the scanned bytes occupied by redundant copies.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Whether any file was skipped during hashing.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.hash_errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root could not be traversed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Walks a directory, hashes what it finds, and groups identical files.
///
/// # Example
///
/// ```no_run
/// use rustdedup::duplicates::DuplicateFinder;
/// use rustdedup::progress::NoopObserver;
/// use std::path::Path;
///
/// let finder = DuplicateFinder::with_defaults();
/// let (groups, summary) = finder
///     .find_duplicates(Path::new("/some/path"), &NoopObserver)
///     .unwrap();
///
/// println!("Found {} duplicate groups", groups.len());
/// println!("Reclaimable space: {} bytes", summary.reclaimable_space);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Enumerate every regular file under `root`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::Scan` if the root is missing, is not a
    /// directory, or cannot be read.
    pub fn discover(&self, root: &Path) -> Result<Vec<FileEntry>, FinderError> {
        let walker = Walker::new(root, self.config.walker.clone());
        Ok(walker.collect_files()?)
    }

    /// Find all duplicate files under `root`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if the root cannot be traversed. Unreadable
    /// files are not errors; they are counted in the summary.
    pub fn find_duplicates(
        &self,
        root: &Path,
        observer: &dyn DedupObserver,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start = Instant::now();
        let files = self.discover(root)?;

        let (groups, mut summary) = self.find_duplicates_in_files(files, observer);
        summary.root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        summary.scan_duration = start.elapsed();
        Ok((groups, summary))
    }

    /// Hash and group an already discovered file list.
    #[must_use]
    pub fn find_duplicates_in_files(
        &self,
        files: Vec<FileEntry>,
        observer: &dyn DedupObserver,
    ) -> (Vec<DuplicateGroup>, ScanSummary) {
        let start = Instant::now();

        let total_size = files.iter().map(|f| f.size).sum();
        let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();

        let (mapping, stats) = hash_files(&paths, &self.config.hash, observer);
        let buckets = group_by_hash(&mapping);
        let unique_files = buckets.len();
        let groups = find_duplicates(buckets);

        let summary = ScanSummary {
            root: PathBuf::new(),
            total_files: paths.len(),
            total_size,
            hashed_files: stats.hashed_files,
            failed_files: stats.failed_files,
            unique_files,
            duplicate_groups: groups.len(),
            // Files that failed to hash are counted in neither figure.
            duplicate_files: stats.hashed_files - unique_files,
            reclaimable_space: groups.iter().map(DuplicateGroup::wasted_space).sum(),
            scan_duration: start.elapsed(),
            hash_errors: stats.errors,
        };

        log::info!(
            "Scan complete: {} files, {} duplicate groups, {} bytes reclaimable",
            summary.total_files,
            summary.duplicate_groups,
            summary.reclaimable_space
        );

        (groups, summary)
    }
}
