//! Hash-based grouping and keeper selection.
//!
//! # Overview
//!
//! Grouping turns the path → digest mapping produced by the hashing phase
//! into buckets of paths sharing a digest. Buckets with two or more members
//! become [`DuplicateGroup`]s. Every group has exactly one keeper, chosen by
//! [`select_keeper`]:
//!
//! 1. the file whose base name has the fewest characters, then
//! 2. the smallest full path in ordinal (byte-wise) order.
//!
//! The order is total, so the keeper never depends on the order in which
//! paths were discovered or hashed.
//!
//! # Example
//!
//! ```
//! use rustdedup::duplicates::{find_duplicates, group_by_hash};
//! use rustdedup::scanner::{Digest, HashMapping};
//! use std::path::PathBuf;
//!
//! let same = Digest::from_bytes(&[1; 32]);
//! let mut mapping = HashMapping::new();
//! mapping.insert(PathBuf::from("/docs/report-copy.txt"), same.clone());
//! mapping.insert(PathBuf::from("/docs/report.txt"), same);
//! mapping.insert(PathBuf::from("/docs/other.txt"), Digest::from_bytes(&[2; 32]));
//!
//! let groups = find_duplicates(group_by_hash(&mapping));
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].keeper(), &PathBuf::from("/docs/report.txt"));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::scanner::{Digest, HashMapping};

/// Paths bucketed by content digest, in digest order.
pub type HashBuckets = BTreeMap<Digest, Vec<PathBuf>>;

/// Errors raised when building a [`DuplicateGroup`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// A duplicate group needs at least two members.
    #[error("A duplicate group needs at least 2 files, got {0}")]
    TooFewFiles(usize),
}

/// A set of two or more files with identical content.
///
/// The keeper is fixed at construction, so [`DuplicateGroup::keeper`] cannot
/// fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    hash: Digest,
    size: u64,
    files: Vec<PathBuf>,
    keeper: usize,
}

impl DuplicateGroup {
    /// Build a group, reading the byte length of its first member.
    ///
    /// If that file cannot be inspected the size is recorded as zero and a
    /// warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::TooFewFiles`] when `files` has fewer than two
    /// entries.
    pub fn new(hash: Digest, files: Vec<PathBuf>) -> Result<Self, GroupError> {
        let size = match files.first() {
            Some(first) => std::fs::metadata(first).map_or_else(
                |e| {
                    log::warn!("Cannot read size of {}: {}", first.display(), e);
                    0
                },
                |m| m.len(),
            ),
            None => 0,
        };
        Self::with_size(hash, size, files)
    }

    /// Build a group with a known per-file size.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::TooFewFiles`] when `files` has fewer than two
    /// entries.
    pub fn with_size(hash: Digest, size: u64, files: Vec<PathBuf>) -> Result<Self, GroupError> {
        if files.len() < 2 {
            return Err(GroupError::TooFewFiles(files.len()));
        }

        let keeper = keeper_index(&files).ok_or(GroupError::TooFewFiles(0))?;
        Ok(Self {
            hash,
            size,
            files,
            keeper,
        })
    }

    /// Content digest shared by every member.
    #[must_use]
    pub fn hash(&self) -> &Digest {
        &self.hash
    }

    /// Byte length of one copy.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// All members, in the order they were grouped.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false: a group has at least two members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The member that survives deduplication.
    #[must_use]
    pub fn keeper(&self) -> &PathBuf {
        &self.files[self.keeper]
    }

    /// Every member except the keeper, in group order.
    pub fn duplicates(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        let keeper = self.keeper;
        self.files
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != keeper)
            .map(|(_, p)| p)
    }

    /// Number of members that would be deleted.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len() - 1
    }

    /// Bytes reclaimable by deleting every non-keeper.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}

/// Number of Unicode scalar values in the final path component.
fn name_len(path: &Path) -> usize {
    path.file_name()
        .map_or(0, |n| n.to_string_lossy().chars().count())
}

/// Keeper ordering: shorter base name first, then ordinal path order.
fn keeper_order(a: &Path, b: &Path) -> Ordering {
    name_len(a)
        .cmp(&name_len(b))
        .then_with(|| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()))
}

fn keeper_index(files: &[PathBuf]) -> Option<usize> {
    files
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| keeper_order(a, b))
        .map(|(i, _)| i)
}

/// Choose the file to keep from a set of identical files.
///
/// Returns `None` only for an empty slice.
///
/// # Example
///
/// ```
/// use rustdedup::duplicates::select_keeper;
/// use std::path::PathBuf;
///
/// let files = vec![PathBuf::from("/x/a.txt"), PathBuf::from("/a/b/img.jpg")];
/// assert_eq!(select_keeper(&files), Some(&PathBuf::from("/x/a.txt")));
/// ```
#[must_use]
pub fn select_keeper(files: &[PathBuf]) -> Option<&PathBuf> {
    keeper_index(files).map(|i| &files[i])
}

/// Invert a hash mapping into digest buckets.
///
/// Members of each bucket keep the mapping's path order.
#[must_use]
pub fn group_by_hash(mapping: &HashMapping) -> HashBuckets {
    let mut buckets = HashBuckets::new();
    for (path, digest) in mapping {
        buckets
            .entry(digest.clone())
            .or_default()
            .push(path.clone());
    }

    log::debug!(
        "Grouped {} files into {} digest buckets",
        mapping.len(),
        buckets.len()
    );
    buckets
}

/// Keep the buckets with two or more members, in digest order.
#[must_use]
pub fn find_duplicates(buckets: HashBuckets) -> Vec<DuplicateGroup> {
    let groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .filter_map(|(hash, files)| DuplicateGroup::new(hash, files).ok())
        .collect();

    log::info!("Found {} duplicate groups", groups.len());
    groups
}
