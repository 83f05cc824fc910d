//! What a deletion run would do, without doing it.
//!
//! A [`DeletionPlan`] splits every duplicate group into its keeper and the
//! files that would be removed. The `scan` and `dry-run` commands render it;
//! nothing in this module touches the filesystem.

use std::path::PathBuf;

use serde::Serialize;

use crate::duplicates::DuplicateGroup;

/// Keep/delete split for one duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedGroup {
    /// Full content digest
    pub hash: String,
    /// Size of one copy in bytes
    pub size: u64,
    /// Number of copies
    pub copies: usize,
    /// File that survives
    pub keep: PathBuf,
    /// Files that would be removed, in group order
    pub delete: Vec<PathBuf>,
}

impl PlannedGroup {
    /// Bytes that removing [`PlannedGroup::delete`] would reclaim.
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.size * self.delete.len() as u64
    }
}

impl From<&DuplicateGroup> for PlannedGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash().to_string(),
            size: group.size(),
            copies: group.len(),
            keep: group.keeper().clone(),
            delete: group.duplicates().cloned().collect(),
        }
    }
}

/// Keep/delete split for a whole scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    /// Per-group plans, in digest order
    pub groups: Vec<PlannedGroup>,
    /// Number of files that would be removed
    pub files_to_delete: usize,
    /// Bytes that would be reclaimed, from each group's size
    pub bytes_to_reclaim: u64,
}

impl DeletionPlan {
    /// Build a plan from duplicate groups.
    ///
    /// # Example
    ///
    /// ```
    /// use rustdedup::actions::DeletionPlan;
    /// use rustdedup::duplicates::DuplicateGroup;
    /// use rustdedup::scanner::Digest;
    /// use std::path::PathBuf;
    ///
    /// let group = DuplicateGroup::with_size(
    ///     Digest::from_bytes(&[0; 32]),
    ///     1024,
    ///     vec![PathBuf::from("/a/photo (1).jpg"), PathBuf::from("/a/photo.jpg")],
    /// )
    /// .unwrap();
    ///
    /// let plan = DeletionPlan::from_groups(&[group]);
    /// assert_eq!(plan.files_to_delete, 1);
    /// assert_eq!(plan.bytes_to_reclaim, 1024);
    /// assert_eq!(plan.groups[0].keep, PathBuf::from("/a/photo.jpg"));
    /// ```
    #[must_use]
    pub fn from_groups(groups: &[DuplicateGroup]) -> Self {
        let groups: Vec<PlannedGroup> = groups.iter().map(PlannedGroup::from).collect();
        let files_to_delete = groups.iter().map(|g| g.delete.len()).sum();
        let bytes_to_reclaim = groups.iter().map(PlannedGroup::reclaimable).sum();

        Self {
            groups,
            files_to_delete,
            bytes_to_reclaim,
        }
    }

    /// Whether the plan deletes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
