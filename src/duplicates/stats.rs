//! Breakdowns of duplicate groups for the `stats` command.

use std::collections::BTreeMap;

use serde::Serialize;

use super::groups::DuplicateGroup;

/// Label used for files without an extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// Number of groups listed in [`DuplicateStats::largest`].
pub const LARGEST_GROUPS: usize = 5;

/// Duplicate file count for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionCount {
    /// Extension including the leading dot, or [`NO_EXTENSION`]
    pub extension: String,
    /// Number of files in groups with this extension
    pub files: usize,
}

/// One entry of the largest-groups ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    /// Full content digest
    pub hash: String,
    /// Number of copies
    pub copies: usize,
    /// Size of one copy in bytes
    pub size: u64,
    /// Bytes reclaimable from this group
    pub wasted: u64,
}

impl From<&DuplicateGroup> for GroupSummary {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash().to_string(),
            copies: group.len(),
            size: group.size(),
            wasted: group.wasted_space(),
        }
    }
}

/// Aggregate view of a set of duplicate groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateStats {
    /// Bytes reclaimable across all groups
    pub wasted_space: u64,
    /// Files per extension, most common first
    pub by_extension: Vec<ExtensionCount>,
    /// Groups wasting the most space, largest first
    pub largest: Vec<GroupSummary>,
}

impl DuplicateStats {
    /// Compute the breakdowns for `groups`.
    ///
    /// A group's extension is taken from its first member and every member
    /// counts towards it. Ties in either ranking keep digest order.
    #[must_use]
    pub fn compute(groups: &[DuplicateGroup]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for group in groups {
            let extension = group
                .files()
                .first()
                .and_then(|p| p.extension())
                .map_or_else(
                    || NO_EXTENSION.to_string(),
                    |e| format!(".{}", e.to_string_lossy()),
                );
            *counts.entry(extension).or_default() += group.len();
        }

        let mut by_extension: Vec<ExtensionCount> = counts
            .into_iter()
            .map(|(extension, files)| ExtensionCount { extension, files })
            .collect();
        by_extension.sort_by(|a, b| b.files.cmp(&a.files));

        let mut largest: Vec<&DuplicateGroup> = groups.iter().collect();
        largest.sort_by(|a, b| b.wasted_space().cmp(&a.wasted_space()));

        Self {
            wasted_space: groups.iter().map(DuplicateGroup::wasted_space).sum(),
            by_extension,
            largest: largest
                .into_iter()
                .take(LARGEST_GROUPS)
                .map(GroupSummary::from)
                .collect(),
        }
    }
}
