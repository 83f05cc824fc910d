//! Plain text reports for the terminal.
//!
//! Each writer takes any [`Write`] so that commands print to stdout and tests
//! render into a buffer.

use std::io::{self, Write};

use super::format_bytes;
use crate::actions::{DeduplicationResult, DeletionPlan, PlannedGroup};
use crate::duplicates::{DuplicateStats, ScanSummary};
use crate::scanner::SHORT_DIGEST_LEN;

fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(SHORT_DIGEST_LEN)]
}

fn write_group_header<W: Write>(w: &mut W, group: &PlannedGroup) -> io::Result<()> {
    writeln!(
        w,
        "  Hash: {}... ({}, {} copies)",
        short_hash(&group.hash),
        format_bytes(group.size),
        group.copies
    )
}

/// Groups with `[KEEP]`/`[DELETE]` markers and the total wasted space.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_scan_report<W: Write>(w: &mut W, plan: &DeletionPlan) -> io::Result<()> {
    writeln!(w, "Found {} group(s) of duplicate files:", plan.groups.len())?;
    writeln!(w)?;

    for group in &plan.groups {
        write_group_header(w, group)?;
        writeln!(w, "    {} [KEEP]", group.keep.display())?;
        for path in &group.delete {
            writeln!(w, "    {} [DELETE]", path.display())?;
        }
        writeln!(w)?;
    }

    writeln!(w, "Total duplicate groups: {}", plan.groups.len())?;
    writeln!(w, "Total wasted space: {}", format_bytes(plan.bytes_to_reclaim))?;
    writeln!(w)?;
    writeln!(w, "Run the 'deduplicate' command to remove duplicates.")
}

/// What a deletion run would do, group by group, followed by totals.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_dry_run_report<W: Write>(w: &mut W, plan: &DeletionPlan) -> io::Result<()> {
    writeln!(w, "Found {} group(s) of duplicate files:", plan.groups.len())?;
    writeln!(w)?;

    for group in &plan.groups {
        write_group_header(w, group)?;
        writeln!(w, "    KEEP:   {}", group.keep.display())?;
        for path in &group.delete {
            writeln!(w, "    DELETE: {}", path.display())?;
        }
        writeln!(w)?;
    }

    writeln!(w, "--- Dry Run Summary ---")?;
    writeln!(w, "Duplicate groups: {}", plan.groups.len())?;
    writeln!(w, "Files to delete: {}", plan.files_to_delete)?;
    writeln!(w, "Space to reclaim: {}", format_bytes(plan.bytes_to_reclaim))
}

/// Directory statistics with extension and largest-group breakdowns.
///
/// The breakdowns are only printed when duplicates exist.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_stats_report<W: Write>(
    w: &mut W,
    summary: &ScanSummary,
    stats: &DuplicateStats,
) -> io::Result<()> {
    writeln!(w, "=== rustdedup Statistics ===")?;
    writeln!(w)?;
    writeln!(w, "Total files: {}", summary.total_files)?;
    writeln!(w, "Total size: {}", format_bytes(summary.total_size))?;
    writeln!(w, "Unique files: {}", summary.unique_files)?;
    writeln!(w, "Duplicate files: {}", summary.duplicate_files)?;
    writeln!(w, "Duplicate groups: {}", summary.duplicate_groups)?;

    if summary.failed_files > 0 {
        writeln!(w, "Unreadable files: {}", summary.failed_files)?;
    }

    if summary.duplicate_groups == 0 {
        return Ok(());
    }

    writeln!(w, "Wasted space: {}", format_bytes(stats.wasted_space))?;
    writeln!(w)?;

    writeln!(w, "Duplicate files by extension:")?;
    for entry in &stats.by_extension {
        writeln!(w, "  {}: {} file(s)", entry.extension, entry.files)?;
    }
    writeln!(w)?;

    writeln!(w, "Largest duplicate groups (by wasted space):")?;
    for group in &stats.largest {
        writeln!(
            w,
            "  {}... - {} copies, {} each, {} wasted",
            short_hash(&group.hash),
            group.copies,
            format_bytes(group.size),
            format_bytes(group.wasted)
        )?;
    }
    Ok(())
}

/// Totals after a deletion run.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_deduplication_report<W: Write>(
    w: &mut W,
    result: &DeduplicationResult,
) -> io::Result<()> {
    writeln!(w, "Deleted {} file(s).", result.deleted_count())?;
    writeln!(
        w,
        "Reclaimed {} of disk space.",
        format_bytes(result.bytes_reclaimed())
    )?;

    if !result.all_succeeded() {
        writeln!(
            w,
            "Encountered {} error(s) during deletion.",
            result.errors().len()
        )?;
    }
    Ok(())
}
