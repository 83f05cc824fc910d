//! `dry-run`: show exactly what `deduplicate` would delete.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::{find_groups, scan_exit_code, Console, Found};
use crate::actions::DeletionPlan;
use crate::cli::DryRunArgs;
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::text;

/// Run the dry-run command.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed or output fails.
pub fn run<R: BufRead, W: Write>(
    args: &DryRunArgs,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<ExitCode> {
    let (groups, summary) = match find_groups(&args.common, config, "scan", "Dry run for", console)? {
        Found::Groups { groups, summary } => (groups, summary),
        Found::Done(code) => return Ok(code),
    };

    if groups.is_empty() {
        writeln!(console.output, "No duplicate files found.")?;
    } else {
        text::write_dry_run_report(&mut console.output, &DeletionPlan::from_groups(&groups))?;
    }

    Ok(scan_exit_code(&groups, &summary))
}
