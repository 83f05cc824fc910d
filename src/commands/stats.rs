//! `stats`: file and duplicate statistics for a directory.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::{find_groups, scan_exit_code, Console, Found};
use crate::cli::{StatsArgs, StatsFormat};
use crate::config::Config;
use crate::duplicates::DuplicateStats;
use crate::error::ExitCode;
use crate::output::{text, JsonStatsOutput};

/// Run the stats command.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed or output fails.
pub fn run<R: BufRead, W: Write>(
    args: &StatsArgs,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<ExitCode> {
    let was_quiet = console.quiet;
    if args.output == StatsFormat::Json {
        console.quiet = true;
    }
    let found = find_groups(&args.common, config, "analyze", "Analyzing", console);
    console.quiet = was_quiet;

    let (groups, summary) = match found? {
        Found::Groups { groups, summary } => (groups, summary),
        Found::Done(code) => return Ok(code),
    };

    let stats = DuplicateStats::compute(&groups);
    let code = scan_exit_code(&groups, &summary);

    match args.output {
        StatsFormat::Text => text::write_stats_report(&mut console.output, &summary, &stats)?,
        StatsFormat::Json => JsonStatsOutput::new(&summary, &stats, code)
            .write_to(&mut console.output, true)
            .context("Failed to write JSON output")?,
    }

    Ok(code)
}
