//! `scan`: list duplicate groups without changing anything.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::{find_groups, scan_exit_code, Console, Found};
use crate::actions::DeletionPlan;
use crate::cli::{OutputFormat, ScanArgs};
use crate::config::Config;
use crate::output::{text, CsvOutput, JsonOutput};

/// Run the scan command.
///
/// Text output narrates each step; JSON and CSV print only the result so
/// that stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed or output fails.
pub fn run<R: BufRead, W: Write>(
    args: &ScanArgs,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<crate::error::ExitCode> {
    let was_quiet = console.quiet;
    if args.output != OutputFormat::Text {
        console.quiet = true;
    }
    let found = find_groups(&args.common, config, "scan", "Scanning", console);
    console.quiet = was_quiet;

    let (groups, summary) = match found? {
        Found::Groups { groups, summary } => (groups, summary),
        Found::Done(code) => return Ok(code),
    };

    let plan = DeletionPlan::from_groups(&groups);
    let code = scan_exit_code(&groups, &summary);

    match args.output {
        OutputFormat::Text => {
            if plan.is_empty() {
                writeln!(console.output, "No duplicate files found.")?;
            } else {
                text::write_scan_report(&mut console.output, &plan)?;
            }
        }
        OutputFormat::Json => JsonOutput::new(&plan, &summary, code)
            .write_to(&mut console.output, true)
            .context("Failed to write JSON output")?,
        OutputFormat::Csv => CsvOutput::new(&plan)
            .write_to(&mut console.output)
            .context("Failed to write CSV output")?,
    }

    Ok(code)
}
