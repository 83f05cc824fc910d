//! `deduplicate`: delete every non-keeper copy after confirmation.

use std::io::{BufRead, Write};

use anyhow::Result;
use yansi::Paint;

use super::{find_groups, Console, Found};
use crate::actions::delete_duplicates;
use crate::cli::DeduplicateArgs;
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::text;
use crate::prompt::confirm_deletion;

/// Run the deduplicate command.
///
/// Deletion is permanent. Without `--yes` the user must answer `y`.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed or the console fails.
/// Individual deletion failures are reported, not returned.
pub fn run<R: BufRead, W: Write>(
    args: &DeduplicateArgs,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<ExitCode> {
    let (groups, summary) =
        match find_groups(&args.common, config, "deduplicate", "Deduplicating", console)? {
            Found::Groups { groups, summary } => (groups, summary),
            Found::Done(code) => return Ok(code),
        };

    if groups.is_empty() {
        writeln!(console.output, "No duplicate files found.")?;
        return Ok(ExitCode::NoDuplicates);
    }

    writeln!(
        console.output,
        "Found {} group(s) of duplicate files.",
        groups.len()
    )?;
    console.say("Keeping the copy with the shortest filename in each group.")?;
    console.say("")?;

    if !args.yes && !confirm_deletion(&mut console.input, &mut console.output)? {
        writeln!(console.output, "Aborted.")?;
        return Ok(ExitCode::Aborted);
    }

    console.say("")?;
    console.say("Deleting duplicates...")?;
    let observer = console.observer();
    let result = delete_duplicates(&groups, observer.as_ref());
    console.say("")?;

    text::write_deduplication_report(&mut console.output, &result)?;

    if result.all_succeeded() && !summary.has_errors() {
        Ok(ExitCode::Success)
    } else {
        if !result.all_succeeded() {
            console.say("Some files could not be deleted; see the messages above.".red())?;
        }
        Ok(ExitCode::PartialSuccess)
    }
}
