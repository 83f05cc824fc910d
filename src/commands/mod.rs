//! Subcommand implementations.
//!
//! Every command follows the same opening: resolve the root (prompting when
//! needed), discover files, hash them, and group duplicates. [`find_groups`]
//! runs that shared part; the per-command modules render or act on the
//! result.

pub mod deduplicate;
pub mod dry_run;
pub mod scan;
pub mod stats;

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;

use anyhow::Result;
use yansi::Paint;

use crate::cli::CommonArgs;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateGroup, ScanSummary};
use crate::error::ExitCode;
use crate::progress::{ConsoleReporter, DedupObserver, NoopObserver};
use crate::prompt::resolve_path;

/// Streams a command reads answers from and writes its report to.
pub struct Console<R, W> {
    /// Source of interactive answers
    pub input: R,
    /// Destination of narration and reports
    pub output: W,
    /// Suppress narration and per-file progress
    pub quiet: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio(quiet: bool) -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
            quiet,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over arbitrary streams.
    pub fn new(input: R, output: W, quiet: bool) -> Self {
        Self {
            input,
            output,
            quiet,
        }
    }

    /// Write a narration line unless quiet.
    fn say(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.output, "{line}")
    }

    fn observer(&self) -> Box<dyn DedupObserver> {
        if self.quiet {
            Box::new(NoopObserver)
        } else {
            Box::new(ConsoleReporter::new(false))
        }
    }
}

/// Result of the shared scan phase.
pub enum Found {
    /// Duplicates were searched for; `groups` may be empty.
    Groups {
        groups: Vec<DuplicateGroup>,
        summary: ScanSummary,
    },
    /// The command ended early with this exit code.
    Done(ExitCode),
}

/// Resolve the root, then discover, hash, and group its files.
///
/// `verb` completes the prompt `Enter the path to <verb>: ` and `heading`
/// introduces the root, e.g. `Scanning`.
///
/// # Errors
///
/// Returns an error if the root cannot be traversed or the console fails.
pub fn find_groups<R: BufRead, W: Write>(
    common: &CommonArgs,
    config: &Config,
    verb: &str,
    heading: &str,
    console: &mut Console<R, W>,
) -> Result<Found> {
    let Some(path) = resolve_path(
        common.path.as_deref(),
        verb,
        &mut console.input,
        &mut console.output,
    )?
    else {
        writeln!(console.output, "No path provided. Aborting.")?;
        return Ok(Found::Done(ExitCode::Aborted));
    };

    let root: PathBuf = std::path::absolute(&path).unwrap_or(path);
    console.say(format!("{heading}: {}", root.display()))?;
    console.say("")?;

    let finder = DuplicateFinder::new(config.finder_config());

    console.say("Discovering files...")?;
    let files = finder.discover(&root)?;
    console.say(format!("Found {} file(s).", files.len()))?;
    console.say("")?;

    if files.is_empty() {
        return Ok(Found::Done(ExitCode::NoDuplicates));
    }

    console.say("Hashing files...")?;
    let observer = console.observer();
    let (groups, mut summary) = finder.find_duplicates_in_files(files, observer.as_ref());
    summary.root = root;
    console.say("")?;

    if summary.has_errors() {
        console.say(
            format!("Skipped {} unreadable file(s).", summary.failed_files)
                .yellow()
                .to_string(),
        )?;
    }

    Ok(Found::Groups { groups, summary })
}

/// Exit code for a finished scan without deletion.
fn scan_exit_code(groups: &[DuplicateGroup], summary: &ScanSummary) -> ExitCode {
    if groups.is_empty() {
        ExitCode::NoDuplicates
    } else if summary.has_errors() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}
