//! rustdedup - content-based duplicate file remover
//!
//! Finds files with identical content under a directory by hashing every
//! file in full, groups them by digest, and deletes all but one copy of each
//! group. The copy with the shortest file name is kept.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod scanner;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::commands::Console;
use crate::config::Config;
use crate::error::ExitCode;

/// Run the parsed command line against the process's terminal.
///
/// # Errors
///
/// Returns an error if the command fails outright, for example when the
/// root directory does not exist.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref());
    config.merge_args(cli.command.common());
    log::debug!("Effective configuration: {:?}", config);

    let mut console = Console::stdio(cli.quiet);
    match &cli.command {
        Commands::Scan(args) => commands::scan::run(args, &config, &mut console),
        Commands::DryRun(args) => commands::dry_run::run(args, &config, &mut console),
        Commands::Deduplicate(args) => commands::deduplicate::run(args, &config, &mut console),
        Commands::Stats(args) => commands::stats::run(args, &config, &mut console),
    }
}
