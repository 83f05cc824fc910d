//! Command-line interface definitions for rustdedup.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, config file) apply to every subcommand; each subcommand
//! shares the same traversal and hashing options.
//!
//! # Example
//!
//! ```bash
//! # List duplicate groups
//! rustdedup scan -p ~/Downloads
//!
//! # Show what would be deleted
//! rustdedup dry-run -p ~/Downloads
//!
//! # Delete duplicates without the confirmation prompt
//! rustdedup deduplicate -p ~/Downloads --yes
//!
//! # Statistics as JSON, hashing with BLAKE3
//! rustdedup stats -p ~/Downloads --output json --algorithm blake3
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Find files with identical content and remove all but one copy.
///
/// Files are compared by a digest of their full content. In every set of
/// identical files the copy with the shortest file name is kept.
#[derive(Debug, Parser)]
#[command(name = "rustdedup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress and per-file output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for rustdedup.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory for duplicate files and display results
    Scan(ScanArgs),
    /// Show what would be deleted without deleting anything
    DryRun(DryRunArgs),
    /// Remove duplicate files, keeping the copy with the shortest name
    Deduplicate(DeduplicateArgs),
    /// Show statistics about files and duplicates in a directory
    Stats(StatsArgs),
}

impl Commands {
    /// Options shared by every subcommand.
    #[must_use]
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Scan(args) => &args.common,
            Self::DryRun(args) => &args.common,
            Self::Deduplicate(args) => &args.common,
            Self::Stats(args) => &args.common,
        }
    }
}

/// Traversal and hashing options shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Root directory to search (prompted for when omitted)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Number of hashing threads (0 = number of CPUs)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Content hash function
    #[arg(long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Follow symbolic links during traversal
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the dry-run subcommand.
#[derive(Debug, Args)]
pub struct DryRunArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the deduplicate subcommand.
#[derive(Debug, Args)]
pub struct DeduplicateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the stats subcommand.
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: StatsFormat,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Output format for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
}
