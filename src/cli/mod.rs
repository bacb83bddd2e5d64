//! CLI argument parsing for configmerge.
//!
//! Uses clap derive macros for declarative argument definitions. The merge
//! itself lives in the `commands` module.

use crate::commands::MergeOptions;
use crate::format::Format;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Merge YAML, JSON and Java-properties configuration files.
///
/// DESTINATION is loaded first (a missing file counts as empty), then every
/// SOURCE is merged into it from left to right and the result is written back
/// to DESTINATION. Mappings merge key by key, sequences append entries they
/// do not already contain, and later scalar values win.
#[derive(Parser, Debug)]
#[command(name = "configmerge")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// File to merge into; created if it does not exist.
    pub destination: PathBuf,

    /// Files merged into the destination, in order.
    pub sources: Vec<PathBuf>,

    /// Format of the destination, overriding its file extension.
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Print the merged document to stdout instead of writing DESTINATION.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directive; overrides -v and -q.
    #[arg(long, env = "CONFIGMERGE_LOG", hide_env_values = true)]
    pub log: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Options for the merge command.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            destination: self.destination.clone(),
            sources: self.sources.clone(),
            format: self.format,
            dry_run: self.dry_run,
        }
    }
}
