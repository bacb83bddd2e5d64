//! configmerge: merge configuration files into a destination file.
//!
//! Parses arguments, sets up logging, runs the merge and maps errors to exit
//! codes.

use configmerge::cli::Cli;
use configmerge::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose, cli.quiet, cli.log.as_deref());

    match commands::run(&cli.merge_options()) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
