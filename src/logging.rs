//! Log setup for the configmerge CLI.
//!
//! Logs go to stderr so `--dry-run` output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity flags.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `directive`, when given, is a full `EnvFilter` directive and takes
/// precedence over the verbosity flags. An invalid directive falls back to the
/// flags.
pub fn init(verbose: u8, quiet: bool, directive: Option<&str>) {
    let fallback = default_directive(verbose, quiet);
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
