//! The merge command.
//!
//! Loads the destination, folds every source into it and writes the result
//! back. Nothing is written unless every load and merge succeeded.


use crate::error::{ConfigMergeError, Result};
use crate::format::{self, Format};
use crate::fs::atomic_write;
use crate::merge::merge;
use crate::value::Value;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime options of a merge run, as collected from the command line.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// File to merge into and write the result to.
    pub destination: PathBuf,
    /// Files merged into the destination, left to right.
    pub sources: Vec<PathBuf>,
    /// Destination format; detected from the extension when unset.
    pub format: Option<Format>,
    /// Write the result to stdout instead of the destination.
    pub dry_run: bool,
}

/// Run the merge, printing dry-run output to stdout.
pub fn run(options: &MergeOptions) -> Result<()> {
    let stdout = io::stdout();
    cmd_merge(options, &mut stdout.lock())
}

/// Run the merge, writing dry-run output to `out`.
pub fn cmd_merge<W: Write>(options: &MergeOptions, out: &mut W) -> Result<()> {
    let destination = options.destination.as_path();
    let format = match options.format {
        Some(format) => format,
        None => Format::from_path(destination)?,
    };

    let mut merged = load_destination(destination, format)?;

    for source in &options.sources {
        info!(source = %source.display(), "merging");
        let incoming = format::load_path(source).map_err(|e| e.in_document(source))?;
        merged = merge(merged, &incoming).map_err(|e| e.in_document(source))?;
    }

    let bytes = format::save(&merged, format).map_err(|e| e.in_document(destination))?;

    if options.dry_run {
        out.write_all(&bytes)
            .and_then(|()| out.flush())
            .map_err(|e| ConfigMergeError::io("write", "<stdout>", e))?;
        debug!(bytes = bytes.len(), "dry run, destination left untouched");
        return Ok(());
    }

    atomic_write(destination, &bytes)?;
    info!(
        destination = %destination.display(),
        sources = options.sources.len(),
        "wrote merged document"
    );
    Ok(())
}

/// Load the destination document; a missing file is an empty starting value.
fn load_destination(path: &Path, format: Format) -> Result<Value> {
    match std::fs::read(path) {
        Ok(bytes) => format::load(&bytes, format).map_err(|e| e.in_document(path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(destination = %path.display(), "destination does not exist yet");
            Ok(Value::Null)
        }
        Err(e) => Err(ConfigMergeError::io("read", path, e)),
    }
}
