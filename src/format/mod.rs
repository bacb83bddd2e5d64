//! Loaders and savers for the supported document formats.
//!
//! The format of a file is chosen from its extension:
//! - `.yaml` / `.yml` → YAML
//! - `.json` → JSON
//! - `.properties` → Java properties (flat `key=value` text)
//!
//! Extension matching is case-insensitive.

mod json;
mod properties;
mod yaml;


use crate::error::{ConfigMergeError, Result};
use crate::value::Value;
use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use tracing::debug;

pub use properties::{parse_properties, write_properties};

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Properties,
}

impl Format {
    /// Match a file extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "properties" => Ok(Format::Properties),
            _ => Err(ConfigMergeError::UnknownFormat(ext)),
        }
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Err(ConfigMergeError::UnknownFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Yaml => "YAML",
            Format::Json => "JSON",
            Format::Properties => "properties",
        })
    }
}

/// Parse a document from raw bytes.
pub fn load(bytes: &[u8], format: Format) -> Result<Value> {
    debug!(%format, bytes = bytes.len(), "loading document");
    match format {
        Format::Yaml => yaml::load(bytes),
        Format::Json => json::load(bytes),
        Format::Properties => properties::load(bytes),
    }
}

/// Serialize a document to bytes.
pub fn save(value: &Value, format: Format) -> Result<Vec<u8>> {
    debug!(%format, kind = %value.kind(), "saving document");
    match format {
        Format::Yaml => yaml::save(value),
        Format::Json => json::save(value),
        Format::Properties => properties::save(value),
    }
}

/// Read and parse the file at `path`, using the format of its extension.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| ConfigMergeError::io("read", path, e))?;
    load(&bytes, format)
}

/// Map a serde error message to the matching error variant.
///
/// Messages produced by the value bridge for data outside the model become
/// `UnsupportedType`; everything else is a syntax error of `format`.
fn classify_error(format: Format, message: String) -> ConfigMergeError {
    use crate::value::UNSUPPORTED_PREFIX;

    if message.contains(UNSUPPORTED_PREFIX) {
        ConfigMergeError::UnsupportedType(message.replacen(UNSUPPORTED_PREFIX, "", 1))
    } else {
        ConfigMergeError::Parse { format, message }
    }
}

fn decode_utf8(bytes: &[u8], format: Format) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| ConfigMergeError::Parse {
        format,
        message: format!("input is not valid UTF-8: {}", e),
    })
}
