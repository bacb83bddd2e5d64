//! Error types for configmerge.
//!
//! Uses thiserror for derive macros. Every failure is terminal: the merge
//! chain aborts and the destination file is left untouched.

use crate::exit_codes;
use crate::format::Format;
use crate::value::ValueKind;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configmerge operations.
#[derive(Error, Debug)]
pub enum ConfigMergeError {
    /// Two values at the same position have incompatible kinds.
    #[error("type mismatch at '{path}': cannot merge {incoming} into {base}")]
    TypeMismatch {
        path: String,
        base: ValueKind,
        incoming: ValueKind,
    },

    /// Data that has no representation in the configuration value model.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// File extension or format hint matches none of the known formats.
    #[error("unknown file type '{0}' (expected .yaml, .yml, .json or .properties)")]
    UnknownFormat(String),

    /// Document text is malformed.
    #[error("failed to parse {format}: {message}")]
    Parse { format: Format, message: String },

    /// Value cannot be written in the requested format.
    #[error("cannot write {format}: {message}")]
    Unrepresentable { format: Format, message: String },

    /// Reading or writing a file failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A failure while processing one document, tagged with its path.
    #[error("{}: {source}", path.display())]
    InDocument {
        path: PathBuf,
        #[source]
        source: Box<ConfigMergeError>,
    },
}

impl ConfigMergeError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigMergeError::UnknownFormat(_) | ConfigMergeError::Io { .. } => {
                exit_codes::USER_ERROR
            }
            ConfigMergeError::Parse { .. } | ConfigMergeError::UnsupportedType(_) => {
                exit_codes::INPUT_FAILURE
            }
            ConfigMergeError::TypeMismatch { .. } => exit_codes::MERGE_FAILURE,
            ConfigMergeError::Unrepresentable { .. } => exit_codes::OUTPUT_FAILURE,
            ConfigMergeError::InDocument { source, .. } => source.exit_code(),
        }
    }

    /// Tag the error with the document it came from.
    ///
    /// I/O errors already name their file and are returned unchanged.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        match self {
            err @ (ConfigMergeError::Io { .. } | ConfigMergeError::InDocument { .. }) => err,
            other => ConfigMergeError::InDocument {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, without document tags.
    pub fn root_cause(&self) -> &ConfigMergeError {
        match self {
            ConfigMergeError::InDocument { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigMergeError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for configmerge operations.
pub type Result<T> = std::result::Result<T, ConfigMergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_has_merge_exit_code() {
        let err = ConfigMergeError::TypeMismatch {
            path: "a.b".to_string(),
            base: ValueKind::Integer,
            incoming: ValueKind::Text,
        };
        assert_eq!(err.exit_code(), exit_codes::MERGE_FAILURE);
    }

    #[test]
    fn unknown_format_is_user_error() {
        let err = ConfigMergeError::UnknownFormat("txt".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn parse_errors_are_input_failures() {
        let err = ConfigMergeError::Parse {
            format: Format::Json,
            message: "expected value".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::INPUT_FAILURE);

        let err = ConfigMergeError::UnsupportedType("tagged value".to_string());
        assert_eq!(err.exit_code(), exit_codes::INPUT_FAILURE);
    }

    #[test]
    fn unrepresentable_is_output_failure() {
        let err = ConfigMergeError::Unrepresentable {
            format: Format::Properties,
            message: "nested mapping".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::OUTPUT_FAILURE);
    }

    #[test]
    fn in_document_keeps_exit_code_and_names_file() {
        let err = ConfigMergeError::TypeMismatch {
            path: "a".to_string(),
            base: ValueKind::Mapping,
            incoming: ValueKind::Sequence,
        }
        .in_document("override.yaml");

        assert_eq!(err.exit_code(), exit_codes::MERGE_FAILURE);
        assert_eq!(
            err.to_string(),
            "override.yaml: type mismatch at 'a': cannot merge sequence into mapping"
        );
        assert!(matches!(
            err.root_cause(),
            ConfigMergeError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn in_document_does_not_wrap_io_errors() {
        let err = ConfigMergeError::io(
            "read",
            "a.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        )
        .in_document("a.json");

        assert!(matches!(err, ConfigMergeError::Io { .. }));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ConfigMergeError::TypeMismatch {
            path: "server.port".to_string(),
            base: ValueKind::Integer,
            incoming: ValueKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at 'server.port': cannot merge text into integer"
        );

        let err = ConfigMergeError::io(
            "read",
            "missing.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read 'missing.yaml': denied");
    }
}
