//! configmerge: merge YAML, JSON and Java-properties configuration documents.
//!
//! The core is the recursive [`merge`](merge::merge) engine over the
//! [`Value`] tree, with [`canonicalize`](canonical::canonicalize) providing the
//! structural equality used to drop duplicate sequence entries. The `format`
//! module loads and saves documents; `commands` drives the CLI.
//!
//! ```
//! use configmerge::format::{Format, load, save};
//! use configmerge::merge::merge;
//!
//! let base = load(br#"{"a": {"x": 1, "y": 2}, "l": [1, 2]}"#, Format::Json)?;
//! let patch = load(b"a:\n  y: 3\nl: [2, 3]\n", Format::Yaml)?;
//!
//! let merged = merge(base, &patch)?;
//! assert_eq!(
//!     save(&merged, Format::Yaml)?,
//!     b"a:\n  x: 1\n  y: 3\nl:\n  - 1\n  - 2\n  - 3\n"
//! );
//! # Ok::<(), configmerge::error::ConfigMergeError>(())
//! ```

pub mod canonical;
pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod fs;
pub mod logging;
pub mod merge;
pub mod value;

#[cfg(test)]
mod test_support;

pub use canonical::{Canonical, canonicalize};
pub use error::{ConfigMergeError, Result};
pub use format::{Format, load, save};
pub use merge::{merge, merge_all};
pub use value::{Mapping, Value, ValueKind};
