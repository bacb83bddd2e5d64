//! Recursive merge engine.
//!
//! [`merge`] folds an incoming configuration value into a base value:
//!
//! 1. An incoming Null never overwrites anything.
//! 2. A Null base is replaced by the incoming value.
//! 3. Mappings merge key by key. New keys are inserted verbatim, existing keys
//!    are merged recursively.
//! 4. Sequences append incoming elements that are not structural duplicates
//!    of anything already present.
//! 5. Scalars of the same kind resolve to the incoming value.
//!
//! Any other combination fails with [`ConfigMergeError::TypeMismatch`], naming
//! the key path where the conflict was found.


use crate::canonical::canonicalize;
use crate::error::{ConfigMergeError, Result};
use crate::value::{Mapping, Value, ValueKind};
use std::collections::HashSet;
use std::fmt;
use tracing::trace;

/// Merge `incoming` into `base` and return the result.
///
/// `base` is consumed; when the merge fails the partially merged value is
/// dropped along with it.
pub fn merge(mut base: Value, incoming: &Value) -> Result<Value> {
    merge_into(&mut base, incoming)?;
    Ok(base)
}

/// Merge `incoming` into `base` in place.
///
/// On error `base` may already hold part of the incoming data. Use [`merge`]
/// when that must not be observable.
pub fn merge_into(base: &mut Value, incoming: &Value) -> Result<()> {
    merge_at(base, incoming, &mut KeyPath::default())
}

/// Merge a series of documents left to right, starting from Null.
pub fn merge_all<I>(values: I) -> Result<Value>
where
    I: IntoIterator<Item = Value>,
{
    values.into_iter().enumerate().try_fold(Value::Null, |acc, (index, value)| {
        trace!(index, kind = %value.kind(), "merging document");
        merge(acc, &value)
    })
}

/// Merge the entries of `incoming` into `base`.
///
/// Keys missing from `base` are appended with the incoming value as is.
/// Keys present in both are merged recursively.
pub fn merge_mapping(base: &mut Mapping, incoming: &Mapping) -> Result<()> {
    merge_mapping_at(base, incoming, &mut KeyPath::default())
}

/// Append the elements of `incoming` to `base`, skipping structural
/// duplicates.
///
/// An element is skipped when an equal element is already in `base` or was
/// appended earlier in the same call. Duplicates already inside `base` are
/// kept.
pub fn merge_sequence(base: &mut Vec<Value>, incoming: &[Value]) {
    let mut members: HashSet<_> = base.iter().map(canonicalize).collect();
    let before = base.len();

    for value in incoming {
        if members.insert(canonicalize(value)) {
            base.push(value.clone());
        }
    }

    trace!(
        appended = base.len() - before,
        skipped = incoming.len() - (base.len() - before),
        "merged sequence"
    );
}

/// Resolve two scalars of the same kind to the incoming one.
///
/// Booleans, integers, floats and text are each only compatible with their
/// own kind.
pub fn merge_scalar(value1: &Value, value2: &Value) -> Result<Value> {
    merge_scalar_at(value1, value2, &KeyPath::default())
}

fn merge_at<'a>(base: &mut Value, incoming: &'a Value, path: &mut KeyPath<'a>) -> Result<()> {
    if incoming.is_null() {
        return Ok(());
    }

    match base {
        Value::Null => {
            *base = incoming.clone();
            Ok(())
        }
        Value::Mapping(map) => match incoming {
            Value::Mapping(other) => merge_mapping_at(map, other, path),
            other => Err(path.mismatch(ValueKind::Mapping, other.kind())),
        },
        Value::Sequence(items) => match incoming {
            Value::Sequence(other) => {
                merge_sequence(items, other);
                Ok(())
            }
            other => Err(path.mismatch(ValueKind::Sequence, other.kind())),
        },
        _ => {
            *base = merge_scalar_at(base, incoming, path)?;
            Ok(())
        }
    }
}

fn merge_mapping_at<'a>(
    base: &mut Mapping,
    incoming: &'a Mapping,
    path: &mut KeyPath<'a>,
) -> Result<()> {
    for (key, value) in incoming {
        match base.get_mut(key) {
            Some(slot) => {
                path.push(key);
                merge_at(slot, value, path)?;
                path.pop();
            }
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(())
}

fn merge_scalar_at(value1: &Value, value2: &Value, path: &KeyPath<'_>) -> Result<Value> {
    match (value1, value2) {
        (Value::Bool(_), Value::Bool(_))
        | (Value::Integer(_), Value::Integer(_))
        | (Value::Float(_), Value::Float(_))
        | (Value::Text(_), Value::Text(_)) => Ok(value2.clone()),
        _ => Err(path.mismatch(value1.kind(), value2.kind())),
    }
}

/// Keys leading from the document root to the value being merged.
#[derive(Debug, Default)]
struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    fn push(&mut self, key: &'a str) {
        self.segments.push(key);
    }

    fn pop(&mut self) {
        self.segments.pop();
    }

    fn mismatch(&self, base: ValueKind, incoming: ValueKind) -> ConfigMergeError {
        ConfigMergeError::TypeMismatch {
            path: self.to_string(),
            base,
            incoming,
        }
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        f.write_str(&self.segments.join("."))
    }
}
