//! JSON adapter.

use super::{Format, classify_error};
use crate::error::{ConfigMergeError, Result};
use crate::value::Value;

pub(super) fn load(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| classify_error(Format::Json, e.to_string()))
}

/// Pretty-print with 2-space indentation. Non-ASCII text is written as UTF-8.
pub(super) fn save(value: &Value) -> Result<Vec<u8>> {
    reject_non_finite(value)?;

    let mut out = serde_json::to_vec_pretty(value).map_err(|e| ConfigMergeError::Unrepresentable {
        format: Format::Json,
        message: e.to_string(),
    })?;
    out.push(b'\n');
    Ok(out)
}

// serde_json silently writes NaN and infinities as `null`.
fn reject_non_finite(value: &Value) -> Result<()> {
    match value {
        Value::Float(f) if !f.is_finite() => Err(ConfigMergeError::Unrepresentable {
            format: Format::Json,
            message: format!("{} has no JSON representation", f),
        }),
        Value::Mapping(map) => map.values().try_for_each(reject_non_finite),
        Value::Sequence(items) => items.iter().try_for_each(reject_non_finite),
        _ => Ok(()),
    }
}
