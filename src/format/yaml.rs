//! YAML adapter.
//!
//! Parsing is delegated to serde_yaml. Output is emitted here so the block
//! layout is fixed: mappings indent by 2, sequence dashes sit 2 columns in
//! from their parent and their content 4 columns in.
//!
//! ```yaml
//! name: demo
//! servers:
//!   - host: a
//!     port: 1
//! ```
//!
//! Scalars are rendered by serde_yaml, which takes care of quoting. Text that
//! spans several lines is written as a double-quoted scalar instead of a block
//! literal so it never depends on the surrounding indentation.

use super::{Format, classify_error, decode_utf8};
use crate::error::{ConfigMergeError, Result};
use crate::value::{Mapping, Value};

const MAPPING_INDENT: usize = 2;
const SEQUENCE_OFFSET: usize = 2;
/// Longest key YAML accepts in implicit `key: value` form.
const IMPLICIT_KEY_LIMIT: usize = 1024;

pub(super) fn load(bytes: &[u8]) -> Result<Value> {
    let text = decode_utf8(bytes, Format::Yaml)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|e| classify_error(Format::Yaml, e.to_string()))
}

pub(super) fn save(value: &Value) -> Result<Vec<u8>> {
    let mut out = String::new();
    match value {
        Value::Mapping(map) if !map.is_empty() => emit_mapping(map, 0, false, &mut out)?,
        Value::Sequence(items) if !items.is_empty() => emit_sequence(items, 0, false, &mut out)?,
        other => {
            out.push_str(&inline(other)?);
            out.push('\n');
        }
    }
    Ok(out.into_bytes())
}

/// Emit `map` as block entries at column `indent`.
///
/// With `continues_line` set, the first entry is written right after a
/// sequence dash that is already on the current line.
fn emit_mapping(map: &Mapping, indent: usize, continues_line: bool, out: &mut String) -> Result<()> {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !continues_line {
            push_indent(out, indent);
        }
        let key = text_scalar(key)?;
        if needs_explicit_key(&key) {
            out.push_str("? ");
            out.push_str(&key);
            out.push('\n');
            push_indent(out, indent);
        } else {
            out.push_str(&key);
        }
        out.push(':');

        match value {
            Value::Mapping(child) if !child.is_empty() => {
                out.push('\n');
                emit_mapping(child, indent + MAPPING_INDENT, false, out)?;
            }
            Value::Sequence(items) if !items.is_empty() => {
                out.push('\n');
                emit_sequence(items, indent + SEQUENCE_OFFSET, false, out)?;
            }
            other => {
                out.push(' ');
                out.push_str(&inline(other)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// Emit `items` as `- ` entries with the dash at column `indent`.
fn emit_sequence(items: &[Value], indent: usize, continues_line: bool, out: &mut String) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !continues_line {
            push_indent(out, indent);
        }
        out.push_str("- ");

        let content = indent + 2;
        match item {
            Value::Mapping(child) if !child.is_empty() => emit_mapping(child, content, true, out)?,
            Value::Sequence(inner) if !inner.is_empty() => emit_sequence(inner, content, true, out)?,
            other => {
                out.push_str(&inline(other)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// Render a scalar or an empty container on a single line.
fn inline(value: &Value) -> Result<String> {
    match value {
        Value::Mapping(_) => Ok("{}".to_string()),
        Value::Sequence(_) => Ok("[]".to_string()),
        Value::Text(text) => text_scalar(text),
        scalar => render(scalar),
    }
}

fn text_scalar(text: &str) -> Result<String> {
    let rendered = render(text)?;
    if !rendered.contains('\n') {
        return Ok(rendered);
    }
    // JSON string escapes are valid in YAML double-quoted scalars.
    serde_json::to_string(text).map_err(|e| unrepresentable(e.to_string()))
}

/// Keys that cannot be implicit are written as `? key` / `: value`.
fn needs_explicit_key(rendered: &str) -> bool {
    rendered.contains('\n') || rendered.chars().count() > IMPLICIT_KEY_LIMIT
}

fn render<T: serde::Serialize + ?Sized>(scalar: &T) -> Result<String> {
    let rendered = serde_yaml::to_string(scalar).map_err(|e| unrepresentable(e.to_string()))?;
    Ok(rendered.trim_end_matches('\n').to_string())
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

fn unrepresentable(message: String) -> ConfigMergeError {
    ConfigMergeError::Unrepresentable {
        format: Format::Yaml,
        message,
    }
}
