//! Java properties adapter.
//!
//! Follows the line format of `java.util.Properties`:
//! - `#` or `!` as the first non-blank character starts a comment line
//! - a line ending in an odd number of backslashes continues on the next line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other escaped character
//!   stands for itself
//!
//! Every loaded value is text. Saving only supports a flat mapping of scalars.

use super::{Format, decode_utf8};
use crate::error::{ConfigMergeError, Result};
use crate::value::{Mapping, Value};

pub(super) fn load(bytes: &[u8]) -> Result<Value> {
    let text = decode_utf8(bytes, Format::Properties)?;
    Ok(Value::Mapping(parse_properties(text)?))
}

pub(super) fn save(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Mapping(map) => Ok(write_properties(map)?.into_bytes()),
        other => Err(unrepresentable(format!(
            "top-level {} is not a mapping",
            other.kind()
        ))),
    }
}

/// Parse properties text into a mapping of text values.
///
/// When a key repeats, the last value wins.
pub fn parse_properties(text: &str) -> Result<Mapping> {
    let mut map = Mapping::new();
    for (number, line) in logical_lines(text) {
        let (key, value) = split_entry(&line);
        let key = unescape(key).map_err(|msg| parse_error(number, msg))?;
        let value = unescape(value).map_err(|msg| parse_error(number, msg))?;
        map.insert(key, Value::Text(value));
    }
    Ok(map)
}

/// Render a flat mapping as `key=value` lines.
///
/// Booleans and numbers are written in their textual form, Null as an empty
/// value. Nested mappings and sequences cannot be expressed.
pub fn write_properties(map: &Mapping) -> Result<String> {
    let mut out = String::new();
    for (key, value) in map {
        let text = match value {
            Value::Null => String::new(),
            Value::Mapping(_) | Value::Sequence(_) => {
                return Err(unrepresentable(format!(
                    "value of '{}' is a {}; only flat mappings of scalars are supported",
                    key,
                    value.kind()
                )));
            }
            scalar => scalar.scalar_text().unwrap_or_default(),
        };
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, &text, false);
        out.push('\n');
    }
    Ok(out)
}

/// Join continuation lines and drop comments and blank lines.
///
/// Yields each logical line with the 1-based number of its first physical
/// line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let stripped = raw.trim_start_matches([' ', '\t', '\u{c}']);

        let (number, mut line) = match current.take() {
            Some(pending) => pending,
            None => {
                if stripped.is_empty() || stripped.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        let trailing = stripped.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            line.push_str(&stripped[..stripped.len() - 1]);
            current = Some((number, line));
        } else {
            line.push_str(stripped);
            lines.push((number, line));
        }
    }

    // A continuation on the last line of the file ends the entry.
    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if !escaped && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    let mut rest = &line[value_start..];
    loop {
        rest = rest.trim_start_matches(is_blank);
        match rest.chars().next() {
            Some(c @ ('=' | ':')) if !has_separator => {
                has_separator = true;
                rest = &rest[c.len_utf8()..];
            }
            _ => break,
        }
    }

    (&line[..key_end], rest)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_code_unit(&mut chars)?;
                out.push(decode_code_unit(unit, &mut chars)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>) -> std::result::Result<u16, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return Err(format!("malformed \\u escape '\\u{}'", digits));
    }
    u16::from_str_radix(&digits, 16).map_err(|_| format!("malformed \\u escape '\\u{}'", digits))
}

/// Turn a UTF-16 code unit into a char, reading the low half of a surrogate
/// pair from the following `\uXXXX` escape when needed.
fn decode_code_unit(unit: u16, chars: &mut std::str::Chars<'_>) -> std::result::Result<char, String> {
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(u32::from(unit))
            .ok_or_else(|| format!("unpaired surrogate \\u{:04X}", unit));
    }

    let rest = chars.as_str();
    if !rest.starts_with("\\u") {
        return Err(format!("unpaired surrogate \\u{:04X}", unit));
    }
    chars.nth(1);
    let low = read_code_unit(chars)?;
    char::decode_utf16([unit, low])
        .next()
        .and_then(|decoded| decoded.ok())
        .ok_or_else(|| format!("invalid surrogate pair \\u{:04X}\\u{:04X}", unit, low))
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
}

fn parse_error(line: usize, message: String) -> ConfigMergeError {
    ConfigMergeError::Parse {
        format: Format::Properties,
        message: format!("line {}: {}", line, message),
    }
}

fn unrepresentable(message: String) -> ConfigMergeError {
    ConfigMergeError::Unrepresentable {
        format: Format::Properties,
        message,
    }
}
