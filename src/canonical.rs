//! Canonical (deep-frozen) form of configuration values.
//!
//! [`Canonical`] is an immutable mirror of [`Value`] with value-based `Eq`,
//! `Ord` and `Hash`, so it can be stored in a set. Mappings become sorted maps,
//! which makes two mappings with the same entries equal regardless of their
//! insertion order. Sequences stay ordered.
//!
//! Integers and floats are distinct canonical kinds: `1` and `1.0` are not
//! duplicates of each other.

use crate::value::Value;
use std::collections::BTreeMap;

/// Immutable, hashable representation of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Canonical {
    Null,
    Bool(bool),
    Integer(i64),
    Float(FloatBits),
    Text(Box<str>),
    Mapping(BTreeMap<Box<str>, Canonical>),
    Sequence(Box<[Canonical]>),
}

/// Bit pattern of an `f64`, normalised so that numerically equal floats
/// compare and hash equal.
///
/// `-0.0` is stored as `0.0` and every NaN as the same quiet NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloatBits(u64);

impl FloatBits {
    pub fn new(f: f64) -> Self {
        let f = if f == 0.0 {
            0.0
        } else if f.is_nan() {
            f64::NAN
        } else {
            f
        };
        FloatBits(f.to_bits())
    }

    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Convert `value` into its canonical form.
pub fn canonicalize(value: &Value) -> Canonical {
    match value {
        Value::Null => Canonical::Null,
        Value::Bool(b) => Canonical::Bool(*b),
        Value::Integer(i) => Canonical::Integer(*i),
        Value::Float(f) => Canonical::Float(FloatBits::new(*f)),
        Value::Text(s) => Canonical::Text(s.as_str().into()),
        Value::Mapping(map) => Canonical::Mapping(
            map.iter()
                .map(|(key, value)| (key.as_str().into(), canonicalize(value)))
                .collect(),
        ),
        Value::Sequence(items) => Canonical::Sequence(items.iter().map(canonicalize).collect()),
    }
}
