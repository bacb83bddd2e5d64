//! serde bridge for [`Value`].
//!
//! Deserialization goes through `deserialize_any`, so it only works with
//! self-describing formats (JSON, YAML). Anything the value model cannot hold
//! is reported with an `unsupported type:` message, which the format adapters
//! turn into [`ConfigMergeError::UnsupportedType`](crate::error::ConfigMergeError).

use super::{Mapping, Value, ValueKind};
use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Prefix of deserializer messages that describe data outside the model.
pub(crate) const UNSUPPORTED_PREFIX: &str = "unsupported type: ";

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Value::Sequence(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

fn unsupported<E: de::Error>(what: impl fmt::Display) -> E {
    E::custom(format_args!("{UNSUPPORTED_PREFIX}{what}"))
}

fn key_repr(kind: ValueKind, key: &str) -> String {
    match kind {
        ValueKind::Text => format!("'{key}'"),
        _ => key.to_string(),
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Integer(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        i64::try_from(u)
            .map(Value::Integer)
            .map_err(|_| unsupported(format_args!("integer {u} is out of range")))
    }

    fn visit_i128<E: de::Error>(self, i: i128) -> Result<Value, E> {
        i64::try_from(i)
            .map(Value::Integer)
            .map_err(|_| unsupported(format_args!("integer {i} is out of range")))
    }

    fn visit_u128<E: de::Error>(self, u: u128) -> Result<Value, E> {
        i64::try_from(u)
            .map(Value::Integer)
            .map_err(|_| unsupported(format_args!("integer {u} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Text(s))
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Value, E> {
        Err(unsupported("binary data"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        let mut key_kinds: HashMap<String, ValueKind> = HashMap::new();
        while let Some(key) = access.next_key::<Value>()? {
            let kind = key.kind();
            let key = key.scalar_text().ok_or_else(|| {
                unsupported::<A::Error>(format_args!("{kind} used as a mapping key"))
            })?;
            // `1` and `'1'` are distinct keys in the document but not here.
            if let Some(previous) = key_kinds.insert(key.clone(), kind)
                && previous != kind
            {
                return Err(unsupported(format_args!(
                    "{kind} key {} collides with {previous} key {}",
                    key_repr(kind, &key),
                    key_repr(previous, &key),
                )));
            }
            let value = access.next_value()?;
            // Later duplicates win but keep the first key's position.
            map.insert(key, value);
        }
        Ok(Value::Mapping(map))
    }

    // serde_yaml surfaces `!tag value` nodes as enums.
    fn visit_enum<A: EnumAccess<'de>>(self, _: A) -> Result<Value, A::Error> {
        Err(unsupported("tagged value"))
    }
}
