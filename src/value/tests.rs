//! Tests for the value model and its serde bridge.

use super::{Mapping, Value, ValueKind};
use crate::test_support::json;

#[test]
fn test_kind_names() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::from(true).kind().to_string(), "boolean");
    assert_eq!(Value::from(3).kind().to_string(), "integer");
    assert_eq!(Value::from(0.5).kind().to_string(), "float");
    assert_eq!(Value::from("x").kind().to_string(), "text");
    assert_eq!(Value::Mapping(Mapping::new()).kind().to_string(), "mapping");
    assert_eq!(Value::Sequence(vec![]).kind().to_string(), "sequence");
}

#[test]
fn test_deserialize_json_document() {
    let value = json(r#"{"name": "demo", "port": 8080, "ratio": 0.5, "debug": false, "tags": ["a", null]}"#);

    assert_eq!(value.get("name"), Some(&Value::from("demo")));
    assert_eq!(value.get("port"), Some(&Value::Integer(8080)));
    assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(value.get("debug"), Some(&Value::Bool(false)));
    assert_eq!(
        value.get("tags"),
        Some(&Value::Sequence(vec![Value::from("a"), Value::Null]))
    );
}

#[test]
fn test_mapping_preserves_document_order() {
    let value = json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);
    let keys: Vec<&str> = value
        .as_mapping()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_duplicate_keys_last_value_wins() {
    let value = json(r#"{"a": 1, "b": 2, "a": 3}"#);
    let keys: Vec<&str> = value
        .as_mapping()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(value.get("a"), Some(&Value::Integer(3)));
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_scalar_yaml_keys_become_text() {
    let value: Value = serde_yaml::from_str("1: one\ntrue: yes\n2.5: half\n").unwrap();

    assert_eq!(value.get("1"), Some(&Value::from("one")));
    assert_eq!(value.get("true"), Some(&Value::from("yes")));
    assert_eq!(value.get("2.5"), Some(&Value::from("half")));
}

#[test]
fn test_scalar_key_colliding_with_text_key_is_unsupported() {
    let err = serde_yaml::from_str::<Value>("1: int-key\n'1': text-key\n").unwrap_err();
    assert!(
        err.to_string()
            .contains("unsupported type: text key '1' collides with integer key 1"),
        "{err}"
    );

    let err = serde_yaml::from_str::<Value>("'true': b\ntrue: a\n").unwrap_err();
    assert!(
        err.to_string()
            .contains("boolean key true collides with text key 'true'"),
        "{err}"
    );
}

#[test]
fn test_sequence_key_is_unsupported() {
    let err = serde_yaml::from_str::<Value>("? [a, b]\n: value\n").unwrap_err();
    assert!(err.to_string().contains("unsupported type"), "{err}");
}

#[test]
fn test_tagged_yaml_value_is_unsupported() {
    let err = serde_yaml::from_str::<Value>("key: !custom 3\n").unwrap_err();
    assert!(err.to_string().contains("unsupported type"), "{err}");
}

#[test]
fn test_out_of_range_integer_is_unsupported() {
    let err = serde_json::from_str::<Value>("18446744073709551615").unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");
}

#[test]
fn test_serialize_to_json() {
    let value = json(r#"{"b": [1, 2.5, "x"], "a": {"on": true, "off": null}}"#);
    let text = serde_json::to_string(&value).unwrap();

    assert_eq!(text, r#"{"b":[1,2.5,"x"],"a":{"on":true,"off":null}}"#);
}

#[test]
fn test_scalar_text() {
    assert_eq!(Value::Float(2.0).scalar_text().as_deref(), Some("2.0"));
    assert_eq!(Value::Float(0.25).scalar_text().as_deref(), Some("0.25"));
    assert_eq!(Value::Integer(-4).scalar_text().as_deref(), Some("-4"));
    assert_eq!(Value::Null.scalar_text().as_deref(), Some("null"));
    assert_eq!(Value::Sequence(vec![]).scalar_text(), None);
}

#[test]
fn test_build_mapping_from_pairs() {
    let value: Value = [("a", Value::from(1)), ("b", Value::from(vec!["x", "y"]))]
        .into_iter()
        .collect();

    assert_eq!(value, json(r#"{"a": 1, "b": ["x", "y"]}"#));
}
