//! Canonical JSON encoding for deterministic serialization.
//!
//! This module produces a normalized byte encoding of a JSON document:
//! - Object keys sorted lexicographically by UTF-8 bytes
//! - No insignificant whitespace (`,` and `:` separators only)
//! - UTF-8 output, locale-independent
//! - Scalar types preserved exactly (integer 1 and string "1" stay distinct)
//!
//! The canonical encoding is critical: it ensures that deeply equal
//! documents produce identical bytes (and thus identical digests)
//! regardless of object key insertion order or formatting of the input.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Convert any serializable input into a JSON tree.
///
/// This is the only fallible step of canonicalization: input that has no
/// JSON representation (maps with non-string keys and the like) is
/// rejected with [`CoreError::Unserializable`].
pub fn to_canonical_value<T: Serialize + ?Sized>(document: &T) -> CoreResult<Value> {
    serde_json::to_value(document).map_err(|e| CoreError::Unserializable(e.to_string()))
}

/// Encode a JSON tree to canonical bytes.
///
/// Deep-equal values produce byte-identical output, and byte-identical
/// output implies deep equality.
pub fn canonical_json_bytes(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

/// Recursively encode a JSON value.
fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            // serde_json's Display for Number is its serialized form,
            // so no reformatting can occur here.
            buf.extend_from_slice(n.to_string().as_bytes());
        }
        Value::String(s) => write_string(buf, s),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item);
            }
            buf.push(b']');
        }
        Value::Object(map) => write_object(buf, map),
    }
}

/// Encode an object with keys sorted by UTF-8 byte comparison.
///
/// Sorting is explicit rather than relying on the map's iteration order,
/// which changes if serde_json's `preserve_order` feature is enabled
/// anywhere in the dependency graph.
fn write_object(buf: &mut Vec<u8>, map: &serde_json::Map<String, Value>) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_unstable();

    buf.push(b'{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        write_string(buf, key);
        buf.push(b':');
        write_value(buf, &map[key.as_str()]);
    }
    buf.push(b'}');
}

/// Encode a JSON string with the standard escape set.
///
/// Matches serde_json's escaping: `"` and `\` are escaped, control
/// characters below 0x20 use the short forms where they exist and
/// `\u00XX` otherwise. Everything else is emitted as raw UTF-8.
fn write_string(buf: &mut Vec<u8>, s: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    buf.push(b'"');
    for c in s.chars() {
        match c {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\u{08}' => buf.extend_from_slice(b"\\b"),
            '\t' => buf.extend_from_slice(b"\\t"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\u{0c}' => buf.extend_from_slice(b"\\f"),
            '\r' => buf.extend_from_slice(b"\\r"),
            c if (c as u32) < 0x20 => {
                let n = c as u32;
                buf.extend_from_slice(b"\\u00");
                buf.push(HEX[(n >> 4) as usize]);
                buf.push(HEX[(n & 0xf) as usize]);
            }
            c => {
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    buf.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encoding_deterministic() {
        let doc = json!({
            "groups": [{"rules": [{"field": "code", "relation": "contains", "value": "CS"}], "is_must": true}]
        });
        assert_eq!(canonical_json_bytes(&doc), canonical_json_bytes(&doc));
    }

    #[test]
    fn test_key_order_insensitive() {
        let a: Value = serde_json::from_str(r#"{"b":1,"a":{"y":2,"x":3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a":{"x":3,"y":2},"b":1}"#).unwrap();
        assert_eq!(canonical_json_bytes(&a), canonical_json_bytes(&b));
    }

    #[test]
    fn test_keys_sorted_and_compact() {
        let doc = json!({"b": 1, "a": [true, null], "c": "x"});
        assert_eq!(
            canonical_json_bytes(&doc),
            br#"{"a":[true,null],"b":1,"c":"x"}"#.to_vec()
        );
    }

    #[test]
    fn test_scalar_types_distinct() {
        // Integer 1 and string "1" must not canonicalize to the same bytes.
        assert_ne!(
            canonical_json_bytes(&json!({"v": 1})),
            canonical_json_bytes(&json!({"v": "1"}))
        );
    }

    #[test]
    fn test_numbers_not_reformatted() {
        let doc: Value = serde_json::from_str(r#"[0,-7,1.5,18446744073709551615]"#).unwrap();
        assert_eq!(
            canonical_json_bytes(&doc),
            b"[0,-7,1.5,18446744073709551615]".to_vec()
        );
    }

    #[test]
    fn test_string_escaping() {
        let doc = json!({"s": "a\"b\\c\n\u{01}"});
        assert_eq!(
            canonical_json_bytes(&doc),
            br#"{"s":"a\"b\\c\n\u0001"}"#.to_vec()
        );
    }

    #[test]
    fn test_unicode_passthrough() {
        let doc = json!(["täysi", "курс"]);
        let bytes = canonical_json_bytes(&doc);
        assert_eq!(bytes, "[\"täysi\",\"курс\"]".as_bytes().to_vec());
    }

    #[test]
    fn test_canonical_output_reparses_equal() {
        let doc = json!({"z": [1, {"k": null}], "a": -2.25});
        let reparsed: Value =
            serde_json::from_slice(&canonical_json_bytes(&doc)).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_to_canonical_value_rejects_non_string_keys() {
        let mut m = std::collections::HashMap::new();
        m.insert(vec!["not".to_string(), "a string key".to_string()], 1);
        assert!(to_canonical_value(&m).is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_canonical_output_reparses_equal(
            doc in proptest::collection::btree_map("[a-z_]{1,6}", proptest::prelude::any::<i64>(), 0..8)
        ) {
            let value = to_canonical_value(&doc).unwrap();
            let bytes = canonical_json_bytes(&value);
            let reparsed: Value = serde_json::from_slice(&bytes).unwrap();
            proptest::prop_assert_eq!(value, reparsed);
        }
    }

    #[test]
    fn test_to_canonical_value_accepts_structs() {
        #[derive(serde::Serialize)]
        struct Rule {
            field: String,
            value: i32,
        }
        let v = to_canonical_value(&Rule { field: "code".into(), value: 3 }).unwrap();
        assert_eq!(v, json!({"field": "code", "value": 3}));
    }
}
