//! Proptest strategies for arbitrary JSON documents.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for an arbitrary JSON document tree.
///
/// Scalars stick to integers, strings, bools, and null; floats are left
/// out so generated documents survive a serialize/parse round trip with
/// plain `Value` equality.
pub fn arb_document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 äöå_-]{0,12}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}
