//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random records
//! and field paths, plus the property tests that exercise the evaluator with
//! them.

#![cfg(test)]

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for a single path segment
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Strategy for dotted paths of one to four segments
pub fn path_segments_strategy() -> impl Strategy<Value = Vec<String>> {
    vec(segment_strategy(), 1..=4)
}

/// Strategy for generating scalar JSON values
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ,.]{0,30}".prop_map(Value::String),
    ]
}

/// Strategy for generating JSON values with controlled depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(
        3,  // max depth
        16, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Value::Array),
                hash_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for non-mapping values
pub fn non_mapping_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar_strategy(),
        vec(scalar_strategy(), 0..4).prop_map(Value::Array),
    ]
}

/// Nest `leaf` under `segments`, so that `segments.join(".")` resolves to it
pub fn nest(segments: &[String], leaf: Value) -> Value {
    segments.iter().rev().fold(leaf, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.clone(), inner);
        Value::Object(map)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transform::{built_in, transform, TransformSpec};

    proptest! {
        #[test]
        fn test_resolvable_path_yields_leaf(
            segments in path_segments_strategy(),
            leaf in json_value_strategy(),
            nullable in any::<bool>(),
        ) {
            let path = segments.join(".");
            let record = nest(&segments, leaf.clone());

            let result = transform(&TransformSpec::field(path.as_str()), &record, nullable).unwrap();
            prop_assert_eq!(result.len(), 1);
            prop_assert_eq!(result.get(&path), Some(&leaf));
        }

        #[test]
        fn test_unresolvable_path(
            segments in path_segments_strategy(),
            other in segment_strategy(),
        ) {
            let path = segments.join(".");
            prop_assume!(other != segments[0]);
            let record = nest(&[other], Value::from(1));
            let spec = TransformSpec::field(path.as_str());

            let err = transform(&spec, &record, false).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::FieldMissing);
            prop_assert_eq!(err.locator(), segments[0].as_str());

            let result = transform(&spec, &record, true).unwrap();
            prop_assert_eq!(result.get(&path), Some(&Value::Null));
        }

        #[test]
        fn test_repeated_list_items_collapse(
            segments in path_segments_strategy(),
            leaf in scalar_strategy(),
            copies in 1usize..5,
        ) {
            let path = segments.join(".");
            let record = nest(&segments, leaf);
            let single = transform(&TransformSpec::field(path.as_str()), &record, false).unwrap();
            let repeated = TransformSpec::list(std::iter::repeat(path.as_str()).take(copies));

            prop_assert_eq!(transform(&repeated, &record, false).unwrap(), single);
        }

        #[test]
        fn test_non_mapping_input_to_composites_mismatches(
            input in non_mapping_strategy(),
            nullable in any::<bool>(),
        ) {
            let list = TransformSpec::list(["a"]);
            let object = TransformSpec::object().entry("a", "b").build().unwrap();

            prop_assert_eq!(transform(&list, &input, nullable).unwrap_err().kind(), ErrorKind::TypeMismatch);
            prop_assert_eq!(transform(&object, &input, nullable).unwrap_err().kind(), ErrorKind::TypeMismatch);
        }

        #[test]
        fn test_mask_is_idempotent(text in "[a-z0-9#]{0,40}") {
            let mask = built_in::mask("s", "[0-9]", "#").unwrap();
            let once = transform(&mask, &serde_json::json!({ "s": text }), false).unwrap();
            let twice = transform(&mask, &Value::Object(once.clone()), false).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_split_rejoins(text in "[a-z,]{0,40}") {
            let split = built_in::split("s", ",").unwrap();
            let result = transform(&split, &serde_json::json!({ "s": text.clone() }), false).unwrap();
            let parts: Vec<&str> = result["s"]
                .as_array()
                .unwrap()
                .iter()
                .map(|part| part.as_str().unwrap())
                .collect();
            prop_assert_eq!(parts.join(","), text);
        }

        #[test]
        fn test_loaded_documents_render_back(value in json_value_strategy()) {
            if let Ok(spec) = TransformSpec::from_value(&value) {
                prop_assert_eq!(spec.to_document(), value);
            }
        }
    }
}
