//! Property-based tests for the container transformers.
//!
//! Generated values mix every leaf kind with nested arrays and objects that
//! use both integer and string keys.

use proptest::prelude::*;
use varconv::text::is_decimal_digit;
use varconv::{array, coerce, Key, Pipeline, Transform, Value, ValueMap};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[ a-zA-Z0-9.,<>/&'\"\\-\r\n\t]{0,24}".prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (-5i64..50).prop_map(Key::Index),
        "[a-z]{1,6}".prop_map(Key::from),
    ]
}

fn nested_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<ValueMap>())),
        ]
    })
}

fn transform() -> impl Strategy<Value = Transform> {
    prop_oneof![
        Just(Transform::ToNumber),
        any::<bool>().prop_map(|default| Transform::ToBool { default }),
        Just(Transform::ToString),
        Just(Transform::ToInt),
        Just(Transform::ToFloat),
        Just(Transform::ToFirstLine),
        "[a-z|:;\\\\ -]{0,3}".prop_map(|separator| Transform::ToLine { separator }),
        Just(Transform::RemoveHtml),
        Just(Transform::EscapeSpecialChars),
        Just(Transform::Trim),
        ("[a-z:;\\\\]{1,3}", "[a-z:;\\\\]{0,3}")
            .prop_map(|(from, to)| Transform::Replace { from, to }),
        Just(Transform::RemoveNumbers),
        Just(Transform::ToLowercase),
        Just(Transform::ToUppercase),
        (-100.0f64..100.0).prop_map(|bound| Transform::ToMinimum { bound }),
        (-100.0f64..100.0).prop_map(|bound| Transform::ToMaximum { bound }),
        Just(Transform::ToAbsolute),
        (-20i64..20).prop_map(|length| Transform::StrMaxLength { length }),
    ]
}

fn same_shape(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| same_shape(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|((kp, p), (kq, q))| kp == kq && same_shape(p, q))
        }
        (p, q) => p.is_leaf() && q.is_leaf(),
    }
}

fn leaves(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(leaves).collect(),
        Value::Object(map) => map.values().flat_map(leaves).collect(),
        other => vec![other],
    }
}

proptest! {
    #[test]
    fn prop_transform_preserves_shape(value in nested_value(), t in transform()) {
        let out = t.apply(&value);
        prop_assert!(same_shape(&value, &out), "{} changed shape", t);
    }

    #[test]
    fn prop_transform_leaves_input_untouched(value in nested_value(), t in transform()) {
        let before = value.clone();
        let _ = t.apply(&value);
        prop_assert_eq!(value, before);
    }

    #[test]
    fn prop_container_apply_matches_leaf_rule(value in nested_value(), t in transform()) {
        let out = t.apply(&value);
        let expected: Vec<Value> = leaves(&value).into_iter().map(|l| t.apply_leaf(l)).collect();
        let actual: Vec<Value> = leaves(&out).into_iter().cloned().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_trim_is_idempotent(value in nested_value()) {
        let once = array::trim(&value);
        prop_assert_eq!(array::trim(&once), once);
    }

    #[test]
    fn prop_lowercase_is_idempotent(s in "[a-zA-ZÀ-ÿ0-9 ]{0,30}") {
        let once = array::to_lowercase(&Value::from(s));
        prop_assert_eq!(array::to_lowercase(&once), once);
    }

    #[test]
    fn prop_str_max_length_bounds_chars(s in "\\PC{0,40}", length in -50i64..50) {
        let out = array::str_max_length(&Value::from(s.clone()), length);
        let text = out.as_str().unwrap_or_default();
        prop_assert!(text.chars().count() as u64 <= length.unsigned_abs());
        prop_assert!(s.starts_with(text));
    }

    #[test]
    fn prop_remove_numbers_leaves_no_digits(s in "\\PC{0,40}") {
        let out = array::remove_numbers(&Value::from(s));
        let text = out.as_str().unwrap_or_default();
        prop_assert!(!text.chars().any(is_decimal_digit));
        prop_assert!(!text.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn prop_escaped_text_has_no_markup(s in "\\PC{0,40}") {
        let out = array::escape_special_chars(&Value::from(s));
        let text = out.as_str().unwrap_or_default();
        prop_assert!(!text.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn prop_integer_text_roundtrips(n in any::<i64>()) {
        let text = coerce::to_string(&Value::from(n));
        prop_assert_eq!(coerce::to_int(&Value::from(text)), n);
    }

    #[test]
    fn prop_clamps_stay_on_their_side(x in -1.0e6f64..1.0e6, bound in -1.0e6f64..1.0e6) {
        let value = Value::from(x);
        prop_assert!(coerce::to_minimum(&value, bound) <= bound);
        prop_assert!(coerce::to_maximum(&value, bound) >= bound);
    }

    #[test]
    fn prop_transform_text_form_roundtrips(t in transform()) {
        let parsed: Transform = t.to_string().parse().unwrap();
        prop_assert_eq!(parsed, t);
    }

    #[test]
    fn prop_pipeline_text_form_roundtrips(steps in prop::collection::vec(transform(), 0..6)) {
        let pipeline = Pipeline::from(steps);
        let parsed: Pipeline = pipeline.to_string().parse().unwrap();
        prop_assert_eq!(parsed, pipeline);
    }
}
