//! Recursive container transformers.
//!
//! Every transformer here has the same shape: walk the container, recurse
//! into nested arrays and objects with the same parameters, and replace each
//! leaf with the result of a leaf rule. The output has exactly the keys,
//! order and nesting of the input; only leaves change. Inputs are borrowed
//! and never modified.
//!
//! All of them are thin wrappers over [`map_leaves`]. A leaf passed at the top
//! level is transformed directly.
//!
//! ## Examples
//!
//! ```rust
//! use varconv::{array, value};
//!
//! let input = value!({ "a": { "b": "  x  " }, "c": [" y "] });
//! assert_eq!(array::trim(&input), value!({ "a": { "b": "x" }, "c": ["y"] }));
//! ```

use crate::coerce::{self, as_text};
use crate::text;
use crate::Value;

/// Rebuilds `value` with `leaf` applied to every non-container value.
///
/// Recursion always continues into the branch being visited, so a nested
/// container is transformed in place of itself and nowhere else.
///
/// # Examples
///
/// ```rust
/// use varconv::{array, value, Value};
///
/// let doubled = array::map_leaves(&value!([1, [2, 3]]), |leaf| {
///     Value::from(leaf.as_i64().unwrap_or(0) * 2)
/// });
/// assert_eq!(doubled, value!([2, [4, 6]]));
/// ```
pub fn map_leaves<F>(value: &Value, leaf: F) -> Value
where
    F: Fn(&Value) -> Value,
{
    fn walk<F>(value: &Value, leaf: &F) -> Value
    where
        F: Fn(&Value) -> Value,
    {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|item| walk(item, leaf)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), walk(item, leaf)))
                    .collect(),
            ),
            other => leaf(other),
        }
    }

    walk(value, &leaf)
}

fn map_text<F>(value: &Value, rule: F) -> Value
where
    F: Fn(&str) -> String,
{
    map_leaves(value, |leaf| Value::String(rule(&*as_text(leaf))))
}

/// Applies [`coerce::to_number`] to every leaf.
pub fn to_number(value: &Value) -> Value {
    map_leaves(value, |leaf| Value::Number(coerce::to_number(leaf)))
}

/// Applies [`coerce::to_bool`] with `default` to every leaf.
///
/// Only leaves are converted: a nested empty array stays an (empty) array.
pub fn to_bool(value: &Value, default: bool) -> Value {
    map_leaves(value, |leaf| Value::Bool(coerce::to_bool(leaf, default)))
}

/// Stringifies every leaf.
pub fn to_string(value: &Value) -> Value {
    map_leaves(value, |leaf| Value::String(coerce::to_string(leaf)))
}

/// Truncating integer conversion of every leaf.
pub fn to_int(value: &Value) -> Value {
    map_leaves(value, |leaf| Value::from(coerce::to_int(leaf)))
}

/// Floating-point conversion of every leaf.
pub fn to_float(value: &Value) -> Value {
    map_leaves(value, |leaf| Value::from(coerce::to_float(leaf)))
}

/// Keeps only the first line of every leaf.
pub fn to_first_line(value: &Value) -> Value {
    map_text(value, text::first_line)
}

/// Joins the lines of every leaf with `separator`.
pub fn to_line(value: &Value, separator: &str) -> Value {
    map_text(value, |s| text::join_lines(s, separator))
}

/// Strips markup tags from every leaf.
pub fn remove_html(value: &Value) -> Value {
    map_text(value, text::strip_tags)
}

/// Escapes `& < > " '` in every leaf.
pub fn escape_special_chars(value: &Value) -> Value {
    map_text(value, text::escape_special_chars)
}

/// Trims whitespace around every leaf.
pub fn trim(value: &Value) -> Value {
    map_text(value, |s| text::trim(s).to_string())
}

/// Replaces every literal `from` with `to` in every leaf.
pub fn replace(value: &Value, from: &str, to: &str) -> Value {
    map_text(value, |s| text::replace(s, from, to))
}

/// Removes Unicode decimal digits from every leaf.
pub fn remove_numbers(value: &Value) -> Value {
    map_text(value, text::remove_numbers)
}

/// Unicode lowercase of every leaf.
pub fn to_lowercase(value: &Value) -> Value {
    map_text(value, str::to_lowercase)
}

/// Unicode uppercase of every leaf.
pub fn to_uppercase(value: &Value) -> Value {
    map_text(value, str::to_uppercase)
}

/// Caps every leaf at `bound` (see [`coerce::to_minimum`]). Leaves become floats.
pub fn to_minimum(value: &Value, bound: f64) -> Value {
    map_leaves(value, |leaf| Value::from(coerce::to_minimum(leaf, bound)))
}

/// Floors every leaf at `bound` (see [`coerce::to_maximum`]). Leaves become floats.
pub fn to_maximum(value: &Value, bound: f64) -> Value {
    map_leaves(value, |leaf| Value::from(coerce::to_maximum(leaf, bound)))
}

/// Absolute value of every leaf.
pub fn to_absolute(value: &Value) -> Value {
    map_leaves(value, |leaf| Value::Number(coerce::to_absolute(leaf)))
}

/// Truncates every leaf to at most `|length|` Unicode scalar values.
pub fn str_max_length(value: &Value, length: i64) -> Value {
    map_text(value, |s| text::str_max_length(s, length))
}
