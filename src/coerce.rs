//! Scalar coercion rules.
//!
//! Every function here is total: any [`Value`] goes in, a value of the target
//! type comes out. Inputs that make no sense for the target degrade to the
//! type's zero (`0`, `0.0`, `""`, `false`) instead of failing.
//!
//! ## Fixed rules
//!
//! | Source | [`to_string`] | [`to_int`] | [`to_float`] |
//! |--------|---------------|------------|--------------|
//! | null | `""` | `0` | `0.0` |
//! | `true` / `false` | `"1"` / `""` | `1` / `0` | `1.0` / `0.0` |
//! | integer | decimal | itself | widened |
//! | float | [`format_float`] | truncated, non-finite → `0` | itself |
//! | string | itself | [`numeric_prefix`], truncated | [`numeric_prefix`] |
//! | container | `""` | `0` if empty, else `1` | `0.0` if empty, else `1.0` |
//!
//! ## Examples
//!
//! ```rust
//! use varconv::coerce::{to_bool, to_int, to_number};
//! use varconv::{Number, Value};
//!
//! assert_eq!(to_number(&Value::from("3,14")), Number::Float(3.14));
//! assert_eq!(to_int(&Value::from("12 apples")), 12);
//! assert!(to_bool(&Value::from(" true "), false));
//! ```

use crate::text;
use crate::{Number, Value};
use std::borrow::Cow;

/// Loose string form of a value.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_string;
/// use varconv::Value;
///
/// assert_eq!(to_string(&Value::Null), "");
/// assert_eq!(to_string(&Value::Bool(true)), "1");
/// assert_eq!(to_string(&Value::from(3.0)), "3");
/// assert_eq!(to_string(&Value::from(1e25)), "1.0E+25");
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Borrowing variant of [`to_string`] for the string leaf rules.
pub(crate) fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(to_string(other)),
    }
}

/// Formats a float the way [`to_string`] does.
///
/// Shortest round-trip digits, so the text parses back to the same float;
/// exponent form when the decimal exponent is `>= 15` or `< -4`, so large
/// magnitudes always keep a `.` in their text.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::format_float;
///
/// assert_eq!(format_float(2.5), "2.5");
/// assert_eq!(format_float(-0.0001), "-0.0001");
/// assert_eq!(format_float(0.00001), "1.0E-5");
/// assert_eq!(format_float(1.5e20), "1.5E+20");
/// assert_eq!(format_float(f64::NAN), "NAN");
/// ```
#[must_use]
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{:e}", f);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{}", f);
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..15).contains(&exp) {
        return format!("{}", f);
    }

    let sign = if exp < 0 { '-' } else { '+' };
    if mantissa.contains('.') {
        format!("{}E{}{}", mantissa, sign, exp.unsigned_abs())
    } else {
        format!("{}.0E{}{}", mantissa, sign, exp.unsigned_abs())
    }
}

/// Parses the leading numeric prefix of a string.
///
/// Leading ASCII whitespace is skipped, then an optional sign, digits, an
/// optional fraction and an optional exponent (only taken when digits follow
/// the `e`). Anything after the prefix is ignored. No digits at all gives
/// `Integer(0)`. An integer-shaped prefix that overflows `i64` saturates.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::numeric_prefix;
/// use varconv::Number;
///
/// assert_eq!(numeric_prefix("  42abc"), Number::Integer(42));
/// assert_eq!(numeric_prefix("-1.5kg"), Number::Float(-1.5));
/// assert_eq!(numeric_prefix("2e3"), Number::Float(2000.0));
/// assert_eq!(numeric_prefix("7e"), Number::Integer(7));
/// assert_eq!(numeric_prefix("abc"), Number::Integer(0));
/// ```
#[must_use]
pub fn numeric_prefix(s: &str) -> Number {
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut start = 0;
    while start < len && matches!(bytes[start], b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
        start += 1;
    }

    let mut end = start;
    if end < len && matches!(bytes[end], b'+' | b'-') {
        end += 1;
    }
    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut is_float = false;
    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            is_float = true;
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        if !s.is_empty() {
            tracing::trace!(input = s, "no numeric prefix, coercing to zero");
        }
        return Number::Integer(0);
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            is_float = true;
            end = j;
        }
    }

    let prefix = &s[start..end];
    if is_float {
        Number::Float(prefix.parse::<f64>().unwrap_or(0.0))
    } else {
        match prefix.parse::<i64>() {
            Ok(i) => Number::Integer(i),
            Err(_) if prefix.starts_with('-') => Number::Integer(i64::MIN),
            Err(_) => Number::Integer(i64::MAX),
        }
    }
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() {
        // `as` truncates toward zero and saturates at the i64 bounds
        f as i64
    } else {
        0
    }
}

/// Truncating integer conversion.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_int;
/// use varconv::{value, Value};
///
/// assert_eq!(to_int(&Value::from(-3.9)), -3);
/// assert_eq!(to_int(&Value::from("1e3")), 1000);
/// assert_eq!(to_int(&Value::from(f64::INFINITY)), 0);
/// assert_eq!(to_int(&value!([0])), 1);
/// ```
#[must_use]
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(Number::Integer(i)) => *i,
        Value::Number(Number::Float(f)) => float_to_int(*f),
        Value::String(s) => match numeric_prefix(s) {
            Number::Integer(i) => i,
            Number::Float(f) => float_to_int(f),
        },
        container => i64::from(container.container_len().unwrap_or(0) > 0),
    }
}

/// Floating-point conversion.
#[must_use]
pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_prefix(s).as_f64(),
        container => f64::from(u8::from(container.container_len().unwrap_or(0) > 0)),
    }
}

/// Numeric interpretation of a value, keeping integer-ness where it exists.
///
/// Numbers pass through, strings go through [`numeric_prefix`], everything
/// else through [`to_int`].
#[must_use]
pub fn to_numeric(value: &Value) -> Number {
    match value {
        Value::Number(n) => *n,
        Value::String(s) => numeric_prefix(s),
        other => Number::Integer(to_int(other)),
    }
}

/// Converts a value to a number, choosing float or integer from its text.
///
/// The value is stringified first. If the text contains `.` or `,` the commas
/// become dots and the result is a float; otherwise it is an integer.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_number;
/// use varconv::{Number, Value};
///
/// assert_eq!(to_number(&Value::from("3.14")), Number::Float(3.14));
/// assert_eq!(to_number(&Value::from("42")), Number::Integer(42));
/// assert_eq!(to_number(&Value::from("3,14")), Number::Float(3.14));
/// assert_eq!(to_number(&Value::from(3.0)), Number::Integer(3));
/// assert_eq!(to_number(&Value::from("n/a")), Number::Integer(0));
/// ```
#[must_use]
pub fn to_number(value: &Value) -> Number {
    let text = as_text(value);
    if text.contains(|c: char| c == '.' || c == ',') {
        let normalized = text.replace(',', ".");
        Number::Float(numeric_prefix(&normalized).as_f64())
    } else {
        match numeric_prefix(&text) {
            Number::Integer(i) => Number::Integer(i),
            Number::Float(f) => Number::Integer(float_to_int(f)),
        }
    }
}

/// Converts a value to a boolean, falling back to `default` when the value
/// is not recognizably true or false.
///
/// - booleans are returned as-is
/// - containers are `true` iff non-empty
/// - `"true"`, `"1"` and integer `1` are `true` (strings are trimmed first)
/// - `"false"`, `"0"`, integer `0` and null are `false`
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_bool;
/// use varconv::{value, Value};
///
/// assert!(to_bool(&Value::from("true"), false));
/// assert!(!to_bool(&Value::from("0"), true));
/// assert!(!to_bool(&value!([]), true));
/// assert!(to_bool(&value!([1]), false));
/// assert!(to_bool(&Value::from("maybe"), true));
/// ```
#[must_use]
pub fn to_bool(value: &Value, default: bool) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => value.container_len().unwrap_or(0) > 0,
        Value::Number(Number::Integer(1)) => true,
        Value::Number(Number::Integer(0)) => false,
        Value::String(s) => match text::trim(s) {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                tracing::trace!(input = s.as_str(), default, "unrecognized bool text");
                default
            }
        },
        Value::Number(n) => {
            tracing::trace!(input = %n, default, "number is neither 0 nor 1");
            default
        }
    }
}

/// Absolute value of the numeric interpretation ([`to_numeric`]).
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_absolute;
/// use varconv::{Number, Value};
///
/// assert_eq!(to_absolute(&Value::from(-7)), Number::Integer(7));
/// assert_eq!(to_absolute(&Value::from("-2.5")), Number::Float(2.5));
/// assert_eq!(to_absolute(&Value::Null), Number::Integer(0));
/// ```
#[must_use]
pub fn to_absolute(value: &Value) -> Number {
    to_numeric(value).abs()
}

/// Float leaf capped at `bound`: the leaf if it is below `bound`, else `bound`.
///
/// A NaN leaf compares false and yields `bound`.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_minimum;
/// use varconv::Value;
///
/// assert_eq!(to_minimum(&Value::from(5.0), 3.0), 3.0);
/// assert_eq!(to_minimum(&Value::from(2.0), 3.0), 2.0);
/// ```
#[must_use]
pub fn to_minimum(value: &Value, bound: f64) -> f64 {
    let leaf = to_float(value);
    if leaf < bound {
        leaf
    } else {
        bound
    }
}

/// Float leaf floored at `bound`: the leaf if it is above `bound`, else `bound`.
///
/// # Examples
///
/// ```rust
/// use varconv::coerce::to_maximum;
/// use varconv::Value;
///
/// assert_eq!(to_maximum(&Value::from("7.5"), 3.0), 7.5);
/// assert_eq!(to_maximum(&Value::Null, 3.0), 3.0);
/// ```
#[must_use]
pub fn to_maximum(value: &Value, bound: f64) -> f64 {
    let leaf = to_float(value);
    if leaf > bound {
        leaf
    } else {
        bound
    }
}
