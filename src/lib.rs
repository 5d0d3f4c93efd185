//! # varconv
//!
//! Loose type coercion for dynamically-typed values, and recursive
//! transformation of nested keyed containers.
//!
//! ## What is it for?
//!
//! Data that arrives from forms, query strings, spreadsheets or loosely-typed
//! APIs rarely has the types you want: numbers come as `"3,14"`, flags as
//! `" true "`, text carries markup and stray line breaks. This crate turns
//! such values into the primitive you ask for, with fixed and documented
//! fallbacks instead of errors, and applies the same rules across whole
//! nested containers without changing their shape.
//!
//! ## Key Features
//!
//! - **Total**: every conversion returns a value; nothing panics or fails
//! - **Shape-preserving**: container transformers keep keys, order and nesting
//! - **Pure**: inputs are borrowed and never modified
//! - **Unicode-aware**: case mapping and length limits work on code points
//! - **Serde compatible**: [`Value`], [`Transform`] and [`Pipeline`] (de)serialize
//!   with any serde format
//!
//! ## Quick Start
//!
//! ### Scalar coercion
//!
//! ```rust
//! use varconv::coerce::{to_bool, to_number};
//! use varconv::{Number, Value};
//!
//! assert_eq!(to_number(&Value::from("3,14")), Number::Float(3.14));
//! assert_eq!(to_number(&Value::from("42")), Number::Integer(42));
//! assert!(to_bool(&Value::from("maybe"), true));
//! ```
//!
//! ### Container transformers
//!
//! ```rust
//! use varconv::{array, value};
//!
//! let form = value!({
//!     "name": "  Alice ",
//!     "tags": [" rust ", " serde "],
//!     "address": { "city": " Berlin " }
//! });
//!
//! let clean = array::trim(&form);
//! assert_eq!(clean, value!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"],
//!     "address": { "city": "Berlin" }
//! }));
//! ```
//!
//! ### Pipelines
//!
//! ```rust
//! use varconv::{value, Pipeline};
//!
//! let pipeline: Pipeline = "remove_html;to_first_line;trim;to_lowercase".parse().unwrap();
//! let out = pipeline.apply(&value!(["<b>HELLO</b> \nworld"]));
//! assert_eq!(out, value!(["hello"]));
//! ```
//!
//! ## Modules
//!
//! - [`coerce`]: scalar rules (to number, bool, string, int, float, absolute, clamps)
//! - [`text`]: string leaf rules (lines, tags, escaping, trimming, digits, length)
//! - [`array`]: the recursive container transformers
//! - [`transform`]: transformers as data ([`Transform`], [`Pipeline`])

pub mod array;
pub mod coerce;
pub mod error;
pub mod macros;
pub mod map;
pub mod text;
pub mod transform;
pub mod value;

pub use error::{Error, Result};
pub use map::{Key, ValueMap};
pub use transform::{Pipeline, Transform};
pub use value::{Number, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let json = r#"{"z":1,"a":[true,null,"x"],"m":{"k":2.5}}"#;
        let value: Value = serde_json::from_str(json).unwrap();

        let keys: Vec<String> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }

    #[test]
    fn test_transform_json_value() {
        let value: Value = serde_json::from_str(r#"{"price":"9,99","qty":"3"}"#).unwrap();
        let out = array::to_number(&value);
        assert_eq!(out, value!({ "price": 9.99, "qty": 3 }));
    }

    #[test]
    fn test_integer_keys_roundtrip() {
        let value = value!({ 0: "a", "b": "c" });
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"0":"a","b":"c"}"#);
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
        assert_send_sync::<ValueMap>();
        assert_send_sync::<Transform>();
        assert_send_sync::<Pipeline>();
    }
}
