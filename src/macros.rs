/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys may be string or integer literals. Nested negative numbers need
/// parentheses so they stay a single token: `value!([(-5), 3])`.
///
/// # Examples
///
/// ```rust
/// use varconv::{value, Value};
///
/// let v = value!({ "name": "Alice", 0: [1, 2.5, null, (-3)] });
/// assert!(v.is_object());
/// assert_eq!(value!(-3), Value::from(-3));
/// ```
#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($crate::Key::from($key), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression
    ($e:expr) => {
        $crate::Value::from($e)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Key, Number, Value, ValueMap};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_arrays() {
        assert_eq!(value!([]), Value::Array(vec![]));
        assert_eq!(
            value!([1, (-2), "x"]),
            Value::Array(vec![Value::from(1), Value::from(-2), Value::from("x")])
        );
    }

    #[test]
    fn test_value_macro_objects() {
        assert_eq!(value!({}), Value::Object(ValueMap::new()));

        let obj = value!({ "name": "Alice", 3: true });
        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::from("Alice")));
                assert_eq!(map.get(Key::Index(3)), Some(&Value::Bool(true)));
            }
            _ => panic!("Expected object"),
        }
    }
}
