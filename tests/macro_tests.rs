use varconv::{value, Key, Number, Value, ValueMap};

#[test]
fn test_value_macro_null() {
    let value = value!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_value_macro_booleans() {
    assert_eq!(value!(true), Value::Bool(true));
    assert_eq!(value!(false), Value::Bool(false));
}

#[test]
fn test_value_macro_numbers() {
    assert_eq!(value!(42), Value::Number(Number::Integer(42)));
    assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(value!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(value!(""), Value::String(String::new()));
}

#[test]
fn test_value_macro_arrays() {
    assert_eq!(value!([]), Value::Array(vec![]));

    let mixed_array = value!([1, "hello", true, null, (-4)]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Number(Number::Integer(-4)),
        ])
    );
}

#[test]
fn test_value_macro_nested() {
    let nested = value!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        7: "seven"
    });

    match nested {
        Value::Object(ref obj) => {
            assert_eq!(obj.len(), 3);

            if let Some(Value::Object(user)) = obj.get("user") {
                assert_eq!(user.get("id"), Some(&Value::Number(Number::Integer(123))));
                assert_eq!(user.get("name"), Some(&Value::String("Bob".to_string())));
                assert_eq!(user.get("active"), Some(&Value::Bool(true)));
            } else {
                panic!("Expected user to be an object");
            }

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[0], Value::String("admin".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }

            let keys: Vec<&Key> = obj.keys().collect();
            assert_eq!(keys[2], &Key::Index(7));
            assert_eq!(obj.get(7), Some(&Value::String("seven".to_string())));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_value_methods() {
    let null_val = value!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_container());

    let str_val = value!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = value!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let obj_val = value!({ "key": "value" });
    assert!(obj_val.is_object());
    assert_eq!(obj_val.as_object().map(ValueMap::len), Some(1));
}
