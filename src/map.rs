//! Ordered keyed container.
//!
//! This module provides [`ValueMap`], a wrapper around [`IndexMap`] that keeps
//! insertion order, and [`Key`], which is either an integer index or a string
//! name. Loose data routinely mixes both kinds of key in one container, so
//! neither kind is privileged.
//!
//! Every transformer in [`array`](crate::array) rebuilds a `ValueMap` by
//! iterating the input in order, so output key order always matches the input.
//!
//! ## Examples
//!
//! ```rust
//! use varconv::{Key, Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("name", Value::from("Alice"));
//! map.insert(7, Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(map.keys().next(), Some(&Key::from("name")));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A container key: an integer index or a string name.
///
/// `Key::Index(5)` and `Key::Name("5".into())` are distinct keys. Formats
/// with string-only keys write an index as its decimal text, so on the way
/// back in a canonical decimal name such as `"5"` or `"-3"` becomes an
/// index, while `"05"`, `"+5"` or `" 5"` stay names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Returns `true` if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns the string name, if this is a string key.
    #[inline]
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Index(i64::from(value))
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Index(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// Integer spelled exactly as `i64` would print it (no sign on zero, no
/// leading zeros or `+`). Such names deserialize back as [`Key::Index`].
fn canonical_index(name: &str) -> Option<i64> {
    name.parse::<i64>().ok().filter(|i| i.to_string() == name)
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Key::Index(i) => serializer.serialize_i64(*i),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer key")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Key::Index(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Key::Index(i)),
                    Err(_) => Ok(Key::Name(value.to_string())),
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(canonical_index(value).map_or_else(|| Key::from(value), Key::Index))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(canonical_index(&value).map_or(Key::Name(value), Key::Index))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// An insertion-ordered map of [`Key`]s to [`Value`]s.
///
/// # Examples
///
/// ```rust
/// use varconv::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("first", Value::from(1));
/// map.insert(0, Value::from(2));
///
/// // Iteration keeps insertion order
/// let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["first", "0"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueMap(IndexMap<Key, Value>);

impl ValueMap {
    /// Creates an empty `ValueMap`.
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    /// Creates an empty `ValueMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place
    /// (the key keeps its original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use varconv::{Value, ValueMap};
    ///
    /// let mut map = ValueMap::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert!(map.insert("key", Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.0.get(&key.into())
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }
}

impl IntoIterator for ValueMap {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, Value)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for ValueMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValueMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueMapVisitor;

        impl<'de> Visitor<'de> for ValueMapVisitor {
            type Value = ValueMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a keyed container")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ValueMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<Key, Value>()? {
                    values.insert(key, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(ValueMapVisitor)
    }
}
