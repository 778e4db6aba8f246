//! Element capabilities consumed by the query engine.
//!
//! A [`PickList`](crate::PickList) reads named fields from its elements in one
//! of two ways: as keyed entries (maps, JSON objects) or as attributes
//! (structs). [`Record`] exposes both capabilities; an element type
//! implements whichever one it actually has.
//!
//! The keyed side distinguishes "this type cannot be keyed at all"
//! ([`KeyLookup::Unsupported`]) from "this type is keyed but lacks the key"
//! ([`KeyLookup::Missing`]). Only the former lets the list fall back to
//! attribute access.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::value::{Number, Value};

/// Outcome of a keyed lookup on a single element.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyLookup<'a> {
    /// The element type does not support keyed access.
    Unsupported,
    /// The element is keyed but has no entry under this key.
    Missing,
    /// The entry exists.
    Found(Value<'a>),
}

/// Trait for element types a [`PickList`](crate::PickList) can query.
///
/// Both methods have "not supported" defaults, so struct types only provide
/// [`attribute`](Record::attribute) and map-like types only provide
/// [`key`](Record::key).
///
/// # Manual Implementation
///
/// ```
/// use picklist::{Record, Value};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for Person {
///     fn attribute(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "name" => Some(Value::String(&self.name)),
///             "age" => Some(self.age.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
///
/// The [`impl_record!`](crate::impl_record) macro writes the same
/// implementation from a field list.
pub trait Record {
    /// Looks up a keyed entry.
    fn key(&self, key: &str) -> KeyLookup<'_> {
        let _ = key;
        KeyLookup::Unsupported
    }

    /// Reads a named attribute, or `None` if there is no such attribute.
    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        let _ = name;
        None
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn key(&self, key: &str) -> KeyLookup<'_> {
        (**self).key(key)
    }

    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        (**self).attribute(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn key(&self, key: &str) -> KeyLookup<'_> {
        (**self).key(key)
    }

    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        (**self).attribute(name)
    }
}

// Projected values can be held in a list but expose no fields.
impl Record for Value<'_> {}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsValue,
    S: BuildHasher,
{
    fn key(&self, key: &str) -> KeyLookup<'_> {
        match self.get(key) {
            Some(v) => KeyLookup::Found(v.as_value()),
            None => KeyLookup::Missing,
        }
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsValue,
{
    fn key(&self, key: &str) -> KeyLookup<'_> {
        match self.get(key) {
            Some(v) => KeyLookup::Found(v.as_value()),
            None => KeyLookup::Missing,
        }
    }
}

/// Conversion from a stored field to a comparable [`Value`].
///
/// Used by the map impls of [`Record`] and by [`impl_record!`](crate::impl_record).
pub trait AsValue {
    /// Borrows this field as a [`Value`].
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for Number {
    fn as_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl AsValue for Value<'_> {
    fn as_value(&self) -> Value<'_> {
        self.clone()
    }
}

impl<V: AsValue> AsValue for Option<V> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.as_value(),
            None => Value::None,
        }
    }
}

impl<V: AsValue + ?Sized> AsValue for &V {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

macro_rules! number_as_value {
    ($($t:ty),+) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )+
    };
}

number_as_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(feature = "json")]
mod json {
    use super::{AsValue, KeyLookup, Record};
    use crate::value::{Number, Value};

    impl AsValue for serde_json::Value {
        fn as_value(&self) -> Value<'_> {
            match self {
                serde_json::Value::Null => Value::None,
                serde_json::Value::Bool(b) => Value::Bool(*b),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Value::Number(Number::I64(i))
                    } else if let Some(u) = n.as_u64() {
                        Value::Number(Number::U64(u))
                    } else {
                        n.as_f64()
                            .map_or(Value::Json(self), |f| Value::Number(Number::F64(f)))
                    }
                }
                serde_json::Value::String(s) => Value::String(s),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::Json(self),
            }
        }
    }

    /// Objects are keyed; every other JSON value is not.
    impl Record for serde_json::Value {
        fn key(&self, key: &str) -> KeyLookup<'_> {
            match self {
                serde_json::Value::Object(map) => map.key(key),
                _ => KeyLookup::Unsupported,
            }
        }
    }

    impl Record for serde_json::Map<String, serde_json::Value> {
        fn key(&self, key: &str) -> KeyLookup<'_> {
            match self.get(key) {
                Some(v) => KeyLookup::Found(v.as_value()),
                None => KeyLookup::Missing,
            }
        }
    }
}

/// Implements [`Record`] for a struct by exposing the listed fields as
/// attributes.
///
/// Every listed field must implement [`AsValue`].
///
/// ```
/// use picklist::{impl_record, Record, Value};
///
/// struct Person {
///     name: String,
///     age: u8,
///     nickname: Option<String>,
/// }
///
/// impl_record!(Person { name, age, nickname });
///
/// let ai = Person { name: "Ai".into(), age: 17, nickname: None };
/// assert_eq!(ai.attribute("name"), Some(Value::String("Ai")));
/// assert_eq!(ai.attribute("nickname"), Some(Value::None));
/// assert_eq!(ai.attribute("height"), None);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn attribute(&self, name: &str) -> ::core::option::Option<$crate::Value<'_>> {
                match name {
                    $(
                        ::core::stringify!($field) => ::core::option::Option::Some(
                            $crate::AsValue::as_value(&self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
