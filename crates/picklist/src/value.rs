//! Runtime value types for field comparison and projection.
//!
//! The [`Value`] enum is what an element hands back when one of its fields is
//! read, whether the read went through a key or an attribute.

use std::cmp::Ordering;

/// Field value borrowed from an element.
///
/// # Example
///
/// ```
/// use picklist::{Number, Value};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// fn name_of(p: &Person) -> Value<'_> {
///     Value::String(&p.name)
/// }
///
/// let ai = Person { name: "Ai".into(), age: 17 };
/// assert_eq!(name_of(&ai), Value::String("Ai"));
/// assert_eq!(Value::from(ai.age), Value::Number(Number::U64(17)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Nested JSON (array or object), borrowed as is.
    #[cfg(feature = "json")]
    Json(&'a serde_json::Value),
    /// Field present but empty (`None`, JSON `null`).
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts nested JSON, if present.
    #[cfg(feature = "json")]
    pub fn as_json(&self) -> Option<&'a serde_json::Value> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

/// Numeric value covering the common integer and float widths.
///
/// Equality follows [`Number::compare`], so `Number::U64(17)` equals
/// `Number::I64(17)`. A struct field stored as `u32` and a JSON field holding
/// the same number project to equal values.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Integers of opposite sign never collide, so avoid the lossy f64 path
            (Number::I64(a), Number::U64(b)) => Some(match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            }),
            (Number::U64(a), Number::I64(b)) => Some(match u64::try_from(b) {
                Ok(b) => a.cmp(&b),
                Err(_) => Ordering::Greater,
            }),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Returns `true` if both numbers denote the same quantity.
    pub fn same_as(self, other: Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(*other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }

            impl From<$t> for Value<'_> {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::None.is_none());

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(10).compare(Number::U64(5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::F64(5.0).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert!(Number::I64(17).same_as(Number::U64(17)));
        assert!(Number::U64(17).same_as(Number::F64(17.0)));
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(0).compare(Number::I64(-5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn large_integers_stay_exact() {
        let big = (1u64 << 53) + 1;
        assert!(!Number::U64(big).same_as(Number::I64(1i64 << 53)));
        assert!(Number::U64(big).same_as(Number::I64(big as i64)));
    }

    #[test]
    fn equality_agrees_with_ordering() {
        assert_eq!(Number::U64(17), Number::I64(17));
        assert_eq!(Number::I64(17), Number::F64(17.0));
        assert_ne!(Number::I64(-1), Number::U64(u64::MAX));
        assert_eq!(
            Value::Number(Number::U64(35)),
            Value::Number(Number::I64(35))
        );

        let pairs = [
            (Number::U64(17), Number::I64(17)),
            (Number::U64(3), Number::F64(3.5)),
            (Number::I64(-2), Number::U64(2)),
        ];
        for (a, b) in pairs {
            assert_eq!(a == b, a.partial_cmp(&b) == Some(Ordering::Equal));
        }
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert!(!Number::F64(f64::NAN).same_as(Number::F64(f64::NAN)));
    }

    #[test]
    fn conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u8), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Value::from(17u32), Value::Number(Number::U64(17)));
        assert_eq!(Value::from("Ai"), Value::String("Ai"));
        assert_eq!(Value::from(false), Value::Bool(false));
    }
}
