//! Field-equality conditions.
//!
//! A [`Condition`] pairs a field name with the value the field must equal.

use crate::value::{Number, Value};

/// A single `field == value` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The field name to read.
    pub field: String,
    /// The value the field must equal.
    pub value: ConditionValue,
}

impl Condition {
    /// Creates a new condition.
    pub fn new(field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Condition {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the field value equals this condition's value.
    ///
    /// Numbers compare by quantity across widths, nested JSON compares
    /// structurally, and mismatched types never match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ConditionValue::String(expected), Value::String(s)) => expected == s,
            (ConditionValue::Number(expected), Value::Number(n)) => n.same_as(*expected),
            (ConditionValue::Bool(expected), Value::Bool(b)) => expected == b,
            (ConditionValue::Null, Value::None) => true,
            #[cfg(feature = "json")]
            (ConditionValue::Json(expected), Value::Json(v)) => expected == *v,
            _ => false,
        }
    }
}

/// Owned comparison value stored in a [`Condition`].
///
/// Unlike [`Value`], which borrows from the element, `ConditionValue` owns
/// its data so queries can outlive the values they were built from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Matches fields that are present but empty.
    Null,
    /// Nested JSON (array or object).
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::String(s)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::String(s.to_string())
    }
}

impl From<&String> for ConditionValue {
    fn from(s: &String) -> Self {
        ConditionValue::String(s.clone())
    }
}

impl From<Number> for ConditionValue {
    fn from(n: Number) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Bool(b)
    }
}

impl<V: Into<ConditionValue>> From<Option<V>> for ConditionValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(ConditionValue::Null, Into::into)
    }
}

impl From<Value<'_>> for ConditionValue {
    fn from(v: Value<'_>) -> Self {
        match v {
            Value::String(s) => ConditionValue::String(s.to_string()),
            Value::Number(n) => ConditionValue::Number(n),
            Value::Bool(b) => ConditionValue::Bool(b),
            Value::None => ConditionValue::Null,
            #[cfg(feature = "json")]
            Value::Json(v) => ConditionValue::Json(v.clone()),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for ConditionValue {
    fn from(v: serde_json::Value) -> Self {
        use crate::record::AsValue;

        match v {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => ConditionValue::Json(v),
            scalar => ConditionValue::from(scalar.as_value()),
        }
    }
}

macro_rules! number_condition {
    ($($t:ty),+) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(n: $t) -> Self {
                    ConditionValue::Number(Number::from(n))
                }
            }
        )+
    };
}

number_condition!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
