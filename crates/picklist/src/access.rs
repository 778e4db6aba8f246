//! Adaptive field access.
//!
//! A list starts in [`AccessMode::Unknown`] and commits to keyed or attribute
//! access the first time a field read succeeds. Later reads go straight to the
//! pinned strategy without probing the other one.

use std::cell::Cell;

use tracing::debug;

use crate::error::{PickError, Result};
use crate::record::{KeyLookup, Record};
use crate::value::Value;

/// Strategy a list uses to read named fields from its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessMode {
    /// No field has been read successfully yet.
    #[default]
    Unknown,
    /// Fields are keyed entries.
    ByKey,
    /// Fields are attributes.
    ByAttribute,
}

impl AccessMode {
    /// Returns `true` once a strategy has been committed to.
    pub fn is_pinned(self) -> bool {
        !matches!(self, AccessMode::Unknown)
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessMode::Unknown => "unknown",
            AccessMode::ByKey => "by-key",
            AccessMode::ByAttribute => "by-attribute",
        }
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reads `field` from `element`, pinning `mode` on the first success.
pub(crate) fn access<'a, R>(mode: &Cell<AccessMode>, element: &'a R, field: &str) -> Result<Value<'a>>
where
    R: Record + ?Sized,
{
    match mode.get() {
        AccessMode::ByKey => by_key(element, field),
        AccessMode::ByAttribute => by_attribute(element, field),
        AccessMode::Unknown => match element.key(field) {
            KeyLookup::Found(value) => {
                pin(mode, AccessMode::ByKey, field);
                Ok(value)
            }
            // Keyed type without this key: no fallback, mode stays open
            KeyLookup::Missing => Err(PickError::KeyAbsent {
                key: field.to_string(),
            }),
            KeyLookup::Unsupported => {
                debug!(field, "keyed access unsupported, trying attribute");
                let value = element
                    .attribute(field)
                    .ok_or_else(|| PickError::FieldNotAccessible {
                        field: field.to_string(),
                    })?;
                pin(mode, AccessMode::ByAttribute, field);
                Ok(value)
            }
        },
    }
}

fn by_key<'a, R: Record + ?Sized>(element: &'a R, field: &str) -> Result<Value<'a>> {
    match element.key(field) {
        KeyLookup::Found(value) => Ok(value),
        KeyLookup::Missing => Err(PickError::KeyAbsent {
            key: field.to_string(),
        }),
        // Element of another shape in a list already pinned to keys
        KeyLookup::Unsupported => Err(PickError::FieldNotAccessible {
            field: field.to_string(),
        }),
    }
}

fn by_attribute<'a, R: Record + ?Sized>(element: &'a R, field: &str) -> Result<Value<'a>> {
    element
        .attribute(field)
        .ok_or_else(|| PickError::AttributeAbsent {
            name: field.to_string(),
        })
}

fn pin(mode: &Cell<AccessMode>, pinned: AccessMode, field: &str) {
    debug!(mode = %pinned, field, "access mode pinned");
    mode.set(pinned);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::value::Number;

    struct Person {
        name: String,
        age: u8,
    }

    crate::impl_record!(Person { name, age });

    fn ai() -> Person {
        Person {
            name: "Ai".to_string(),
            age: 17,
        }
    }

    fn dict() -> HashMap<&'static str, &'static str> {
        [("name", "Aaron")].into_iter().collect()
    }

    #[test]
    fn unknown_falls_back_to_attribute() {
        let mode = Cell::new(AccessMode::Unknown);
        let person = ai();

        assert_eq!(access(&mode, &person, "age"), Ok(Value::Number(Number::U64(17))));
        assert_eq!(mode.get(), AccessMode::ByAttribute);
    }

    #[test]
    fn unknown_prefers_key() {
        let mode = Cell::new(AccessMode::Unknown);
        let map = dict();

        assert_eq!(access(&mode, &map, "name"), Ok(Value::String("Aaron")));
        assert_eq!(mode.get(), AccessMode::ByKey);
    }

    #[test]
    fn missing_key_does_not_fall_back_or_pin() {
        let mode = Cell::new(AccessMode::Unknown);
        let map = dict();

        assert_eq!(
            access(&mode, &map, "age"),
            Err(PickError::KeyAbsent {
                key: "age".to_string()
            })
        );
        assert_eq!(mode.get(), AccessMode::Unknown);
    }

    #[test]
    fn missing_attribute_while_unknown_is_combined_error() {
        let mode = Cell::new(AccessMode::Unknown);
        let person = ai();

        assert_eq!(
            access(&mode, &person, "country"),
            Err(PickError::FieldNotAccessible {
                field: "country".to_string()
            })
        );
        assert_eq!(mode.get(), AccessMode::Unknown);
    }

    #[test]
    fn pinned_attribute_reports_attribute_absent() {
        let mode = Cell::new(AccessMode::ByAttribute);
        let person = ai();

        assert_eq!(access(&mode, &person, "name"), Ok(Value::String("Ai")));
        assert_eq!(
            access(&mode, &person, "country"),
            Err(PickError::AttributeAbsent {
                name: "country".to_string()
            })
        );
    }

    #[test]
    fn pinned_key_rejects_unkeyed_element() {
        let mode = Cell::new(AccessMode::ByKey);
        let person = ai();

        let err = access(&mode, &person, "name").unwrap_err();
        assert!(err.is_field_error());
        assert_eq!(mode.get(), AccessMode::ByKey);
    }

    #[test]
    fn mode_display() {
        assert_eq!(AccessMode::default().to_string(), "unknown");
        assert_eq!(AccessMode::ByKey.to_string(), "by-key");
        assert!(AccessMode::ByAttribute.is_pinned());
        assert!(!AccessMode::Unknown.is_pinned());
    }
}
