//! Error types for the picklist crate.

use thiserror::Error;

/// Errors that can occur when querying or mutating a [`PickList`](crate::PickList).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    /// The element supports keyed access but has no entry for this key.
    #[error("key '{key}' not found")]
    KeyAbsent { key: String },

    /// The element has no attribute with this name.
    #[error("attribute '{name}' not found")]
    AttributeAbsent { name: String },

    /// The field could be reached neither as a key nor as an attribute.
    #[error("failed to find attribute or mapped key '{field}'")]
    FieldNotAccessible { field: String },

    /// A projection hit an element that does not carry the field.
    #[error("elements without field '{field}' exist (first at index {index})")]
    MissingAcrossElements { field: String, index: usize },

    /// The name given to a plural accessor does not follow the plural rule.
    #[error("'{name}' is not a plural field name")]
    NotPlural { name: String },

    /// Removal target is not present in the list.
    #[error("value not found in list")]
    ValueNotFound,
}

impl PickError {
    /// Returns `true` for the "field not found" family of errors.
    ///
    /// Keyed, attribute and combined failures all land here, whichever
    /// access mode the list had pinned when the error occurred.
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            PickError::KeyAbsent { .. }
                | PickError::AttributeAbsent { .. }
                | PickError::FieldNotAccessible { .. }
        )
    }
}

/// Result type for picklist operations.
pub type Result<T> = std::result::Result<T, PickError>;
