//! Picklist - a list you can pick elements out of by example.
//!
//! [`PickList`] wraps an ordered sequence of records and answers
//! "give me the element whose `name` is `"Ai"`" without a hand-written
//! filter loop. It supports:
//!
//! - Field-equality conditions and arbitrary predicates, combined with AND
//! - Records that expose fields as attributes (structs) or as keys (maps, JSON)
//! - Single-element picks, multi-element selection and removal by condition
//! - Plural projections: `people.plural("ages")` collects every `age`
//!
//! # Quick Start
//!
//! ```rust
//! use picklist::{impl_record, PickList, Query, Value};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//!     country: String,
//! }
//!
//! impl_record!(Person { name, age, country });
//!
//! let people = PickList::from(vec![
//!     Person { name: "Abigail".into(), age: 17, country: "America".into() },
//!     Person { name: "Ai".into(), age: 17, country: "Japan".into() },
//!     Person { name: "Aaron".into(), age: 35, country: "British".into() },
//! ]);
//!
//! let ai = people.pick(&Query::new().eq("name", "Ai").eq("country", "Japan")).unwrap();
//! assert_eq!(ai.map(|p| p.age), Some(17));
//!
//! let teens = people.get_all_refs(&Query::new().eq("age", 17)).unwrap();
//! assert_eq!(teens.len(), 2);
//!
//! let ages = people.plural("ages").unwrap();
//! assert_eq!(ages, [Value::from(17u32), Value::from(17u32), Value::from(35u32)]);
//! ```
//!
//! # Field Access
//!
//! Elements implement [`Record`]. The first time a list reads a field it
//! tries keyed access; if the element type cannot be keyed at all it falls
//! back to attributes. Whichever strategy succeeds is remembered as the
//! list's [`AccessMode`] and used for every later read:
//!
//! ```text
//! Unknown ── key found ──────────────▶ ByKey
//!    │
//!    ├─ key missing ─────────────────▶ KeyAbsent error (no fallback)
//!    │
//!    └─ keying unsupported ─ attribute found ─▶ ByAttribute
//!                          └ attribute missing ▶ FieldNotAccessible error
//! ```
//!
//! A condition on a field the element lacks is an error, not a mismatch.
//! "Nothing matched" is `Ok(None)` from [`PickList::pick`] and an empty list
//! from [`PickList::get_all`].
//!
//! # Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `json` | yes | [`Record`] for `serde_json::Value` and `serde_json::Map` |

mod access;
mod condition;
mod error;
mod list;
mod plural;
mod query;
mod record;
mod value;

// Re-export public API
pub use access::AccessMode;
pub use condition::{Condition, ConditionValue};
pub use error::{PickError, Result};
pub use list::{Extract, PickList};
pub use plural::PluralRule;
pub use query::Query;
pub use record::{AsValue, KeyLookup, Record};
pub use value::{Number, Value};
