//! Query builder and matching engine.
//!
//! A [`Query`] carries the two kinds of filters a [`PickList`](crate::PickList)
//! understands: field-equality conditions and caller-supplied predicates.

use std::fmt;

use crate::condition::{Condition, ConditionValue};
use crate::error::Result;
use crate::value::Value;

type Check<'q, T> = Box<dyn Fn(&T) -> bool + 'q>;

/// Field conditions plus predicates, all of which must hold.
///
/// The match logic is:
/// ```text
/// match = (every field condition is equal, in insertion order)
///       ∧ (every predicate returns true, in insertion order)
/// ```
///
/// Both groups short-circuit, and conditions are always evaluated before
/// predicates. An empty query matches every element.
///
/// # Example
///
/// ```
/// use picklist::{impl_record, PickList, Query};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl_record!(Person { name, age });
///
/// let people = PickList::from(vec![
///     Person { name: "John".into(), age: 26 },
///     Person { name: "Smith".into(), age: 22 },
/// ]);
///
/// let query = Query::new()
///     .eq("name", "John")
///     .check(|p: &Person| p.age > 20);
///
/// let john = people.pick(&query).unwrap().unwrap();
/// assert_eq!(john.age, 26);
/// ```
pub struct Query<'q, T> {
    conditions: Vec<Condition>,
    checks: Vec<Check<'q, T>>,
}

impl<'q, T> Query<'q, T> {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Query {
            conditions: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Adds a `field == value` condition.
    pub fn eq(mut self, field: &str, value: impl Into<ConditionValue>) -> Self {
        self.conditions.push(Condition::new(field, value));
        self
    }

    /// Adds a prebuilt condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a predicate.
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> bool + 'q,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Returns the field conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of predicates.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if this query has no filters (matches everything).
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.checks.is_empty()
    }

    /// Tests if a single item matches this query.
    ///
    /// The accessor reads field values from the item. Its errors abort the
    /// match instead of counting as a mismatch.
    pub fn matches<F>(&self, item: &T, accessor: F) -> Result<bool>
    where
        for<'a> F: Fn(&'a T, &str) -> Result<Value<'a>>,
    {
        for condition in &self.conditions {
            if !condition.matches(&accessor(item, condition.field.as_str())?) {
                return Ok(false);
            }
        }

        Ok(self.checks.iter().all(|check| check(item)))
    }
}

impl<T> Default for Query<'_, T> {
    fn default() -> Self {
        Query::new()
    }
}

impl<T> fmt::Debug for Query<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("conditions", &self.conditions)
            .field("checks", &self.checks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::PickError;
    use crate::value::Number;

    #[derive(Debug)]
    struct Task {
        name: String,
        priority: i64,
        archived: bool,
    }

    fn accessor<'a>(task: &'a Task, field: &str) -> Result<Value<'a>> {
        match field {
            "name" => Ok(Value::String(&task.name)),
            "priority" => Ok(Value::Number(Number::I64(task.priority))),
            "archived" => Ok(Value::Bool(task.archived)),
            _ => Err(PickError::AttributeAbsent {
                name: field.to_string(),
            }),
        }
    }

    fn task() -> Task {
        Task {
            name: "Fix bug".to_string(),
            priority: 5,
            archived: false,
        }
    }

    #[test]
    fn empty_query_matches() {
        let query = Query::<Task>::new();
        assert!(query.is_empty());
        assert_eq!(query.matches(&task(), accessor), Ok(true));
    }

    #[test]
    fn all_conditions_must_hold() {
        let query = Query::new().eq("priority", 5).eq("archived", false);
        assert_eq!(query.matches(&task(), accessor), Ok(true));

        let query = Query::new().eq("priority", 5).eq("archived", true);
        assert_eq!(query.matches(&task(), accessor), Ok(false));
    }

    #[test]
    fn prebuilt_conditions_join_in_order() {
        let query = Query::new()
            .eq("name", "Fix bug")
            .condition(Condition::new("priority", 5u8));

        let fields: Vec<&str> = query.conditions().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, ["name", "priority"]);
        assert_eq!(query.conditions()[1].value, ConditionValue::Number(Number::U64(5)));
        assert_eq!(query.matches(&task(), accessor), Ok(true));

        let query = Query::new().condition(Condition::new("archived", true));
        assert_eq!(query.matches(&task(), accessor), Ok(false));
    }

    #[test]
    fn predicates_and_conditions_combine() {
        let query = Query::new()
            .eq("name", "Fix bug")
            .check(|t: &Task| t.priority > 3)
            .check(|t: &Task| !t.archived);
        assert_eq!(query.check_count(), 2);
        assert_eq!(query.matches(&task(), accessor), Ok(true));

        let query = Query::new()
            .eq("name", "Fix bug")
            .check(|t: &Task| t.priority > 9);
        assert_eq!(query.matches(&task(), accessor), Ok(false));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let query = Query::new().eq("owner", "me");
        assert_eq!(
            query.matches(&task(), accessor),
            Err(PickError::AttributeAbsent {
                name: "owner".to_string()
            })
        );
    }

    #[test]
    fn conditions_short_circuit_in_order() {
        let seen = RefCell::new(Vec::new());
        let query = Query::new()
            .eq("priority", 1)
            .eq("owner", "me")
            .check(|_: &Task| {
                seen.borrow_mut().push("check");
                true
            });

        // First condition fails, so the unknown field is never read
        let result = query.matches(&task(), |t, f| {
            seen.borrow_mut().push("field");
            accessor(t, f)
        });
        assert_eq!(result, Ok(false));
        assert_eq!(*seen.borrow(), vec!["field"]);
    }

    #[test]
    fn predicates_run_after_conditions() {
        let seen = RefCell::new(Vec::new());
        let query = Query::new()
            .check(|_: &Task| {
                seen.borrow_mut().push("check");
                false
            })
            .check(|_: &Task| {
                seen.borrow_mut().push("second check");
                true
            })
            .eq("name", "Fix bug");

        let result = query.matches(&task(), |t, f| {
            seen.borrow_mut().push("field");
            accessor(t, f)
        });
        assert_eq!(result, Ok(false));
        assert_eq!(*seen.borrow(), vec!["field", "check"]);
    }

    #[test]
    fn debug_lists_conditions() {
        let query = Query::new().eq("name", "x").check(|_: &Task| true);
        let rendered = format!("{query:?}");
        assert!(rendered.contains("name"));
        assert!(rendered.contains("checks: 1"));
    }
}
