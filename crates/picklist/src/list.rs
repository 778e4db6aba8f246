//! The [`PickList`] container.

use std::cell::Cell;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::access::{access, AccessMode};
use crate::error::{PickError, Result};
use crate::plural::PluralRule;
use crate::query::Query;
use crate::record::Record;
use crate::value::Value;

/// Ordered list that picks elements by field conditions and predicates.
///
/// Elements are read through [`Record`], either as keyed entries or as
/// attributes. The list remembers which of the two worked first (its
/// [`AccessMode`]) and uses only that strategy afterwards, so a list is
/// expected to hold elements of one shape.
///
/// Standard slice operations are available through `Deref<Target = [T]>`.
#[derive(Debug, Clone)]
pub struct PickList<T> {
    items: Vec<T>,
    mode: Cell<AccessMode>,
    default: Option<T>,
    plural: PluralRule,
}

impl<T> PickList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        PickList::from(Vec::new())
    }

    /// Sets the element [`pick_or_default`](Self::pick_or_default) falls back to.
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Replaces the fallback element.
    pub fn set_default(&mut self, default: T) {
        self.default = Some(default);
    }

    /// Returns the fallback element, if one is set.
    pub fn default_item(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Sets the rule used by [`plural`](Self::plural).
    pub fn with_plural_rule(mut self, rule: PluralRule) -> Self {
        self.plural = rule;
        self
    }

    /// Returns the plural rule.
    pub fn plural_rule(&self) -> &PluralRule {
        &self.plural
    }

    /// Returns the access mode this list has committed to.
    pub fn access_mode(&self) -> AccessMode {
        self.mode.get()
    }

    /// Appends an element.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an element at `index`, shifting later elements.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Shortens the list to `len` elements.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }

    /// Removes every element and forgets the access mode.
    pub fn clear(&mut self) {
        self.items.clear();
        self.mode.set(AccessMode::Unknown);
    }

    /// Removes the first element equal to `item`.
    pub fn remove_item(&mut self, item: &T) -> Result<()>
    where
        T: PartialEq,
    {
        let index = self
            .items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or(PickError::ValueNotFound)?;
        self.items.remove(index);
        Ok(())
    }

    /// Consumes the list, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // Derived lists share the plural rule but start with a fresh access mode.
    fn derived<U>(&self, items: Vec<U>) -> PickList<U> {
        PickList::from(items).with_plural_rule(self.plural.clone())
    }
}

impl<T: Record> PickList<T> {
    /// Reads `field` from `item` using this list's access mode.
    ///
    /// The first successful read pins the mode for the rest of the list's life.
    pub fn access<'a>(&self, item: &'a T, field: &str) -> Result<Value<'a>> {
        access(&self.mode, item, field)
    }

    /// Lazily yields every element matching `query`, in order.
    ///
    /// Each call scans from the first element. A field-access error is yielded
    /// once and ends the scan.
    pub fn extract<'a, 'q>(&'a self, query: &'q Query<'q, T>) -> Extract<'a, 'q, T> {
        Extract {
            list: self,
            query,
            next: 0,
            failed: false,
        }
    }

    /// Returns the first element matching `query`.
    ///
    /// `Ok(None)` means nothing matched. On an empty list no field is read, so
    /// conditions on nonexistent fields also give `Ok(None)` there.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "json")] {
    /// use picklist::{PickList, Query};
    /// use serde_json::json;
    ///
    /// let people = PickList::from(vec![
    ///     json!({"name": "Ai", "age": 17}),
    ///     json!({"name": "Aaron", "age": 35}),
    /// ]);
    ///
    /// let ai = people.pick(&Query::new().eq("name", "Ai")).unwrap();
    /// assert_eq!(ai, Some(&json!({"name": "Ai", "age": 17})));
    /// assert_eq!(people.pick(&Query::new().eq("name", "Bob")).unwrap(), None);
    /// # }
    /// ```
    pub fn pick(&self, query: &Query<'_, T>) -> Result<Option<&T>> {
        self.extract(query).next().transpose()
    }

    /// Like [`pick`](Self::pick), but falls back to the default element.
    pub fn pick_or_default(&self, query: &Query<'_, T>) -> Result<Option<&T>> {
        Ok(self.pick(query)?.or(self.default.as_ref()))
    }

    /// Returns the index of the first element matching `query`.
    pub fn position(&self, query: &Query<'_, T>) -> Result<Option<usize>> {
        for (index, item) in self.items.iter().enumerate() {
            if self.matches(query, item)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Returns every element matching `query` as a new list.
    ///
    /// Nothing matching gives an empty list.
    pub fn get_all(&self, query: &Query<'_, T>) -> Result<PickList<T>>
    where
        T: Clone,
    {
        let items = self
            .extract(query)
            .map(|item| item.cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(self.derived(items))
    }

    /// Like [`get_all`](Self::get_all), but borrows the matches.
    pub fn get_all_refs(&self, query: &Query<'_, T>) -> Result<PickList<&T>> {
        let items = self.extract(query).collect::<Result<Vec<_>>>()?;
        Ok(self.derived(items))
    }

    /// Removes the first element matching `query`.
    ///
    /// Fails with [`PickError::ValueNotFound`] if nothing matches.
    pub fn remove_by(&mut self, query: &Query<'_, T>) -> Result<()> {
        self.pop_by(query).map(drop)
    }

    /// Removes and returns the first element matching `query`.
    ///
    /// Fails with [`PickError::ValueNotFound`] if nothing matches.
    pub fn pop_by(&mut self, query: &Query<'_, T>) -> Result<T> {
        let index = self.position(query)?.ok_or(PickError::ValueNotFound)?;
        trace!(index, "removing element matched by query");
        Ok(self.items.remove(index))
    }

    /// Collects `field` from every element, in order.
    ///
    /// Every element must carry the field; the first one that does not fails
    /// the whole projection with [`PickError::MissingAcrossElements`]. An
    /// empty list projects to an empty list without checking anything.
    pub fn project(&self, field: &str) -> Result<PickList<Value<'_>>> {
        let values = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                access(&self.mode, item, field).map_err(|_| PickError::MissingAcrossElements {
                    field: field.to_string(),
                    index,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.derived(values))
    }

    /// Projects the field named by a plural, e.g. `"ages"` reads `age`.
    ///
    /// The list's [`PluralRule`] maps the name; a name it does not consider
    /// plural fails with [`PickError::NotPlural`].
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "json")] {
    /// use picklist::{PickList, Value};
    /// use serde_json::json;
    ///
    /// let people = PickList::from(vec![
    ///     json!({"name": "Ai", "age": 17}),
    ///     json!({"name": "Aaron", "age": 35}),
    /// ]);
    ///
    /// let ages = people.plural("ages").unwrap();
    /// assert_eq!(ages, [Value::from(17i64), Value::from(35i64)]);
    /// # }
    /// ```
    pub fn plural(&self, name: &str) -> Result<PickList<Value<'_>>> {
        let field = self
            .plural
            .singular(name)
            .ok_or_else(|| PickError::NotPlural {
                name: name.to_string(),
            })?;
        self.project(&field)
    }

    fn matches(&self, query: &Query<'_, T>, item: &T) -> Result<bool> {
        query.matches(item, |element, field| access(&self.mode, element, field))
    }
}

/// Lazy scan returned by [`PickList::extract`].
pub struct Extract<'a, 'q, T> {
    list: &'a PickList<T>,
    query: &'q Query<'q, T>,
    next: usize,
    failed: bool,
}

impl<'a, T: Record> Iterator for Extract<'a, '_, T> {
    type Item = Result<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let list = self.list;
        while let Some(item) = list.items.get(self.next) {
            self.next += 1;
            match list.matches(self.query, item) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.list.items.len() - self.next))
    }
}

impl<T> Default for PickList<T> {
    fn default() -> Self {
        PickList::new()
    }
}

impl<T> From<Vec<T>> for PickList<T> {
    fn from(items: Vec<T>) -> Self {
        PickList {
            items,
            mode: Cell::new(AccessMode::Unknown),
            default: None,
            plural: PluralRule::default(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for PickList<T> {
    fn from(items: [T; N]) -> Self {
        PickList::from(Vec::from(items))
    }
}

impl<T> From<PickList<T>> for Vec<T> {
    fn from(list: PickList<T>) -> Self {
        list.items
    }
}

impl<T> FromIterator<T> for PickList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        PickList::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for PickList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for PickList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PickList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PickList<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<T> Deref for PickList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for PickList<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

// Equality looks at the elements only, not at cached mode or configuration.
impl<T: PartialEq> PartialEq for PickList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: PartialEq> PartialEq<[T]> for PickList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for PickList<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.items.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for PickList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for PickList<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items.as_slice() == other.as_slice()
    }
}
