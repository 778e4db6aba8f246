//! Plural field names for projections.
//!
//! `people.plural("ages")` reads the `age` field of every element. The
//! [`PluralRule`] decides how a plural name maps back to its singular field.

use std::borrow::Cow;

/// Mapping from plural accessor names to singular field names.
///
/// The default rule strips a trailing `"s"`. Irregular plurals can be
/// registered explicitly and are checked before the suffix.
///
/// ```
/// use picklist::PluralRule;
///
/// let rule = PluralRule::default().irregular("people", "person");
///
/// assert_eq!(rule.singular("ages").as_deref(), Some("age"));
/// assert_eq!(rule.singular("people").as_deref(), Some("person"));
/// assert_eq!(rule.singular("age"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    suffix: Cow<'static, str>,
    irregular: Vec<(String, String)>,
}

impl PluralRule {
    /// Creates a rule that strips `suffix`.
    pub fn with_suffix(suffix: impl Into<Cow<'static, str>>) -> Self {
        PluralRule {
            suffix: suffix.into(),
            irregular: Vec::new(),
        }
    }

    /// Registers an irregular plural.
    pub fn irregular(mut self, plural: impl Into<String>, singular: impl Into<String>) -> Self {
        self.irregular.push((plural.into(), singular.into()));
        self
    }

    /// Returns the suffix this rule strips.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Resolves a plural name to its singular field name.
    ///
    /// Returns `None` when `name` is not plural under this rule. A name made
    /// of the suffix alone is not plural.
    pub fn singular<'n>(&self, name: &'n str) -> Option<Cow<'n, str>> {
        if let Some((_, singular)) = self.irregular.iter().find(|(plural, _)| plural == name) {
            return Some(Cow::Owned(singular.clone()));
        }

        match name.strip_suffix(&*self.suffix) {
            Some(stem) if !stem.is_empty() && !self.suffix.is_empty() => Some(Cow::Borrowed(stem)),
            _ => None,
        }
    }
}

impl Default for PluralRule {
    fn default() -> Self {
        PluralRule::with_suffix("s")
    }
}
