//! Named predicate sets
//!
//! A [`PredicateSet`] maps predicate names to implementations. Base, override
//! and instance layers are all predicate sets; the registry is the result of
//! merging them.

use std::collections::BTreeMap;
use std::fmt;

use crate::predicate::Predicate;

/// A mapping from predicate name to implementation.
///
/// Inserting a name that already exists replaces the previous entry.
///
/// # Example
///
/// ```rust
/// use validex::{Predicate, PredicateSet};
///
/// let mut base = PredicateSet::new();
/// base.insert("isShort", Predicate::unary(|s| s.len() < 4));
///
/// let mut overrides = PredicateSet::new();
/// overrides.insert("isShort", Predicate::unary(|s| s.len() < 2));
///
/// base.merge(overrides);
/// assert_eq!(base.len(), 1);
/// assert_eq!(base.get("isShort").unwrap().call("isShort", "abc", &[]), Ok(false));
/// ```
#[derive(Clone, Default)]
pub struct PredicateSet {
    entries: BTreeMap<String, Predicate>,
}

impl PredicateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a predicate, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, predicate: Predicate) -> Option<Predicate> {
        self.entries.insert(name.into(), predicate)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.insert(name, predicate);
        self
    }

    /// Look up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.entries.get(name)
    }

    /// True if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `other` on top of this set. Same-named entries are replaced.
    pub fn merge(&mut self, other: PredicateSet) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Debug for PredicateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<N: Into<String>> FromIterator<(N, Predicate)> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = (N, Predicate)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, predicate)| (name.into(), predicate))
                .collect(),
        }
    }
}

impl IntoIterator for PredicateSet {
    type Item = (String, Predicate);
    type IntoIter = std::collections::btree_map::IntoIter<String, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
