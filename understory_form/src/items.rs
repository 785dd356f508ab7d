// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered option data for select controls.

use alloc::string::String;
use alloc::vec::Vec;

/// An insertion-ordered `key → label` mapping.
///
/// Keys are unique by equality. Entries live in a small `Vec` and uniqueness
/// is enforced by scanning, which keeps iteration order equal to insertion
/// order. That order is the display order of a select control and the
/// tie-break for every "select the first item" rule.
///
/// ```rust
/// use understory_form::Items;
///
/// let mut items = Items::from([("cz", "Czechia"), ("us", "United States")]);
/// assert_eq!(items.first_key(), Some("cz"));
///
/// // Re-inserting an existing key relabels it in place.
/// items.insert("cz", "Czech Republic");
/// assert_eq!(items.len(), 2);
/// assert_eq!(items.get("cz"), Some("Czech Republic"));
/// assert_eq!(items.first_key(), Some("cz"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Items {
    entries: Vec<(String, String)>,
}

impl Items {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts `key` with `label`.
    ///
    /// If `key` is already present its label is replaced in place and the old
    /// label is returned; the entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) -> Option<String> {
        let key = key.into();
        let label = label.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(&mut entry.1, label));
        }
        self.entries.push((key, label));
        None
    }

    /// Returns the label for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns the first key in insertion order.
    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates `(key, label)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str()))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for Items {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut items = Self::new();
        items.extend(iter);
        items
    }
}

impl<K: Into<String>, L: Into<String>> Extend<(K, L)> for Items {
    fn extend<I: IntoIterator<Item = (K, L)>>(&mut self, iter: I) {
        for (key, label) in iter {
            self.insert(key, label);
        }
    }
}

impl<K: Into<String>, L: Into<String>, const N: usize> From<[(K, L); N]> for Items {
    fn from(entries: [(K, L); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Option data as handed to a select control.
///
/// Plain select controls accept both shapes. [`ItemList::Unkeyed`] is the
/// positional form: each label doubles as its own key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemList {
    /// Explicit `key → label` pairs.
    Keyed(Items),
    /// Labels only, without keys.
    Unkeyed(Vec<String>),
}

impl ItemList {
    /// Returns `true` for [`ItemList::Keyed`].
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        matches!(self, Self::Keyed(_))
    }

    /// Converts into keyed items, using labels as keys for unkeyed data.
    #[must_use]
    pub fn into_keyed(self) -> Items {
        match self {
            Self::Keyed(items) => items,
            Self::Unkeyed(labels) => labels
                .into_iter()
                .map(|label| (label.clone(), label))
                .collect(),
        }
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::Keyed(Items::new())
    }
}

impl From<Items> for ItemList {
    fn from(items: Items) -> Self {
        Self::Keyed(items)
    }
}

impl From<Vec<String>> for ItemList {
    fn from(labels: Vec<String>) -> Self {
        Self::Unkeyed(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn insertion_order_is_preserved() {
        let items = Items::from([("b", "Bee"), ("a", "Ay"), ("c", "See")]);
        let keys: Vec<_> = items.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(items.first_key(), Some("b"));
    }

    #[test]
    fn duplicate_keys_relabel_without_moving() {
        let mut items = Items::new();
        assert_eq!(items.insert("x", "one"), None);
        items.insert("y", "two");
        assert_eq!(items.insert("x", "three"), Some("one".to_string()));

        let pairs: Vec<_> = items.iter().collect();
        assert_eq!(pairs, vec![("x", "three"), ("y", "two")]);
    }

    #[test]
    fn empty_items_have_no_first_key() {
        let items = Items::new();
        assert!(items.is_empty());
        assert_eq!(items.first_key(), None);
        assert!(!items.contains_key(""));
    }

    #[test]
    fn unkeyed_lists_use_labels_as_keys() {
        let list = ItemList::from(vec!["Prague".to_string(), "Brno".to_string()]);
        assert!(!list.is_keyed());

        let items = list.into_keyed();
        assert_eq!(items.get("Prague"), Some("Prague"));
        assert_eq!(items.first_key(), Some("Prague"));
    }
}
