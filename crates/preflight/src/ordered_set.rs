//! Insertion-ordered, duplicate-suppressing collection

use indexmap::IndexSet;
use std::hash::Hash;

/// Set that remembers first-insertion order
///
/// Re-inserting an existing item is a no-op and does not move it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Hash + Eq> {
    items: IndexSet<T>,
}

impl<T: Hash + Eq> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> OrderedSet<T> {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: IndexSet::new(),
        }
    }

    /// Insert an item; returns `false` if it was already present
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Whether the item is present
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of distinct items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Consume into a vector, preserving order
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_iter().collect()
    }
}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Hash + Eq> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let set: OrderedSet<&str> = ["c", "a", "b"].into_iter().collect();
        assert_eq!(set.into_vec(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_suppresses_duplicates() {
        let mut set = OrderedSet::new();
        assert!(set.insert("x".to_string()));
        assert!(set.insert("y".to_string()));
        assert!(!set.insert("x".to_string()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.into_vec(), vec!["x", "y"]);
    }

    #[test]
    fn test_extend_keeps_first_position() {
        let mut set: OrderedSet<i32> = [1, 2].into_iter().collect();
        set.extend([3, 1, 4, 2]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(set.contains(&4));
    }

    #[test]
    fn test_empty() {
        let set: OrderedSet<String> = OrderedSet::default();
        assert!(set.is_empty());
        assert!(set.into_vec().is_empty());
    }
}
