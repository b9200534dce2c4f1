//! An ordered set of unique keys
use crate::{
    compare::{Compare, Natural},
    tree::{AvlTree, Config, Cursor, IntoIter, Iter},
};
use core::{fmt, iter::FromIterator};

/// An ordered set backed by an [AvlTree](../tree/struct.AvlTree.html)
pub struct Set<T, C = Natural> {
    tree: AvlTree<T, C>,
}

impl<T, C: Default> Set<T, C> {
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }
}

impl<T, C: Default> Default for Set<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Set<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: AvlTree::with_comparator(cmp),
        }
    }

    pub fn with_config(config: Config, cmp: C) -> Self {
        Self {
            tree: AvlTree::with_config(config, cmp),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    pub fn begin(&self) -> Cursor<'_, T, C> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, T, C> {
        self.tree.end()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// the underlying tree
    pub fn tree(&self) -> &AvlTree<T, C> {
        &self.tree
    }
}

impl<T, C: Compare<T>> Set<T, C> {
    /// Add a key. Returns false, leaving the set unchanged, if it was already present.
    pub fn insert(&mut self, key: T) -> bool {
        self.tree.insert_key(key)
    }

    /// Remove a key. Returns false if it was not present.
    pub fn erase(&mut self, key: &T) -> bool {
        self.tree.erase(key)
    }

    /// Remove a key and return it.
    pub fn take(&mut self, key: &T) -> Option<T> {
        self.tree.take(key)
    }

    pub fn find(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.find(key)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    pub fn get(&self, key: &T) -> Option<&T> {
        self.tree.get(key)
    }

    pub fn lower_bound(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.lower_bound(key)
    }

    pub fn upper_bound(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.upper_bound(key)
    }
}

impl<T: Clone, C: Clone> Clone for Set<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Set<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>> Extend<T> for Set<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter)
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for Set<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<T, C: Compare<T> + Default, const N: usize> From<[T; N]> for Set<T, C> {
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<T: PartialEq, C> PartialEq for Set<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

impl<T, C> IntoIterator for Set<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{FnCompare, Reverse};
    use std::collections::BTreeSet;

    #[test]
    fn basic() {
        let mut set = Set::<i32>::new();
        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert_eq!(format!("{:?}", set), "{1, 3}");
        assert_eq!(set.take(&1), Some(1));
        assert!(!set.erase(&1));
        assert_eq!(set.first(), Some(&3));
        set.clear();
        assert!(set.is_empty());
        assert!(set.begin() == set.end());
    }

    #[test]
    fn bounds_and_cursors() {
        let set: Set<i32> = Set::from([10, 20, 30, 40]);
        let mut cursor = set.lower_bound(&15);
        assert_eq!(cursor.get(), Some(&20));
        cursor.move_next();
        assert_eq!(cursor, set.upper_bound(&20));
        assert_eq!(set.find(&40).successor(), set.end());
        assert_eq!(set.upper_bound(&40), set.end());
    }

    #[test]
    fn comparators() {
        let set: Set<i32, Reverse<Natural>> = (0..5).collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
        let mut by_len = Set::with_comparator(FnCompare(|a: &&str, b: &&str| a.len().cmp(&b.len())));
        assert!(by_len.insert("one"));
        assert!(!by_len.insert("two"));
        assert!(by_len.insert("three"));
        assert_eq!(by_len.get(&"xyz"), Some(&"one"));
    }

    #[quickcheck]
    fn set_matches_btreeset(a: Vec<u16>, b: Vec<u16>) -> bool {
        let mut set: Set<u16> = a.iter().copied().collect();
        let mut model: BTreeSet<u16> = a.into_iter().collect();
        for x in b {
            assert_eq!(set.erase(&x), model.remove(&x));
        }
        set.tree().assert_invariants();
        set.len() == model.len() && set.into_iter().eq(model.into_iter())
    }
}
