//! An ordered map from unique keys to values
//!
//! Entries are stored as `(key, value)` tuples in an [AvlTree] that orders them by key only, see
//! [ByKey]. All lookups are a single descent of that tree driven by the key.
//!
//! [AvlTree]: ../tree/struct.AvlTree.html
//! [ByKey]: ../compare/struct.ByKey.html
use crate::{
    compare::{ByKey, Compare, Natural},
    error::Error,
    node::NodeId,
    tree::{AvlTree, Config, Cursor, IntoIter},
};
use core::{fmt, iter::FromIterator, ops::Index};

pub struct Map<K, V, C = Natural> {
    tree: AvlTree<(K, V), ByKey<C>>,
}

impl<K, V, C: Default> Map<K, V, C> {
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }
}

impl<K, V, C: Default> Default for Map<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Map<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: AvlTree::with_comparator(ByKey(cmp)),
        }
    }

    pub fn with_config(config: Config, cmp: C) -> Self {
        Self {
            tree: AvlTree::with_config(config, ByKey(cmp)),
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

    /// entry with the smallest key
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// entry with the largest key
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    /// entries in ascending key order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + '_ {
        self.tree.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.tree.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.tree.iter().map(|(_, v)| v)
    }

    /// the underlying tree of entries
    pub fn tree(&self) -> &AvlTree<(K, V), ByKey<C>> {
        &self.tree
    }
}

impl<K, V, C: Compare<K>> Map<K, V, C> {
    fn locate(&self, key: &K) -> Option<NodeId> {
        self.find(key).node_id()
    }

    /// Position of the entry for `key`, or the end position.
    pub fn find(&self, key: &K) -> Cursor<'_, (K, V), ByKey<C>> {
        let cmp = &self.tree.comparator().0;
        self.tree.find_by(|(stored, _)| cmp.compare(key, stored))
    }

    /// Add an entry.
    ///
    /// If the key is already present the map is left unchanged, the stored value is not
    /// overwritten, and false is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert_id((key, value)).0
    }

    /// Remove the entry for `key` and return its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.locate(key)?;
        Some(self.tree.remove_id(id).1)
    }

    /// Remove the entry for `key`. Returns false if there was none.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).get().map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.locate(key)?;
        Some(&mut self.tree.key_mut(id).1)
    }

    /// The value for `key`.
    ///
    /// Panics if the key is not present; see [try_at](#method.try_at) and [get](#method.get).
    pub fn at(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in map"),
        }
    }

    /// Mutable access to the value for `key`. Panics if the key is not present.
    pub fn at_mut(&mut self, key: &K) -> &mut V {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("key not found in map"),
        }
    }

    pub fn try_at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// The value for `key`, inserting `V::default()` first if the key is not present.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let id = match self.locate(&key) {
            Some(id) => id,
            None => self.tree.insert_id((key, V::default())).1,
        };
        &mut self.tree.key_mut(id).1
    }
}

impl<K, V, C: Compare<K>> Index<&K> for Map<K, V, C> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.at(key)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for Map<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Map<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for Map<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for Map<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K> + Default, const N: usize> From<[(K, V); N]> for Map<K, V, C> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for Map<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for Map<K, V, C> {}

impl<K, V, C> IntoIterator for Map<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use std::collections::BTreeMap;

    #[test]
    fn insert_does_not_overwrite() {
        let mut map = Map::<&str, i32>::new();
        assert!(map.insert("a", 1));
        assert!(!map.insert("a", 2));
        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn access() {
        let mut map: Map<i32, String> = Map::from([(2, "two".to_string()), (1, "one".to_string())]);
        assert_eq!(map.at(&1), "one");
        assert_eq!(&map[&2], "two");
        map.at_mut(&2).push('!');
        assert_eq!(map.get(&2).map(String::as_str), Some("two!"));
        assert!(matches!(map.try_at(&3), Err(Error::KeyNotFound)));
        assert!(map.get_mut(&3).is_none());
        assert_eq!(format!("{:?}", map), r#"{1: "one", 2: "two!"}"#);
        assert_eq!(map.first(), Some((&1, &"one".to_string())));
        assert_eq!(map.find(&2).key().0, 2);
        assert!(map.find(&7).is_end());
    }

    #[test]
    #[should_panic(expected = "key not found in map")]
    fn at_missing_key_panics() {
        let map = Map::<i32, i32>::from([(1, 1)]);
        map.at(&2);
    }

    #[test]
    fn default_insertion() {
        let mut counts = Map::<char, usize>::new();
        for c in "abracadabra".chars() {
            *counts.get_or_insert_default(c) += 1;
        }
        assert_eq!(counts.keys().copied().collect::<String>(), "abcdr");
        assert_eq!(counts.values().copied().collect::<Vec<_>>(), vec![5, 2, 1, 1, 2]);
        assert_eq!(counts.remove(&'a'), Some(5));
        assert!(!counts.erase(&'a'));
        assert!(!counts.contains_key(&'a'));
        counts.tree().assert_invariants();
    }

    #[test]
    fn owned_iteration() {
        let map: Map<i32, i32> = (0..10).rev().map(|x| (x, x * x)).collect();
        let expected = btreemap! { 7 => 49, 8 => 64, 9 => 81 };
        let tail: BTreeMap<i32, i32> = map.into_iter().skip(7).collect();
        assert_eq!(tail, expected);
    }

    #[quickcheck]
    fn map_matches_btreemap(ops: Vec<(bool, u8, u32)>) -> anyhow::Result<bool> {
        let mut map = Map::<u8, u32>::new();
        let mut model = BTreeMap::new();
        for (insert, k, v) in ops {
            if insert {
                let fresh = !model.contains_key(&k);
                if fresh {
                    model.insert(k, v);
                }
                anyhow::ensure!(map.insert(k, v) == fresh);
            } else {
                anyhow::ensure!(map.remove(&k) == model.remove(&k));
            }
            map.tree().try_check_invariants()?;
        }
        Ok(map.iter().eq(model.iter()))
    }
}
