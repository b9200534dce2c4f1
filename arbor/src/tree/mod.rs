//! the binary search tree core
//!
//! [Bst] implements search, ordered insertion and ordered removal on an arena of nodes with
//! parent links. It never rebalances; that is the job of [AvlTree], which wraps a [Bst] and
//! repairs the height balance after every structural change.
//!
//! [Bst]: struct.Bst.html
//! [AvlTree]: struct.AvlTree.html
use crate::{
    compare::{Compare, Natural},
    error::Error,
    node::{Node, NodeId, Nodes, Side},
};
use core::{cmp::Ordering, fmt, iter::FromIterator};
use tracing::*;

mod avl;
mod cursor;
mod dump;
mod invariants;
mod traverse;
pub use avl::AvlTree;
pub use cursor::{Cursor, IntoIter, Iter};
pub use traverse::{LevelOrder, PostOrder, PreOrder};

/// Which in-order neighbour donates its key when a node with children is erased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// the maximum of the left subtree
    Predecessor,
    /// the minimum of the right subtree
    Successor,
}

impl Default for Replacement {
    fn default() -> Self {
        Self::Predecessor
    }
}

#[derive(Debug, Clone, Default)]
/// Configuration for a tree.
pub struct Config {
    /// neighbour to take the key from when erasing an inner node.
    ///
    /// If the node has no child on the preferred side, the other side is used.
    pub replacement: Replacement,
    /// check all invariants after every successful mutation, and panic if one is violated.
    ///
    /// This makes every mutation O(n), so it is only useful for testing.
    pub check_invariants: bool,
}

impl Config {
    /// config that checks all invariants after each mutation
    pub fn debug() -> Self {
        Self {
            replacement: Replacement::Predecessor,
            check_invariants: true,
        }
    }

    /// config that erases inner nodes by pulling up their successor
    pub fn successor() -> Self {
        Self {
            replacement: Replacement::Successor,
            check_invariants: false,
        }
    }
}

/// An unbalanced binary search tree of unique keys.
///
/// Keys are ordered by the comparator `C`. Inserting a key that compares equal to a stored key
/// does nothing. The shape of the tree depends on the insertion order, so sorted input
/// degenerates into a chain; use [AvlTree](struct.AvlTree.html) for guaranteed O(log n) depth.
pub struct Bst<T, C = Natural> {
    nodes: Nodes<T>,
    root: Option<NodeId>,
    config: Config,
    cmp: C,
}

impl<T, C: Default> Bst<T, C> {
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Default> Default for Bst<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Bst<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(Config::default(), cmp)
    }

    pub fn with_config(config: Config, cmp: C) -> Self {
        Self {
            nodes: Nodes::default(),
            root: None,
            config,
            cmp,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// number of stored keys
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// true for an empty tree
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// drop all nodes
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Access a node by id.
    ///
    /// Panics if the node does not exist in this tree.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    /// number of edges on the longest path from the root to a leaf, -1 for the empty tree
    pub fn height(&self) -> i32 {
        self.subtree_height(self.root)
    }

    /// smallest key
    pub fn first(&self) -> Option<&T> {
        self.first_id().map(|id| self.nodes[id].key())
    }

    /// largest key
    pub fn last(&self) -> Option<&T> {
        self.last_id().map(|id| self.nodes[id].key())
    }

    /// Position of the smallest key, or the end position for an empty tree.
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.first_id())
    }

    /// The end position. It compares unequal to every position of a stored key.
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, None)
    }

    /// iterate over all keys in ascending order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.first_id(), self.last_id())
    }

    /// Position of the key for which `probe` returns `Equal`, or the end position.
    ///
    /// `probe` gets a stored key and must return the ordering of the searched key relative to
    /// it, consistent with the tree order.
    pub fn find_by(&self, probe: impl FnMut(&T) -> Ordering) -> Cursor<'_, T, C> {
        Cursor::new(self, self.search(probe))
    }

    fn first_id(&self) -> Option<NodeId> {
        self.root.map(|root| self.nodes.extreme(root, Side::Left))
    }

    fn last_id(&self) -> Option<NodeId> {
        self.root.map(|root| self.nodes.extreme(root, Side::Right))
    }

    /// the descent shared by find, insert and erase
    fn search(&self, mut probe: impl FnMut(&T) -> Ordering) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match probe(self.nodes[id].key()) {
                Ordering::Less => self.nodes[id].left,
                Ordering::Greater => self.nodes[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Leftmost node for which `goes_left` holds, in a tree where it holds for a suffix of keys.
    fn partition_point(&self, mut goes_left: impl FnMut(&T) -> bool) -> Option<NodeId> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            if goes_left(self.nodes[id].key()) {
                candidate = Some(id);
                current = self.nodes[id].left;
            } else {
                current = self.nodes[id].right;
            }
        }
        candidate
    }

    fn subtree_height(&self, root: Option<NodeId>) -> i32 {
        let mut height = -1;
        let mut stack: smallvec::SmallVec<[(NodeId, i32); 32]> = smallvec::SmallVec::new();
        stack.extend(root.map(|id| (id, 0)));
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// Unhook `id` from its parent (or the root slot), returning where it was.
    fn detach(&mut self, id: NodeId) -> Option<(NodeId, Side)> {
        match self.nodes.position(id) {
            Some((parent, side)) => {
                self.nodes.take_child(parent, side);
                Some((parent, side))
            }
            None => {
                debug_assert_eq!(self.root, Some(id));
                self.root = None;
                None
            }
        }
    }

    /// Put a subtree into a place previously vacated by `detach`.
    fn reattach(&mut self, at: Option<(NodeId, Side)>, child: Option<NodeId>) {
        match at {
            Some((parent, side)) => self.nodes.attach(parent, side, child),
            None => {
                debug_assert!(self.root.is_none());
                if let Some(child) = child {
                    self.nodes[child].parent = None;
                }
                self.root = child;
            }
        }
    }

    /// The node whose key replaces the key of `id` when `id` is erased, if `id` has children.
    fn replacement_for(&self, id: NodeId) -> Option<NodeId> {
        let preferred = match self.config.replacement {
            Replacement::Predecessor => Side::Left,
            Replacement::Successor => Side::Right,
        };
        [preferred, preferred.opposite()].iter().find_map(|&side| {
            self.nodes
                .child(id, side)
                .map(|child| self.nodes.extreme(child, side.opposite()))
        })
    }

    /// Remove the node `id` from the tree and return its key.
    ///
    /// If `id` has children, the key of its in-order neighbour is moved into `id` and the
    /// neighbour is removed instead. Either way the node that is physically removed has at most
    /// one child, which takes its place. Also returns the parent and side of the slot whose
    /// subtree got one level shorter, `None` if that slot is the root.
    fn remove_node(&mut self, id: NodeId) -> (T, Option<(NodeId, Side)>) {
        let victim = match self.replacement_for(id) {
            Some(neighbour) => {
                debug!("erase {}: taking the key of {}", id, neighbour);
                self.nodes.swap_keys(id, neighbour);
                neighbour
            }
            None => id,
        };
        let node = &self.nodes[victim];
        debug_assert!(node.left.is_none() || node.right.is_none());
        let side = if node.left.is_some() {
            Side::Left
        } else {
            Side::Right
        };
        let child = self.nodes.take_child(victim, side);
        match child {
            Some(child) => debug!("erase {}: {} takes its place", victim, child),
            None => debug!("erase {}: leaf", victim),
        }
        let hole = self.detach(victim);
        self.reattach(hole, child);
        (self.nodes.free(victim), hole)
    }

    fn insert_node(&mut self, key: T) -> (bool, NodeId)
    where
        C: Compare<T>,
    {
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let side = match self.cmp.compare(&key, self.nodes[id].key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (false, id),
            };
            parent = Some((id, side));
            current = self.nodes.child(id, side);
        }
        let id = self.nodes.alloc(key);
        self.reattach(parent, Some(id));
        (true, id)
    }

    /// Mutable access to a stored key. Changing the order of the key corrupts the tree.
    pub(crate) fn key_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id].key
    }
}

impl<T, C: Compare<T>> Bst<T, C> {
    /// Insert a key.
    ///
    /// Returns true and the position of the new key, or false and the position of the stored
    /// key that compares equal. In the latter case `key` is dropped and the tree is unchanged.
    pub fn insert(&mut self, key: T) -> (bool, Cursor<'_, T, C>) {
        let (inserted, id) = self.insert_node(key);
        if inserted {
            self.after_mutation(false);
        }
        (inserted, Cursor::new(self, Some(id)))
    }

    /// Insert a key, returning false if an equal key was already present.
    pub fn insert_key(&mut self, key: T) -> bool {
        self.insert(key).0
    }

    /// Remove a key, returning it if it was present.
    pub fn take(&mut self, key: &T) -> Option<T> {
        let id = self.search(|stored| self.cmp.compare(key, stored))?;
        Some(self.remove_id(id))
    }

    /// Remove the key for which `probe` returns `Equal`, see [find_by](#method.find_by).
    pub fn take_by(&mut self, probe: impl FnMut(&T) -> Ordering) -> Option<T> {
        let id = self.search(probe)?;
        Some(self.remove_id(id))
    }

    fn remove_id(&mut self, id: NodeId) -> T {
        let (key, _) = self.remove_node(id);
        self.after_mutation(false);
        key
    }

    /// Remove a key. Returns false if it was not present.
    pub fn erase(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    /// Position of `key`, or the end position.
    pub fn find(&self, key: &T) -> Cursor<'_, T, C> {
        self.find_by(|stored| self.cmp.compare(key, stored))
    }

    pub fn contains(&self, key: &T) -> bool {
        !self.find(key).is_end()
    }

    /// the stored key that compares equal to `key`
    pub fn get(&self, key: &T) -> Option<&T> {
        self.find(key).get()
    }

    /// Position of the first key that is not less than `key`, or the end position.
    pub fn lower_bound(&self, key: &T) -> Cursor<'_, T, C> {
        let id = self.partition_point(|stored| self.cmp.compare(key, stored) != Ordering::Greater);
        Cursor::new(self, id)
    }

    /// Position of the first key that is greater than `key`, or the end position.
    pub fn upper_bound(&self, key: &T) -> Cursor<'_, T, C> {
        let id = self.partition_point(|stored| self.cmp.compare(key, stored) == Ordering::Less);
        Cursor::new(self, id)
    }

    /// hook for `Config::check_invariants`
    fn after_mutation(&self, balanced: bool) {
        if self.config.check_invariants {
            let msgs = self.audit(balanced);
            if !msgs.is_empty() {
                invariants::report(msgs);
            }
        }
    }

    pub fn check_invariants(&self) -> Vec<String> {
        self.audit(false)
    }

    pub fn try_check_invariants(&self) -> Result<(), Error> {
        invariants::to_result(self.audit(false))
    }

    /// Check all invariants, logging each failed one, and panic if there are any.
    pub fn assert_invariants(&self) {
        let msgs = self.audit(false);
        if !msgs.is_empty() {
            invariants::report(msgs);
        }
    }
}

impl<T: Clone, C: Clone> Clone for Bst<T, C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            config: self.config.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Bst<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>> Extend<T> for Bst<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for Bst<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T> + Default, const N: usize> From<[T; N]> for Bst<T, C> {
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<T: PartialEq, C> PartialEq for Bst<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for Bst<T, C> {}

impl<T, C> IntoIterator for Bst<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let first = self.first_id();
        IntoIter::new(self.nodes.into_keys_from(first))
    }
}

impl<'a, T, C> IntoIterator for &'a Bst<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reverse;

    fn keys<C>(tree: &Bst<i32, C>) -> Vec<i32> {
        tree.iter().cloned().collect()
    }

    #[test]
    fn insert_find_erase() {
        let mut tree = Bst::<i32>::with_config(Config::debug(), Natural);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        for x in [7, 8, 0, 4, 2, 6, 9, 3, 5, 1] {
            let (inserted, pos) = tree.insert(x);
            assert!(inserted);
            assert_eq!(pos.key(), &x);
        }
        assert_eq!(tree.len(), 10);
        assert_eq!(keys(&tree), (0..10).collect::<Vec<_>>());
        assert_eq!(tree.find(&4).get(), Some(&4));
        assert!(tree.find(&10).is_end());
        assert!(tree.erase(&7));
        assert!(!tree.contains(&7));
        assert!(!tree.erase(&7));
        assert_eq!(tree.len(), 9);
        assert_eq!(keys(&tree), vec![0, 1, 2, 3, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn duplicate_insert_reports_existing_position() {
        let mut tree = Bst::<i32>::new();
        tree.insert(1);
        tree.insert(2);
        let (inserted, pos) = tree.insert(2);
        assert!(!inserted);
        assert_eq!(pos.key(), &2);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn sorted_input_degenerates() {
        let tree: Bst<i32> = (1..=7).collect();
        assert_eq!(tree.height(), 6);
        tree.assert_invariants();
    }

    #[test]
    fn erase_two_child_node_keeps_shape_above() {
        let mut tree: Bst<i32> = Bst::from([5, 3, 8, 1, 4, 7, 9]);
        let root = tree.root_id();
        assert!(tree.erase(&5));
        // the root node stays, it just holds the predecessor's key now
        assert_eq!(tree.root_id(), root);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &4);
        assert_eq!(keys(&tree), vec![1, 3, 4, 7, 8, 9]);
        tree.assert_invariants();
    }

    #[test]
    fn erase_with_successor_replacement() {
        let mut tree: Bst<i32> = Bst::with_config(Config::successor(), Natural);
        tree.extend([5, 3, 8, 1, 4, 7, 9]);
        assert!(tree.erase(&5));
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &7);
        assert_eq!(keys(&tree), vec![1, 3, 4, 7, 8, 9]);
        tree.assert_invariants();
    }

    #[test]
    fn erase_single_child_and_root() {
        let mut tree: Bst<i32> = Bst::from([2, 1]);
        assert!(tree.erase(&2));
        assert_eq!(keys(&tree), vec![1]);
        assert!(tree.erase(&1));
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        tree.assert_invariants();
    }

    #[test]
    fn bounds() {
        let tree: Bst<i32> = Bst::from([10, 20, 30]);
        assert_eq!(tree.lower_bound(&20).get(), Some(&20));
        assert_eq!(tree.upper_bound(&20).get(), Some(&30));
        assert_eq!(tree.lower_bound(&15).get(), Some(&20));
        assert_eq!(tree.lower_bound(&5).get(), Some(&10));
        assert!(tree.lower_bound(&31).is_end());
        assert!(tree.upper_bound(&30).is_end());
    }

    #[test]
    fn custom_order() {
        let tree: Bst<i32, Reverse<Natural>> = Bst::from([1, 3, 2]);
        assert_eq!(keys(&tree), vec![3, 2, 1]);
        assert_eq!(tree.first(), Some(&3));
        assert_eq!(tree.lower_bound(&2).get(), Some(&2));
        assert_eq!(tree.upper_bound(&2).get(), Some(&1));
    }

    #[test]
    fn clear_and_reuse() {
        let mut tree: Bst<i32> = Bst::from([1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.begin() == tree.end());
        tree.insert(4);
        assert_eq!(keys(&tree), vec![4]);
    }
}
