//! height balancing on top of the tree core
//!
//! Every node stores its balance factor, `height(right) - height(left)`. After the core has
//! attached or unlinked a node, we walk from the changed slot towards the root and adjust the
//! balance factors of the ancestors one by one, using only the local balance factors. A node
//! whose factor reaches ±2 is repaired with a single or double rotation.
//!
//! Insertion stops at the first ancestor whose subtree height did not change, which is at the
//! latest right after the first rotation. Removal has to keep going after a rotation if the
//! rotated subtree got shorter, so one erase can rotate at every level up to the root.
use super::{Bst, Config, Cursor};
use crate::{
    compare::{Compare, Natural},
    error::Error,
    node::{NodeId, Side},
};
use core::{cmp::Ordering, fmt, iter::FromIterator, ops::Deref};
use tracing::*;

/// A height balanced binary search tree of unique keys.
///
/// All read access is inherited from the wrapped [Bst] through `Deref`. Insertion and removal
/// keep `|balance| <= 1` at every node, so the height is O(log n).
pub struct AvlTree<T, C = Natural> {
    pub(super) tree: Bst<T, C>,
}

impl<T, C> Deref for AvlTree<T, C> {
    type Target = Bst<T, C>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<T, C: Default> AvlTree<T, C> {
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Default> Default for AvlTree<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(Config::default(), cmp)
    }

    pub fn with_config(config: Config, cmp: C) -> Self {
        Self {
            tree: Bst::with_config(config, cmp),
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    /// Height of the tree, found in O(log n) by following the taller child.
    pub fn height(&self) -> i32 {
        let nodes = &self.tree.nodes;
        let mut height = -1;
        let mut current = self.tree.root;
        while let Some(id) = current {
            height += 1;
            let node = &nodes[id];
            current = if node.balance > 0 {
                node.right
            } else {
                node.left.or(node.right)
            };
        }
        height
    }

    pub(crate) fn key_mut(&mut self, id: NodeId) -> &mut T {
        self.tree.key_mut(id)
    }

    /// Add `delta` to the balance factor of `id` and return the new value.
    fn adjust(&mut self, id: NodeId, delta: i8) -> i8 {
        let node = &mut self.tree.nodes[id];
        node.balance += delta;
        node.balance
    }

    /// Standard rotation around `x`. Rotating left promotes the right child and vice versa.
    ///
    /// Returns the promoted node, which now sits where `x` used to be.
    fn rotate(&mut self, x: NodeId, direction: Side) -> NodeId {
        let up = direction.opposite();
        let nodes = &mut self.tree.nodes;
        let z = nodes
            .take_child(x, up)
            .expect("rotation without a child to promote");
        let inner = nodes.take_child(z, direction);
        nodes.attach(x, up, inner);
        let slot = self.tree.detach(x);
        self.tree.nodes.attach(z, direction, Some(x));
        self.tree.reattach(slot, Some(z));

        // new factors from the old ones, no heights needed
        let nodes = &mut self.tree.nodes;
        let (xb, zb) = (nodes[x].balance, nodes[z].balance);
        let (xb, zb) = match direction {
            Side::Left => {
                let xb = xb - 1 - zb.max(0);
                (xb, zb - 1 + xb.min(0))
            }
            Side::Right => {
                let xb = xb + 1 - zb.min(0);
                (xb, zb + 1 + xb.max(0))
            }
        };
        nodes[x].balance = xb;
        nodes[z].balance = zb;
        trace!("rotate {:?} at {}: {} promoted", direction, x, z);
        #[cfg(feature = "metrics")]
        crate::prom::ROTATIONS.inc();
        z
    }

    fn single_rotate_left(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Side::Left)
    }

    fn single_rotate_right(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Side::Right)
    }

    /// right-left case: the right child leans left
    fn double_rotate_left(&mut self, x: NodeId) -> NodeId {
        let child = self.tree.nodes[x]
            .right
            .expect("double rotation without a right child");
        self.single_rotate_right(child);
        self.single_rotate_left(x)
    }

    /// left-right case: the left child leans right
    fn double_rotate_right(&mut self, x: NodeId) -> NodeId {
        let child = self.tree.nodes[x]
            .left
            .expect("double rotation without a left child");
        self.single_rotate_left(child);
        self.single_rotate_right(x)
    }

    /// Repair a node with balance factor ±2.
    ///
    /// Returns the new root of the subtree and whether the subtree is now one level shorter
    /// than before the change that unbalanced it.
    fn rebalance(&mut self, x: NodeId) -> (NodeId, bool) {
        let heavy = if self.tree.nodes[x].balance > 0 {
            Side::Right
        } else {
            Side::Left
        };
        let child = self.tree.nodes[x]
            .child(heavy)
            .expect("unbalanced node without a child on its heavy side");
        let child_balance = self.tree.nodes[child].balance;
        // a single rotation is enough unless the child leans away from the heavy side
        let single = child_balance * heavy.sign() >= 0;
        let top = match (heavy, single) {
            (Side::Right, true) => self.single_rotate_left(x),
            (Side::Right, false) => self.double_rotate_left(x),
            (Side::Left, true) => self.single_rotate_right(x),
            (Side::Left, false) => self.double_rotate_right(x),
        };
        // only a single rotation over a balanced child keeps the height
        (top, !(single && child_balance == 0))
    }

    /// Walk up from a freshly attached leaf.
    fn retrace_insert(&mut self, leaf: NodeId) {
        let mut child = leaf;
        while let Some((parent, side)) = self.tree.nodes.position(child) {
            let balance = self.adjust(parent, side.sign());
            trace!("insert retrace at {}: balance {}", parent, balance);
            match balance {
                0 => break,
                -1 | 1 => child = parent,
                _ => {
                    self.rebalance(parent);
                    break;
                }
            }
        }
    }

    /// Walk up from the slot whose subtree lost one level.
    fn retrace_erase(&mut self, mut shortened: Option<(NodeId, Side)>) {
        while let Some((parent, side)) = shortened {
            let balance = self.adjust(parent, -side.sign());
            trace!("erase retrace at {}: balance {}", parent, balance);
            let top = match balance {
                -1 | 1 => break,
                0 => parent,
                _ => match self.rebalance(parent) {
                    (top, true) => top,
                    (_, false) => break,
                },
            };
            shortened = self.tree.nodes.position(top);
        }
    }
}

impl<T, C: Compare<T>> AvlTree<T, C> {
    /// Insert a key.
    ///
    /// Returns true and the position of the new key, or false and the position of the stored
    /// key that compares equal. In the latter case `key` is dropped and the tree is unchanged.
    pub fn insert(&mut self, key: T) -> (bool, Cursor<'_, T, C>) {
        let (inserted, id) = self.insert_id(key);
        (inserted, Cursor::new(&self.tree, Some(id)))
    }

    /// Insert a key, returning false if an equal key was already present.
    pub fn insert_key(&mut self, key: T) -> bool {
        self.insert_id(key).0
    }

    pub(crate) fn insert_id(&mut self, key: T) -> (bool, NodeId) {
        let (inserted, id) = self.tree.insert_node(key);
        if inserted {
            self.retrace_insert(id);
            #[cfg(feature = "metrics")]
            crate::prom::INSERTS.inc();
            self.tree.after_mutation(true);
        }
        (inserted, id)
    }

    /// Remove a key, returning it if it was present.
    pub fn take(&mut self, key: &T) -> Option<T> {
        let id = self.tree.search(|stored| self.tree.cmp.compare(key, stored))?;
        Some(self.remove_id(id))
    }

    /// Remove the key for which `probe` returns `Equal`, see [Bst::find_by].
    pub fn take_by(&mut self, probe: impl FnMut(&T) -> Ordering) -> Option<T> {
        let id = self.tree.search(probe)?;
        Some(self.remove_id(id))
    }

    /// Remove a key. Returns false if it was not present.
    pub fn erase(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    pub(crate) fn remove_id(&mut self, id: NodeId) -> T {
        let (key, shortened) = self.tree.remove_node(id);
        self.retrace_erase(shortened);
        #[cfg(feature = "metrics")]
        crate::prom::ERASES.inc();
        self.tree.after_mutation(true);
        key
    }

    /// All invariants of the core plus the stored balance factors and the AVL condition.
    pub fn check_invariants(&self) -> Vec<String> {
        self.tree.audit(true)
    }

    pub fn try_check_invariants(&self) -> Result<(), Error> {
        super::invariants::to_result(self.tree.audit(true))
    }

    /// Check all invariants, logging each failed one, and panic if there are any.
    pub fn assert_invariants(&self) {
        let msgs = self.tree.audit(true);
        if !msgs.is_empty() {
            super::invariants::report(msgs);
        }
    }
}

impl<T: Clone, C: Clone> Clone for AvlTree<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<T, C: Compare<T>> Extend<T> for AvlTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert_id(key);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for AvlTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T> + Default, const N: usize> From<[T; N]> for AvlTree<T, C> {
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<T: PartialEq, C> PartialEq for AvlTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for AvlTree<T, C> {}

impl<T, C> IntoIterator for AvlTree<T, C> {
    type Item = T;
    type IntoIter = super::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = super::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use std::collections::BTreeSet;

    fn keys<C>(tree: &AvlTree<i32, C>) -> Vec<i32> {
        tree.iter().cloned().collect()
    }

    fn debug_tree() -> AvlTree<i32> {
        AvlTree::with_config(Config::debug(), Natural)
    }

    #[test]
    fn sorted_input_stays_shallow() {
        let mut tree = debug_tree();
        tree.extend(1..=7);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &4);
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn single_rotations() {
        // right-right
        let tree: AvlTree<i32> = AvlTree::from([1, 2, 3]);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &2);
        tree.assert_invariants();
        // left-left
        let tree: AvlTree<i32> = AvlTree::from([3, 2, 1]);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &2);
        tree.assert_invariants();
    }

    #[test]
    fn double_rotations() {
        // right-left
        let tree: AvlTree<i32> = AvlTree::from([1, 3, 2]);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &2);
        assert_eq!(tree.height(), 1);
        tree.assert_invariants();
        // left-right
        let tree: AvlTree<i32> = AvlTree::from([3, 1, 2]);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &2);
        assert_eq!(tree.height(), 1);
        tree.assert_invariants();
    }

    #[test]
    fn erase_two_child_node() {
        let mut tree = debug_tree();
        tree.extend([5, 3, 8, 1, 4, 7, 9]);
        assert!(tree.erase(&3));
        assert_eq!(keys(&tree), vec![1, 4, 5, 7, 8, 9]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn erase_rotates_more_than_once() {
        // the root leans left and its right subtree leans right. Removing 9 rotates at 10,
        // which shortens the right subtree and then forces a rotation at the root.
        let mut tree = debug_tree();
        tree.extend([8, 4, 10, 2, 6, 9, 11, 1, 3, 5, 7, 12, 0]);
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &8);
        assert_eq!(tree.height(), 3);
        assert!(tree.erase(&9));
        assert_eq!(tree.node(tree.root_id().unwrap()).key(), &4);
        let eleven = tree.find(&11).node_id().unwrap();
        let left = tree.node(eleven).left().unwrap();
        assert_eq!(tree.node(left).key(), &10);
        assert_eq!(tree.height(), 3);
        assert_eq!(keys(&tree), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12]);
    }

    #[test]
    fn erase_everything() {
        let mut tree = debug_tree();
        tree.extend(0..100);
        for x in (0..100).rev().step_by(3) {
            assert!(tree.erase(&x));
        }
        for x in 0..100 {
            tree.erase(&x);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn height_matches_core_height() {
        let tree: AvlTree<i32> = (0..1000).map(|x| (x * 7919) % 1000).collect();
        assert_eq!(tree.height(), tree.tree.height());
        assert!(tree.height() <= 14);
    }

    #[quickcheck]
    fn behaves_like_btreeset(ops: Vec<(bool, u8)>) -> TestResult {
        let mut tree = AvlTree::<u8>::new();
        let mut model = BTreeSet::new();
        for (insert, x) in ops {
            let (actual, expected) = if insert {
                (tree.insert(x).0, model.insert(x))
            } else {
                (tree.erase(&x), model.remove(&x))
            };
            if actual != expected {
                return TestResult::error(format!("diverged at {} {}", insert, x));
            }
            let msgs = tree.check_invariants();
            if !msgs.is_empty() {
                return TestResult::error(msgs.join(", "));
            }
        }
        TestResult::from_bool(tree.iter().eq(model.iter()) && tree.len() == model.len())
    }
}
