//! Node storage for the tree.
//!
//! Nodes live in an arena and refer to each other through [NodeId] handles. A child link is
//! stored in exactly one place: the `left` or `right` slot of its parent, or the root slot of
//! the tree. The `parent` link is a plain back reference that is only ever used to walk
//! upwards, never to free anything. Freeing a node puts its slot on a free list so the next
//! insert can reuse it.
//!
//! Moving a subtree always goes through [Nodes::take_child], which clears the source slot,
//! followed by [Nodes::attach], which fills the destination slot and fixes the back reference.
//!
//! [NodeId]: struct.NodeId.html
use derive_more::Display;
use std::{
    mem,
    ops::{Index, IndexMut},
};

/// Handle of a node in the arena of a tree.
///
/// A handle is only meaningful for the tree that produced it, and only as long as the node has
/// not been erased.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display(fmt = "#{}", _0)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }

    /// panics once the arena holds more slots than a `u32` can address
    fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena exhausted"))
    }
}

/// Which child of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Change of the balance factor when the subtree on this side grows by one level.
    ///
    /// Balance factors are `height(right) - height(left)`.
    pub fn sign(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// A stored key together with its links
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) key: T,
    pub(crate) balance: i8,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(key: T) -> Self {
        Self {
            key,
            balance: 0,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &T {
        &self.key
    }

    /// `height(right) - height(left)` as maintained by the balancing layer.
    ///
    /// Always 0 for nodes of an unbalanced [Bst](../tree/struct.Bst.html).
    pub fn balance(&self) -> i8 {
        self.balance
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    /// free slot, linking to the next free slot
    Vacant(Option<NodeId>),
}

/// The node arena of a tree
#[derive(Debug, Clone)]
pub(crate) struct Nodes<T> {
    slots: Vec<Slot<T>>,
    free: Option<NodeId>,
    len: usize,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }
}

impl<T> Nodes<T> {
    /// number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    /// allocate a detached node with both children absent and balance 0
    pub fn alloc(&mut self, key: T) -> NodeId {
        let node = Slot::Occupied(Node::new(key));
        self.len += 1;
        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.index()], node);
                self.free = match slot {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points to a live node {}", id),
                };
                id
            }
            None => {
                let id = NodeId::from_index(self.slots.len());
                self.slots.push(node);
                id
            }
        }
    }

    /// release a node that has already been unlinked from the tree
    pub fn free(&mut self, id: NodeId) -> T {
        debug_assert!(self[id].left.is_none() && self[id].right.is_none());
        let slot = mem::replace(&mut self.slots[id.index()], Slot::Vacant(self.free));
        self.free = Some(id);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node.key,
            Slot::Vacant(_) => panic!("double free of node {}", id),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self[id].child(side)
    }

    /// The parent of a node and the side of the parent the node hangs on, or `None` for the root
    pub fn position(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self[id].parent?;
        let side = if self[parent].left == Some(id) {
            Side::Left
        } else {
            debug_assert_eq!(self[parent].right, Some(id));
            Side::Right
        };
        Some((parent, side))
    }

    /// Remove the subtree on one side of `parent`, revoking both links.
    pub fn take_child(&mut self, parent: NodeId, side: Side) -> Option<NodeId> {
        let child = self[parent].child_mut(side).take();
        if let Some(child) = child {
            self[child].parent = None;
        }
        child
    }

    /// Store a subtree in an empty child slot of `parent`.
    pub fn attach(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let slot = self[parent].child_mut(side);
        debug_assert!(slot.is_none(), "attaching to an occupied slot of {}", parent);
        *slot = child;
        if let Some(child) = child {
            self[child].parent = Some(parent);
        }
    }

    /// Leftmost (`Side::Left`) or rightmost (`Side::Right`) node of a subtree
    pub fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    /// In-order neighbour in direction `side`: `Side::Right` is the successor, `Side::Left` the
    /// predecessor.
    ///
    /// Only local links are used. If there is a subtree in direction `side` the neighbour is its
    /// extreme node on the other side, otherwise we climb until we leave a subtree that hangs on
    /// the opposite side of its parent.
    pub fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = id;
        while let Some((parent, from)) = self.position(current) {
            if from != side {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    /// Exchange the keys of two distinct nodes, leaving all links in place.
    pub fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi.index());
        match (&mut head[lo.index()], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => mem::swap(&mut x.key, &mut y.key),
            _ => panic!("swapping keys of a free node {} {}", a, b),
        }
    }

    /// Consume the arena, returning keys in the in-order sequence starting at `first`.
    pub fn into_keys_from(self, first: Option<NodeId>) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut cursor = first;
        while let Some(id) = cursor {
            order.push(id);
            cursor = self.successor(id);
        }
        let mut keys = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Occupied(node) => Some(node.key),
                Slot::Vacant(_) => None,
            })
            .collect::<Vec<_>>();
        order
            .into_iter()
            .filter_map(|id| keys[id.index()].take())
            .collect()
    }
}

impl<T> Index<NodeId> for Nodes<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node id {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Nodes<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node id {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// builds
    /// ```text
    ///     2
    ///    / \
    ///   1   4
    ///      /
    ///     3
    /// ```
    fn small() -> (Nodes<u32>, [NodeId; 4]) {
        let mut nodes = Nodes::default();
        let n1 = nodes.alloc(1);
        let n2 = nodes.alloc(2);
        let n3 = nodes.alloc(3);
        let n4 = nodes.alloc(4);
        nodes.attach(n2, Side::Left, Some(n1));
        nodes.attach(n2, Side::Right, Some(n4));
        nodes.attach(n4, Side::Left, Some(n3));
        (nodes, [n1, n2, n3, n4])
    }

    #[test]
    fn neighbours_walk_parent_links() {
        let (nodes, [n1, n2, n3, n4]) = small();
        assert_eq!(nodes.successor(n1), Some(n2));
        assert_eq!(nodes.successor(n2), Some(n3));
        assert_eq!(nodes.successor(n3), Some(n4));
        assert_eq!(nodes.successor(n4), None);
        assert_eq!(nodes.predecessor(n4), Some(n3));
        assert_eq!(nodes.predecessor(n3), Some(n2));
        assert_eq!(nodes.predecessor(n1), None);
        assert_eq!(nodes.extreme(n2, Side::Right), n4);
        assert_eq!(nodes.position(n3), Some((n4, Side::Left)));
        assert_eq!(nodes.position(n2), None);
    }

    #[test]
    fn take_child_revokes_both_links() {
        let (mut nodes, [_, n2, n3, n4]) = small();
        assert_eq!(nodes.take_child(n2, Side::Right), Some(n4));
        assert_eq!(nodes[n2].right, None);
        assert_eq!(nodes[n4].parent, None);
        assert_eq!(nodes[n3].parent, Some(n4));
    }

    #[test]
    fn ids_follow_slot_indices() {
        assert_eq!(NodeId::from_index(7), NodeId(7));
        assert_eq!(NodeId::from_index(u32::MAX as usize).index(), u32::MAX as usize);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "node arena exhausted")]
    fn ids_beyond_u32_panic() {
        NodeId::from_index(u32::MAX as usize + 1);
    }

    #[test]
    fn free_slots_are_reused() {
        let (mut nodes, [_, _, n3, n4]) = small();
        nodes.take_child(n4, Side::Left);
        assert_eq!(nodes.free(n3), 3);
        assert_eq!(nodes.len(), 3);
        assert!(nodes.get(n3).is_none());
        let n5 = nodes.alloc(5);
        assert_eq!(n5, n3);
        assert_eq!(nodes[n5].key, 5);
        assert_eq!(nodes.len(), 4);
    }

    #[test]
    fn swap_and_drain() {
        let (mut nodes, [n1, n2, _, n4]) = small();
        nodes.swap_keys(n4, n1);
        assert_eq!(nodes[n1].key, 4);
        assert_eq!(nodes.into_keys_from(Some(n1)), vec![4, 2, 3, 1]);
        let (nodes, _) = small();
        assert_eq!(nodes.into_keys_from(Some(n2)), vec![2, 3, 4]);
    }
}
