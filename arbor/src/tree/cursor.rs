//! positions in a tree and in-order iteration
//!
//! Neither cursors nor iterators keep a stack. Each step finds the in-order neighbour from the
//! links of the current node alone, see `Nodes::neighbour`. A single step costs O(height) in
//! the worst case, a full traversal O(1) per element on average.
use super::Bst;
use crate::node::{NodeId, Nodes};
use core::{fmt, iter::FusedIterator, ptr};

/// A position in a tree: either a stored key or the end position.
///
/// The end position sits between the last and the first key. Moving forward from it lands on
/// the first key, moving backward on the last one, so a traversal in either direction can start
/// at [end](struct.Bst.html#method.end).
pub struct Cursor<'a, T, C> {
    tree: &'a Bst<T, C>,
    node: Option<NodeId>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(tree: &'a Bst<T, C>, node: Option<NodeId>) -> Self {
        Self { tree, node }
    }

    /// true at the end position
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    /// the key at this position, `None` at the end position
    pub fn get(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.node.map(|id| tree.nodes[id].key())
    }

    /// The key at this position.
    ///
    /// Dereferencing the end position is a logic error and panics.
    pub fn key(&self) -> &'a T {
        match self.get() {
            Some(key) => key,
            None => panic!("dereferenced the end position of a tree"),
        }
    }

    /// Advance to the in-order successor.
    pub fn move_next(&mut self) {
        self.node = match self.node {
            Some(id) => self.tree.nodes.successor(id),
            None => self.tree.first_id(),
        };
    }

    /// Retreat to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.node = match self.node {
            Some(id) => self.tree.nodes.predecessor(id),
            None => self.tree.last_id(),
        };
    }

    /// the position after this one
    pub fn successor(mut self) -> Self {
        self.move_next();
        self
    }

    /// the position before this one
    pub fn predecessor(mut self) -> Self {
        self.move_prev();
        self
    }

    /// Move `n` positions, forward for positive `n` and backward for negative `n`.
    ///
    /// Each step behaves like [move_next](#method.move_next) or [move_prev](#method.move_prev),
    /// so stepping past either end lands on the end position and continues from the other end.
    pub fn advance(&mut self, n: isize) {
        for _ in 0..n.unsigned_abs() {
            if n > 0 {
                self.move_next();
            } else {
                self.move_prev();
            }
        }
    }

    /// the position `n` steps away, see [advance](#method.advance)
    pub fn offset(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, C> Copy for Cursor<'a, T, C> {}

impl<'a, T, C> PartialEq for Cursor<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<'a, T, C> Eq for Cursor<'a, T, C> {}

impl<'a, T: fmt::Debug, C> fmt::Debug for Cursor<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(key) => f.debug_tuple("Cursor").field(key).finish(),
            None => write!(f, "Cursor(end)"),
        }
    }
}

/// Iterator over the keys of a tree in ascending order
pub struct Iter<'a, T> {
    nodes: &'a Nodes<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Nodes<T>, front: Option<NodeId>, back: Option<NodeId>) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining: nodes.len(),
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.nodes.successor(id);
        Some(self.nodes[id].key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.nodes.predecessor(id);
        Some(self.nodes[id].key())
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator over the keys of a tree in ascending order
#[derive(Debug)]
pub struct IntoIter<T>(std::vec::IntoIter<T>);

impl<T> IntoIter<T> {
    pub(crate) fn new(keys: Vec<T>) -> Self {
        Self(keys.into_iter())
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
