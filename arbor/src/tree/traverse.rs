//! structural traversals: pre-order, post-order and level order
//!
//! In-order traversal is [Iter](struct.Iter.html). These visit keys in an order determined by
//! the shape of the tree rather than by the key order, which is mostly useful for debugging and
//! for rebuilding a tree with the same shape.
use super::Bst;
use crate::node::{NodeId, Nodes};
use smallvec::SmallVec;
use std::{collections::VecDeque, iter::FusedIterator};

impl<T, C> Bst<T, C> {
    /// Keys in pre-order: a node, then its left subtree, then its right subtree.
    ///
    /// Inserting the keys in this order into an empty unbalanced tree with the same comparator
    /// reproduces the shape.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            nodes: &self.nodes,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Keys in post-order: both subtrees of a node, left first, then the node.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder {
            nodes: &self.nodes,
            stack: self.root.map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Keys level by level from the root, left to right within a level.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            nodes: &self.nodes,
            queue: self.root.into_iter().collect(),
        }
    }
}

pub struct PreOrder<'a, T> {
    nodes: &'a Nodes<T>,
    stack: SmallVec<[NodeId; 32]>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        let node = &nodes[self.stack.pop()?];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(node.key())
    }
}

impl<'a, T> FusedIterator for PreOrder<'a, T> {}

pub struct PostOrder<'a, T> {
    nodes: &'a Nodes<T>,
    /// nodes with a flag telling whether their children are already on the stack
    stack: SmallVec<[(NodeId, bool); 32]>,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        loop {
            let (id, expanded) = self.stack.pop()?;
            let node = &nodes[id];
            if expanded {
                return Some(node.key());
            }
            self.stack.push((id, true));
            self.stack.extend(node.right.map(|child| (child, false)));
            self.stack.extend(node.left.map(|child| (child, false)));
        }
    }
}

impl<'a, T> FusedIterator for PostOrder<'a, T> {}

pub struct LevelOrder<'a, T> {
    nodes: &'a Nodes<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        let node = &nodes[self.queue.pop_front()?];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(node.key())
    }
}

impl<'a, T> FusedIterator for LevelOrder<'a, T> {}
