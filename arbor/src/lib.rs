//! # Arbor
//!
//! Ordered containers on top of a height balanced binary search tree.
//!
//! Keys are kept in sorted order under a user supplied [Compare] implementation, so lookup,
//! insertion and removal are O(log n). Every node knows its parent, which allows in-order
//! traversal in both directions without a stack: the next position is computed from the links of
//! the current node alone.
//!
//! ## Layers
//!
//! - [Bst] is the plain binary search tree: ordered insertion, search, bound queries and removal.
//!   It never restructures itself, so sorted input produces a linked list.
//! - [AvlTree] wraps a [Bst] and restores the AVL condition after every insertion and removal,
//!   keeping the difference between the heights of the two subtrees of every node at most 1.
//! - [Set] and [Map] are thin adapters that expose the tree under familiar names.
//!
//! ## Removal
//!
//! Removing a node with children does not unlink the node itself. Instead its key is exchanged
//! with the key of its in-order neighbour, which sits lower in the tree and has at most one
//! child, and that neighbour is unlinked. Which neighbour donates the key is configurable, see
//! [Config].
//!
//! ## Positions
//!
//! A [Cursor] refers to a stored key or to the end position. Cursors borrow the tree, so a tree
//! cannot be modified while a cursor into it exists.
//!
//! [Compare]: compare/trait.Compare.html
//! [Bst]: tree/struct.Bst.html
//! [AvlTree]: tree/struct.AvlTree.html
//! [Set]: set/struct.Set.html
//! [Map]: map/struct.Map.html
//! [Config]: tree/struct.Config.html
//! [Cursor]: tree/struct.Cursor.html
pub mod compare;
pub mod error;
pub mod map;
pub mod node;
#[cfg(feature = "metrics")]
mod prom;
pub mod set;
pub mod tree;

pub use compare::{ByKey, Compare, FnCompare, Natural, Reverse};
pub use map::Map;
#[cfg(feature = "metrics")]
pub use prom::register_metrics;
pub use set::Set;
pub use tree::{AvlTree, Bst, Config, Cursor, Replacement};

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
