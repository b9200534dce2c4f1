#![allow(dead_code)]
//! helper methods for the tests
use arbor::{AvlTree, Bst, Compare};
use quickcheck::{Arbitrary, Gen};
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

/// A mutation of a set of small keys.
///
/// Keys are drawn from a small range so that erases frequently hit stored keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert(u8),
    Erase(u8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let key = u8::arbitrary(g) % 64;
        if bool::arbitrary(g) {
            Op::Insert(key)
        } else {
            Op::Erase(key)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match *self {
            Op::Insert(key) => Box::new(key.shrink().map(Op::Insert)),
            Op::Erase(key) => Box::new(key.shrink().map(Op::Erase)),
        }
    }
}

impl Op {
    /// apply to the model, returning whether it changed
    pub fn model(self, model: &mut BTreeSet<u8>) -> bool {
        match self {
            Op::Insert(key) => model.insert(key),
            Op::Erase(key) => model.remove(&key),
        }
    }

    pub fn avl<C: Compare<u8>>(self, tree: &mut AvlTree<u8, C>) -> bool {
        match self {
            Op::Insert(key) => tree.insert(key).0,
            Op::Erase(key) => tree.erase(&key),
        }
    }

    pub fn bst<C: Compare<u8>>(self, tree: &mut Bst<u8, C>) -> bool {
        match self {
            Op::Insert(key) => tree.insert(key).0,
            Op::Erase(key) => tree.erase(&key),
        }
    }
}

/// Log to stderr when `RUST_LOG` is set. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// collect the keys of a tree by stepping a cursor backwards from the end position
pub fn backwards<T: Clone, C>(tree: &Bst<T, C>) -> Vec<T> {
    let mut keys = Vec::new();
    let mut cursor = tree.end();
    cursor.move_prev();
    while let Some(key) = cursor.get() {
        keys.push(key.clone());
        cursor.move_prev();
    }
    keys
}
