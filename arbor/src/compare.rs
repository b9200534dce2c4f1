//! order functors for trees
//!
//! A tree is parametrized with a [Compare] implementation that defines a total order on the
//! stored keys. Two keys that compare as [Ordering::Equal] are considered the same key, so at
//! most one of them can be stored.
//!
//! [Compare]: trait.Compare.html
use core::{cmp::Ordering, fmt};

/// A total order on `T`
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The order given by [Ord]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The inverse of another order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reverse<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// An order defined by a closure
#[derive(Clone, Copy)]
pub struct FnCompare<F>(pub F);

impl<F> fmt::Debug for FnCompare<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnCompare")
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Compare<T> for FnCompare<F> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

/// Orders `(key, value)` entries by their key only.
///
/// This is what [Map] uses to store its entries in a tree.
///
/// [Map]: ../map/struct.Map.html
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByKey<C>(pub C);

impl<K, V, C: Compare<K>> Compare<(K, V)> for ByKey<C> {
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Ordering {
        self.0.compare(&a.0, &b.0)
    }
}
