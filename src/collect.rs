//! Subterm collection.
//!
//! A collector walks a term with a single observing rule for the watched type.
//! Each occurrence is offered to a filter-map; every `Some` result is merged
//! into an [`Accumulator`] in traversal order (bottom-up, left to right). The
//! term is only ever borrowed, so collection cannot change it.
//!
//! Collection is unchecked: a type that never occurs yields the empty
//! accumulator rather than an error.

use alloc::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    string::String,
    vec::Vec,
};
use core::hash::{BuildHasher, Hash};

use crate::rewrite::walk;
use crate::rule::{Rule, Rules};
use crate::term::Term;

/// A container with an empty value and an associative merge.
pub trait Accumulator {
    fn empty() -> Self;

    /// Append `other` after the current contents.
    fn combine(&mut self, other: Self);
}

impl<T> Accumulator for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn combine(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl<T> Accumulator for VecDeque<T> {
    fn empty() -> Self {
        VecDeque::new()
    }

    fn combine(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl Accumulator for String {
    fn empty() -> Self {
        String::new()
    }

    fn combine(&mut self, other: Self) {
        self.push_str(&other);
    }
}

impl<T: Ord> Accumulator for BTreeSet<T> {
    fn empty() -> Self {
        BTreeSet::new()
    }

    fn combine(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

/// Later entries win on duplicate keys.
impl<K: Ord, V> Accumulator for BTreeMap<K, V> {
    fn empty() -> Self {
        BTreeMap::new()
    }

    fn combine(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl<T, S> Accumulator for hashbrown::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn empty() -> Self {
        hashbrown::HashSet::with_hasher(S::default())
    }

    fn combine(&mut self, other: Self) {
        self.extend(other);
    }
}

#[cfg(feature = "std")]
impl<T, S> Accumulator for std::collections::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn empty() -> Self {
        std::collections::HashSet::with_hasher(S::default())
    }

    fn combine(&mut self, other: Self) {
        self.extend(other);
    }
}

impl Accumulator for () {
    fn empty() -> Self {}

    fn combine(&mut self, _other: Self) {}
}

impl<A: Accumulator, B: Accumulator> Accumulator for (A, B) {
    fn empty() -> Self {
        (A::empty(), B::empty())
    }

    fn combine(&mut self, other: Self) {
        self.0.combine(other.0);
        self.1.combine(other.1);
    }
}

/// Merge `filter_map(x)` into an accumulator for every `T` below (and
/// including) `term`.
pub fn collect_all_with<T, R, A, F>(mut filter_map: F, term: &R) -> A
where
    T: Term,
    R: Term,
    A: Accumulator,
    F: FnMut(&T) -> Option<A>,
{
    let mut acc = A::empty();
    {
        let mut rules: Rules = Rules::from(Rule::observe(|found: &T| {
            if let Some(part) = filter_map(found) {
                acc.combine(part);
            }
        }));
        walk(&mut rules, term);
    }
    acc
}

/// Every `T` satisfying `predicate`, in traversal order.
pub fn collect_all_by<T, R, P>(mut predicate: P, term: &R) -> Vec<T>
where
    T: Term + Clone,
    R: Term,
    P: FnMut(&T) -> bool,
{
    collect_all_with(
        |found: &T| predicate(found).then(|| alloc::vec![found.clone()]),
        term,
    )
}

/// `f` applied to every `T`, in traversal order.
pub fn collect_all_map<T, R, U, F>(mut f: F, term: &R) -> Vec<U>
where
    T: Term,
    R: Term,
    F: FnMut(&T) -> U,
{
    collect_all_with(|found: &T| Some(alloc::vec![f(found)]), term)
}

/// Every `T`, in traversal order.
pub fn collect_all<T, R>(term: &R) -> Vec<T>
where
    T: Term + Clone,
    R: Term,
{
    collect_all_by(|_: &T| true, term)
}
