//! Type presence checking.
//!
//! Before a checked rewrite runs, every rule's target type must be reachable
//! from the root type's *type graph*: the closure of child types over every
//! constructor of every type found so far. Reachability is a property of the
//! types only. A rule whose type could occur but happens not to in a given
//! value is accepted; a rule whose type can never occur is rejected, since it
//! would silently do nothing.

use alloc::{vec, vec::Vec};
use core::fmt;

use hashbrown::HashSet;
use tracing::{trace, warn};

use crate::error::Error;
use crate::rule::Rules;
use crate::term::{Shape, Term, TermType};

/// A set of term types.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TypeSet {
    types: HashSet<TermType>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `ty` was not in the set yet.
    pub fn insert(&mut self, ty: TermType) -> bool {
        self.types.insert(ty)
    }

    pub fn contains(&self, ty: &TermType) -> bool {
        self.types.contains(ty)
    }

    pub fn contains_type<T: Term>(&self) -> bool {
        self.contains(&TermType::of::<T>())
    }

    pub fn is_subset(&self, other: &TypeSet) -> bool {
        self.types.is_subset(&other.types)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TermType> + '_ {
        self.types.iter().copied()
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.types.iter().map(TermType::name))
            .finish()
    }
}

impl FromIterator<TermType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TermType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl<E> Rules<'_, E> {
    /// Target types of every rule in the chain, duplicates collapsed.
    pub fn needed_types(&self) -> TypeSet {
        self.targets().collect()
    }
}

/// Every type reachable from `T` through the constructors of the types met
/// along the way, `T` included.
///
/// Each type's shape is computed once, so recursive types terminate. Fails with
/// [`Error::ConstructionFailure`] on the first reachable type whose shape is
/// [`Shape::Opaque`].
pub fn reachable_types<T: Term>() -> Result<TypeSet, Error> {
    let root = TermType::of::<T>();
    let mut reachable = TypeSet::new();
    reachable.insert(root);
    let mut frontier = vec![root];

    while let Some(ty) = frontier.pop() {
        let shape = ty.shape();
        if shape == Shape::Opaque {
            return Err(Error::ConstructionFailure { ty });
        }
        for child in shape.child_types() {
            if reachable.insert(child) {
                frontier.push(child);
            }
        }
    }

    trace!(root = %root, count = reachable.len(), "computed reachable types");
    Ok(reachable)
}

/// Same as [`reachable_types`], for the type of `term`. The value itself is
/// not inspected.
pub fn reachable_types_of<T: Term>(_term: &T) -> Result<TypeSet, Error> {
    reachable_types::<T>()
}

/// Verify that every target of `rules` is reachable from `T`.
///
/// An empty chain needs nothing and always passes, without probing `T`.
pub fn check<T: Term, E>(rules: &Rules<'_, E>) -> Result<(), Error> {
    if rules.is_empty() {
        return Ok(());
    }

    let reachable = reachable_types::<T>()?;
    let mut missing: Vec<TermType> = Vec::new();
    for target in rules.targets() {
        if !reachable.contains(&target) && !missing.contains(&target) {
            missing.push(target);
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    let root = TermType::of::<T>();
    warn!(root = %root, missing = missing.len(), "rule targets unreachable");
    Err(Error::TypeMismatch { root, missing })
}
