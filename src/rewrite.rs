//! The bottom-up traversal engine.
//!
//! For every node, the engine rewrites the node's children left to right,
//! rebuilds the node from the rewritten children, then folds the rules that
//! target the node's type over the rebuilt node in chain order. A parent
//! therefore always sees its children's rewritten form.
//!
//! Checked entry points ([`rewrite`], [`rewrite_effectful`]) run the presence
//! check first and fail before any rule runs. The unchecked variants skip it;
//! rules for types that never occur are silent no-ops there.
//!
//! Effects happen in traversal order: depth first, children before parent,
//! chain order within a node. The first `Err` returned by an effectful rule
//! stops the traversal.
//!
//! Recursion follows the nesting of the value on the native stack.

use core::convert::Infallible;

use tracing::debug;

use crate::error::Error;
use crate::presence::check;
use crate::rule::{IntoRules, Rules};
use crate::term::{Mapper, Term, TermType, Visitor};

/// Rewrites every node of a term, bottom-up.
struct Rewriter<'r, 'f, E> {
    rules: &'r mut Rules<'f, E>,
}

impl<E> Mapper for Rewriter<'_, '_, E> {
    type Error = E;

    fn map<T: Term>(&mut self, term: T) -> Result<T, E> {
        let term = term.map_children(self)?;
        self.rules.apply(term)
    }
}

/// Walks a term by reference, bottom-up, running observing rules only.
struct Walker<'r, 'f, E> {
    rules: &'r mut Rules<'f, E>,
}

impl<E> Visitor for Walker<'_, '_, E> {
    type Error = Infallible;

    fn visit<T: Term>(&mut self, term: &T) -> Result<(), Infallible> {
        term.visit_children(self)?;
        self.rules.observe(term);
        Ok(())
    }
}

fn run<T: Term, E>(rules: &mut Rules<'_, E>, term: T) -> Result<T, E> {
    if rules.is_empty() {
        return Ok(term);
    }
    Rewriter { rules }.map(term)
}

/// Run the observing rules of `rules` over `term`, bottom-up.
pub(crate) fn walk<T: Term, E>(rules: &mut Rules<'_, E>, term: &T) {
    if rules.is_empty() {
        return;
    }
    debug!(root = %TermType::of::<T>(), rules = rules.len(), "walk");
    into_ok(Walker { rules }.visit(term));
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Rewrite `term` bottom-up with a chain of pure rules.
///
/// Fails with [`Error::TypeMismatch`] if some rule targets a type unreachable
/// from `T`, or [`Error::ConstructionFailure`] if the type graph cannot be
/// enumerated. No rule runs in either case.
pub fn rewrite<'f, T, R, M>(rules: R, term: T) -> Result<T, Error>
where
    T: Term,
    R: IntoRules<'f, Infallible, M>,
{
    let mut rules = rules.into_rules();
    debug!(root = %TermType::of::<T>(), rules = rules.len(), "rewrite");
    check::<T, _>(&rules)?;
    Ok(into_ok(run(&mut rules, term)))
}

/// Rewrite `term` bottom-up with rules that may fail.
///
/// Presence-check failures are converted into `E`. Otherwise the first rule
/// error aborts the traversal and is returned as is.
pub fn rewrite_effectful<'f, T, E, R, M>(rules: R, term: T) -> Result<T, E>
where
    T: Term,
    E: From<Error>,
    R: IntoRules<'f, E, M>,
{
    let mut rules = rules.into_rules();
    debug!(root = %TermType::of::<T>(), rules = rules.len(), "rewrite_effectful");
    check::<T, _>(&rules)?;
    run(&mut rules, term)
}

/// [`rewrite`] without the presence check. Never fails.
pub fn rewrite_unchecked<'f, T, R, M>(rules: R, term: T) -> T
where
    T: Term,
    R: IntoRules<'f, Infallible, M>,
{
    let mut rules = rules.into_rules();
    debug!(root = %TermType::of::<T>(), rules = rules.len(), "rewrite_unchecked");
    into_ok(run(&mut rules, term))
}

/// [`rewrite_effectful`] without the presence check. Only rule errors are
/// returned.
pub fn rewrite_effectful_unchecked<'f, T, E, R, M>(rules: R, term: T) -> Result<T, E>
where
    T: Term,
    R: IntoRules<'f, E, M>,
{
    let mut rules = rules.into_rules();
    debug!(
        root = %TermType::of::<T>(),
        rules = rules.len(),
        "rewrite_effectful_unchecked"
    );
    run(&mut rules, term)
}
