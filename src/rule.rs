//! Type-tagged rules and ordered rule chains.
//!
//! A [`Rule`] pairs a target [`TermType`] with a closure over values of
//! exactly that type. Dispatch compares type ids first and only then hands the
//! value to the closure, so a rule never sees a value of another type.
//!
//! Rules come in three forms:
//!
//! - *pure*: `FnMut(T) -> T`
//! - *effectful*: `FnMut(T) -> Result<T, E>`; an `Err` aborts the traversal
//! - *observing*: `FnMut(&T)`; sees the value and passes it through unchanged
//!
//! [`Rules`] is an ordered chain. When several rules target the same type, they
//! run in insertion order on each node and each one receives the previous
//! one's output.
//!
//! Anything implementing [`IntoRules`] can be passed where a chain is
//! expected: a rule, a typed closure or function, a chain, a `Vec` or array of
//! rules, or a tuple of any of these.

use alloc::{boxed::Box, vec::Vec};
use core::any::Any;
use core::convert::Infallible;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Add;

use crate::term::{Term, TermType};

enum RuleFn<'f, E> {
    Pure(Box<dyn FnMut(&mut dyn Any) + 'f>),
    Effectful(Box<dyn FnMut(&mut dyn Any) -> Result<(), E> + 'f>),
    Observe(Box<dyn FnMut(&dyn Any) + 'f>),
}

/// A function over a single term type.
///
/// The closure is stored behind a type-erased slot: it receives a
/// `&mut Option<T>` and downcasts it back to its own argument type.
pub struct Rule<'f, E = Infallible> {
    target: TermType,
    func: RuleFn<'f, E>,
}

impl<'f, E> Rule<'f, E> {
    /// Wrap a pure function over `T`.
    pub fn new<T, F>(mut f: F) -> Self
    where
        T: Term,
        F: FnMut(T) -> T + 'f,
    {
        Self {
            target: TermType::of::<T>(),
            func: RuleFn::Pure(Box::new(move |slot: &mut dyn Any| {
                if let Some(slot) = slot.downcast_mut::<Option<T>>() {
                    if let Some(term) = slot.take() {
                        *slot = Some(f(term));
                    }
                }
            })),
        }
    }

    /// Wrap a fallible function over `T`.
    pub fn effectful<T, F>(mut f: F) -> Self
    where
        T: Term,
        F: FnMut(T) -> Result<T, E> + 'f,
    {
        Self {
            target: TermType::of::<T>(),
            func: RuleFn::Effectful(Box::new(move |slot: &mut dyn Any| {
                if let Some(slot) = slot.downcast_mut::<Option<T>>() {
                    if let Some(term) = slot.take() {
                        *slot = Some(f(term)?);
                    }
                }
                Ok(())
            })),
        }
    }

    /// Wrap an observer over `T`. The traversed value is never changed.
    pub fn observe<T, F>(mut f: F) -> Self
    where
        T: Term,
        F: FnMut(&T) + 'f,
    {
        Self {
            target: TermType::of::<T>(),
            func: RuleFn::Observe(Box::new(move |term: &dyn Any| {
                if let Some(term) = term.downcast_ref::<T>() {
                    f(term);
                }
            })),
        }
    }

    pub fn target(&self) -> TermType {
        self.target
    }

    pub fn is_observer(&self) -> bool {
        matches!(self.func, RuleFn::Observe(_))
    }

    /// Run the rule on a value of its target type.
    fn apply<T: Term>(&mut self, term: T) -> Result<T, E> {
        debug_assert!(self.target.is::<T>(), "rule applied to the wrong type");
        let mut slot = Some(term);
        match &mut self.func {
            RuleFn::Pure(f) => f(&mut slot as &mut dyn Any),
            RuleFn::Effectful(f) => f(&mut slot as &mut dyn Any)?,
            RuleFn::Observe(f) => {
                if let Some(term) = &slot {
                    f(term as &dyn Any);
                }
            }
        }
        Ok(slot.expect("Bug: rule consumed its input without producing an output"))
    }
}

impl<E> fmt::Debug for Rule<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.func {
            RuleFn::Pure(_) => "pure",
            RuleFn::Effectful(_) => "effectful",
            RuleFn::Observe(_) => "observe",
        };
        f.debug_struct("Rule")
            .field("target", &self.target.name())
            .field("kind", &kind)
            .finish()
    }
}

/// An ordered chain of rules.
///
/// The empty chain is the identity; [`Rules::then`] appends and preserves
/// order.
pub struct Rules<'f, E = Infallible> {
    rules: Vec<Rule<'f, E>>,
}

impl<'f, E> Rules<'f, E> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Normalise anything rule-like into a chain.
    pub fn from_rules<M>(rules: impl IntoRules<'f, E, M>) -> Self {
        rules.into_rules()
    }

    pub fn push(&mut self, rule: Rule<'f, E>) {
        self.rules.push(rule);
    }

    /// `self` followed by `other`.
    pub fn then<M>(mut self, other: impl IntoRules<'f, E, M>) -> Self {
        self.rules.extend(other.into_rules().rules);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Target types in chain order, duplicates included.
    pub fn targets(&self) -> impl Iterator<Item = TermType> + '_ {
        self.rules.iter().map(Rule::target)
    }

    /// Fold every rule targeting `T` over `term`, in chain order.
    pub(crate) fn apply<T: Term>(&mut self, mut term: T) -> Result<T, E> {
        let target = TermType::of::<T>();
        for rule in self.rules.iter_mut().filter(|rule| rule.target == target) {
            term = rule.apply(term)?;
        }
        Ok(term)
    }

    /// Run every observing rule targeting `T`. Other rule kinds need ownership
    /// of the term and are skipped.
    pub(crate) fn observe<T: Term>(&mut self, term: &T) {
        let target = TermType::of::<T>();
        for rule in self.rules.iter_mut().filter(|rule| rule.target == target) {
            if let RuleFn::Observe(f) = &mut rule.func {
                f(term as &dyn Any);
            }
        }
    }
}

impl<E> Default for Rules<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Rules<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}

impl<'f, E> From<Rule<'f, E>> for Rules<'f, E> {
    fn from(rule: Rule<'f, E>) -> Self {
        Self {
            rules: alloc::vec![rule],
        }
    }
}

impl<'f, E> Add for Rules<'f, E> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.then(rhs)
    }
}

impl<'f, E> FromIterator<Rule<'f, E>> for Rules<'f, E> {
    fn from_iter<I: IntoIterator<Item = Rule<'f, E>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'f, E> Extend<Rule<'f, E>> for Rules<'f, E> {
    fn extend<I: IntoIterator<Item = Rule<'f, E>>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl<'f, E> IntoIterator for Rules<'f, E> {
    type Item = Rule<'f, E>;
    type IntoIter = alloc::vec::IntoIter<Rule<'f, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

/// Conversion into a rule chain.
///
/// `Marker` only exists to keep the implementations for closures apart from
/// each other and from the other shapes; it is always inferred.
pub trait IntoRules<'f, E, Marker> {
    fn into_rules(self) -> Rules<'f, E>;
}

/// Marker for closures `FnMut(T) -> T`.
#[doc(hidden)]
pub struct PureFn<T>(PhantomData<fn(T) -> T>);

/// Marker for closures `FnMut(T) -> Result<T, E>`.
#[doc(hidden)]
pub struct EffectfulFn<T>(PhantomData<fn(T) -> T>);

impl<'f, E> IntoRules<'f, E, ()> for Rule<'f, E> {
    fn into_rules(self) -> Rules<'f, E> {
        Rules::from(self)
    }
}

impl<'f, E> IntoRules<'f, E, ()> for Rules<'f, E> {
    fn into_rules(self) -> Rules<'f, E> {
        self
    }
}

impl<'f, E> IntoRules<'f, E, ()> for Vec<Rule<'f, E>> {
    fn into_rules(self) -> Rules<'f, E> {
        Rules { rules: self }
    }
}

impl<'f, E, const N: usize> IntoRules<'f, E, ()> for [Rule<'f, E>; N] {
    fn into_rules(self) -> Rules<'f, E> {
        self.into_iter().collect()
    }
}

impl<'f, E, T, F> IntoRules<'f, E, PureFn<T>> for F
where
    T: Term,
    F: FnMut(T) -> T + 'f,
{
    fn into_rules(self) -> Rules<'f, E> {
        Rules::from(Rule::new(self))
    }
}

impl<'f, E, T, F> IntoRules<'f, E, EffectfulFn<T>> for F
where
    T: Term,
    F: FnMut(T) -> Result<T, E> + 'f,
{
    fn into_rules(self) -> Rules<'f, E> {
        Rules::from(Rule::effectful(self))
    }
}

macro_rules! tuple_into_rules {
    ($($ty:ident $marker:ident $var:ident),+) => {
        impl<'f, E, $($ty, $marker),+> IntoRules<'f, E, ($($marker,)+)> for ($($ty,)+)
        where
            $($ty: IntoRules<'f, E, $marker>),+
        {
            fn into_rules(self) -> Rules<'f, E> {
                let ($($var,)+) = self;
                let mut rules = Rules::new();
                $(rules.rules.extend($var.into_rules().rules);)+
                rules
            }
        }
    };
}

tuple_into_rules!(A MA a);
tuple_into_rules!(A MA a, B MB b);
tuple_into_rules!(A MA a, B MB b, C MC c);
tuple_into_rules!(A MA a, B MB b, C MC c, D MD d);
tuple_into_rules!(A MA a, B MB b, C MC c, D MD d, G MG g);
tuple_into_rules!(A MA a, B MB b, C MC c, D MD d, G MG g, H MH h);
tuple_into_rules!(A MA a, B MB b, C MC c, D MD d, G MG g, H MH h, I MI i);
tuple_into_rules!(A MA a, B MB b, C MC c, D MD d, G MG g, H MH h, I MI i, J MJ j);
