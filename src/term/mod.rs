//! Structural access to terms.
//!
//! A *term* is any value the engine can take apart into its immediate
//! children and put back together. This module provides:
//!
//! - [`Term`]: the capability every participating type implements
//! - [`Mapper`] and [`Visitor`]: the callbacks a term hands its children to
//! - [`TermType`]: the runtime identity of a term type
//! - [`Shape`]: a static description of a type's constructors, used by the
//!   presence checker to discover which types can occur below it
//!
//! Implementations for scalars, `String`, `Box`, `Option`, `Result`, `Vec`,
//! `VecDeque` and tuples up to arity 8 are provided. User types normally get
//! theirs from `#[derive(Term)]`.

mod impls;
mod shape;

pub use shape::{Field, Shape, Variant};

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// A value that can be decomposed into its immediate children and rebuilt.
///
/// Children are handed out left to right. `map_children` consumes the term and
/// rebuilds it from whatever the mapper returns for each child;
/// `visit_children` only looks.
///
/// `shape` describes every constructor of the type without needing a value.
/// The default is [`Shape::Opaque`], which makes the type usable for
/// traversal but rejected by the presence checker.
pub trait Term: Any + Sized {
    /// Rebuild `self` after passing each immediate child through `mapper`.
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error>;

    /// Pass each immediate child to `visitor`, in the same order as
    /// [`Term::map_children`].
    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error>;

    /// Describe the constructors of this type.
    fn shape() -> Shape {
        Shape::Opaque
    }

    fn term_type(&self) -> TermType {
        TermType::of::<Self>()
    }
}

/// Receives the owned children of a term, one at a time.
///
/// The method is generic over the child type, so a single mapper can handle
/// every type appearing in a structure.
pub trait Mapper {
    type Error;

    fn map<T: Term>(&mut self, term: T) -> Result<T, Self::Error>;
}

/// Receives borrowed children of a term, one at a time.
pub trait Visitor {
    type Error;

    fn visit<T: Term>(&mut self, term: &T) -> Result<(), Self::Error>;
}

/// Runtime identity of a [`Term`] type.
///
/// Equality and hashing only look at the underlying [`TypeId`]; the name is
/// carried for diagnostics and the shape function for the presence checker.
#[derive(Clone, Copy)]
pub struct TermType {
    id: TypeId,
    name: &'static str,
    shape: fn() -> Shape,
}

impl TermType {
    pub fn of<T: Term>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
            shape: T::shape,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Computes the shape of the type. Never inspects a value.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    pub fn is<T: Term>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TermType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TermType {}

impl Hash for TermType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermType({})", self.name)
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
