use alloc::vec::Vec;

use smallvec::SmallVec;

use super::{Term, TermType};

/// Static description of a term type's constructors.
///
/// Only the *types* of children matter here. The presence checker walks
/// shapes to find every type that could occur below a root type, whatever a
/// particular value happens to contain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Atomic type without children (numbers, strings, ...).
    Leaf,

    /// One entry per constructor. An empty list means the type is uninhabited.
    Variants(Vec<Variant>),

    /// The type does not describe its constructors, so the types below it
    /// cannot be enumerated.
    Opaque,
}

impl Shape {
    pub fn variants(variants: impl IntoIterator<Item = Variant>) -> Self {
        Shape::Variants(variants.into_iter().collect())
    }

    /// The constructors of a [`Shape::Variants`], empty otherwise.
    pub fn constructors(&self) -> &[Variant] {
        match self {
            Shape::Variants(variants) => variants,
            Shape::Leaf | Shape::Opaque => &[],
        }
    }

    /// Types of all children across all constructors, in declaration order.
    /// Duplicates are kept.
    pub fn child_types(&self) -> impl Iterator<Item = TermType> + '_ {
        self.constructors()
            .iter()
            .flat_map(|variant| variant.fields.iter().map(|field| field.ty))
    }
}

/// One constructor of a term type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    name: &'static str,
    fields: SmallVec<[Field; 4]>,
}

impl Variant {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: SmallVec::new(),
        }
    }

    /// Append a positional child of type `T`.
    pub fn field<T: Term>(mut self) -> Self {
        self.fields.push(Field {
            name: None,
            ty: TermType::of::<T>(),
        });
        self
    }

    /// Append a named child of type `T`.
    pub fn named<T: Term>(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name: Some(name),
            ty: TermType::of::<T>(),
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A traversed child slot of a [`Variant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    name: Option<&'static str>,
    ty: TermType,
}

impl Field {
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn ty(&self) -> TermType {
        self.ty
    }
}
