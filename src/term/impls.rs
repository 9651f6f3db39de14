//! `Term` implementations for standard library types.

use alloc::{
    boxed::Box,
    collections::VecDeque,
    string::String,
    vec::Vec,
};

use super::{Mapper, Shape, Term, Variant, Visitor};

macro_rules! leaf_terms {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Term for $ty {
                #[inline]
                fn map_children<M: Mapper>(self, _mapper: &mut M) -> Result<Self, M::Error> {
                    Ok(self)
                }

                #[inline]
                fn visit_children<V: Visitor>(&self, _visitor: &mut V) -> Result<(), V::Error> {
                    Ok(())
                }

                fn shape() -> Shape {
                    Shape::Leaf
                }
            }
        )*
    };
}

leaf_terms!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Term> Term for Box<T> {
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
        mapper.map(*self).map(Box::new)
    }

    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit(&**self)
    }

    fn shape() -> Shape {
        Shape::variants([Variant::new("Box").field::<T>()])
    }
}

impl<T: Term> Term for Option<T> {
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
        match self {
            Some(inner) => mapper.map(inner).map(Some),
            None => Ok(None),
        }
    }

    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Some(inner) => visitor.visit(inner),
            None => Ok(()),
        }
    }

    fn shape() -> Shape {
        Shape::variants([Variant::new("None"), Variant::new("Some").field::<T>()])
    }
}

impl<T: Term, E: Term> Term for Result<T, E> {
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
        Ok(match self {
            Ok(ok) => Ok(mapper.map(ok)?),
            Err(err) => Err(mapper.map(err)?),
        })
    }

    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Ok(ok) => visitor.visit(ok),
            Err(err) => visitor.visit(err),
        }
    }

    fn shape() -> Shape {
        Shape::variants([
            Variant::new("Ok").field::<T>(),
            Variant::new("Err").field::<E>(),
        ])
    }
}

// Sequences expose their elements as children; the element type is the only
// child type, however many elements there are.
impl<T: Term> Term for Vec<T> {
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
        self.into_iter().map(|elem| mapper.map(elem)).collect()
    }

    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        self.iter().try_for_each(|elem| visitor.visit(elem))
    }

    fn shape() -> Shape {
        Shape::variants([Variant::new("Vec").field::<T>()])
    }
}

impl<T: Term> Term for VecDeque<T> {
    fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
        self.into_iter().map(|elem| mapper.map(elem)).collect()
    }

    fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        self.iter().try_for_each(|elem| visitor.visit(elem))
    }

    fn shape() -> Shape {
        Shape::variants([Variant::new("VecDeque").field::<T>()])
    }
}

macro_rules! tuple_terms {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Term),+> Term for ($($ty,)+) {
            fn map_children<M: Mapper>(self, mapper: &mut M) -> Result<Self, M::Error> {
                let ($($var,)+) = self;
                Ok(($(mapper.map($var)?,)+))
            }

            fn visit_children<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
                let ($($var,)+) = self;
                $(visitor.visit($var)?;)+
                Ok(())
            }

            fn shape() -> Shape {
                Shape::variants([Variant::new("Tuple")$(.field::<$ty>())+])
            }
        }
    };
}

tuple_terms!(A a);
tuple_terms!(A a, B b);
tuple_terms!(A a, B b, C c);
tuple_terms!(A a, B b, C c, D d);
tuple_terms!(A a, B b, C c, D d, E e);
tuple_terms!(A a, B b, C c, D d, E e, F f);
tuple_terms!(A a, B b, C c, D d, E e, F f, G g);
tuple_terms!(A a, B b, C c, D d, E e, F f, G g, H h);
