//! Implementation of `#[derive(Term)]`.
//!
//! Generates `map_children`, `visit_children` and `shape` for structs and
//! enums. Fields are traversed in declaration order; `#[term(skip)]` fields are
//! moved through untouched and left out of the shape.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type, parse_macro_input};

use crate::common::{add_term_bounds, parse_field_options, reject_term_attrs};

pub fn derive_term_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

enum Style {
    Named,
    Unnamed,
    Unit,
}

struct ParsedField {
    /// `None` for positional fields
    ident: Option<Ident>,
    ty: Type,
    skip: bool,
    binding: Ident,
}

/// The struct itself, or one enum variant.
struct Constructor {
    /// `Self` or `Self::Variant`
    path: TokenStream2,
    name: String,
    style: Style,
    fields: Vec<ParsedField>,
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let DeriveInput {
        attrs,
        ident,
        generics,
        data,
        ..
    } = input;

    reject_term_attrs(&attrs)?;
    let generics = add_term_bounds(generics)?;

    let constructors = match data {
        Data::Struct(data) => vec![parse_constructor(quote!(Self), &ident, data.fields)?],
        Data::Enum(data) => data
            .variants
            .into_iter()
            .map(|variant| {
                reject_term_attrs(&variant.attrs)?;
                let name = variant.ident;
                parse_constructor(quote!(Self::#name), &name, variant.fields)
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "[descend] unions cannot derive `Term`",
            ));
        }
    };

    let map_body = if constructors.is_empty() {
        quote!(match self {})
    } else {
        let arms = constructors.iter().map(map_arm);
        quote!(match self { #(#arms)* })
    };

    let visit_body = if constructors.is_empty() {
        quote!(match *self {})
    } else {
        let arms = constructors.iter().map(visit_arm);
        quote!(match self { #(#arms)* })
    };

    let shape_body = if constructors.is_empty() {
        quote!(::descend::Shape::variants(::core::iter::empty::<::descend::Variant>()))
    } else {
        let variants = constructors.iter().map(variant_expr);
        quote!(::descend::Shape::variants([#(#variants),*]))
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::descend::Term for #ident #ty_generics #where_clause {
            fn map_children<__M: ::descend::Mapper>(
                self,
                __mapper: &mut __M,
            ) -> ::core::result::Result<Self, <__M as ::descend::Mapper>::Error> {
                #map_body
            }

            fn visit_children<__V: ::descend::Visitor>(
                &self,
                __visitor: &mut __V,
            ) -> ::core::result::Result<(), <__V as ::descend::Visitor>::Error> {
                #visit_body
            }

            fn shape() -> ::descend::Shape {
                #shape_body
            }
        }
    })
}

fn parse_constructor(path: TokenStream2, ident: &Ident, fields: Fields) -> syn::Result<Constructor> {
    let style = match &fields {
        Fields::Named(_) => Style::Named,
        Fields::Unnamed(_) => Style::Unnamed,
        Fields::Unit => Style::Unit,
    };
    let fields = fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| {
            let options = parse_field_options(&field.attrs)?;
            Ok(ParsedField {
                ident: field.ident,
                ty: field.ty,
                skip: options.skip,
                binding: format_ident!("__field{}", index),
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(Constructor {
        path,
        name: ident.unraw().to_string(),
        style,
        fields,
    })
}

/// `Self::V { a: __field0, b: __field1 } => Ok(Self::V { a: map(__field0)?, b: __field1 }),`
fn map_arm(constructor: &Constructor) -> TokenStream2 {
    let pattern = constructor.assemble(constructor.fields.iter().map(|field| {
        let binding = &field.binding;
        quote!(#binding)
    }));
    let rebuilt = constructor.assemble(constructor.fields.iter().map(|field| {
        let binding = &field.binding;
        if field.skip {
            quote!(#binding)
        } else {
            quote!(::descend::Mapper::map(__mapper, #binding)?)
        }
    }));
    quote!(#pattern => ::core::result::Result::Ok(#rebuilt),)
}

/// Binds only the traversed fields, then visits them in order.
fn visit_arm(constructor: &Constructor) -> TokenStream2 {
    let path = &constructor.path;
    let traversed = constructor.fields.iter().filter(|field| !field.skip);

    let pattern = match constructor.style {
        Style::Named => {
            let bound = traversed.clone().map(|field| {
                let ident = &field.ident;
                let binding = &field.binding;
                quote!(#ident: #binding)
            });
            quote!(#path { #(#bound,)* .. })
        }
        Style::Unnamed => {
            let slots = constructor.fields.iter().map(|field| {
                if field.skip {
                    quote!(_)
                } else {
                    let binding = &field.binding;
                    quote!(#binding)
                }
            });
            quote!(#path(#(#slots),*))
        }
        Style::Unit => quote!(#path),
    };

    let visits = traversed.map(|field| {
        let binding = &field.binding;
        quote!(::descend::Visitor::visit(__visitor, #binding)?;)
    });

    quote! {
        #pattern => {
            #(#visits)*
            ::core::result::Result::Ok(())
        }
    }
}

/// `::descend::Variant::new("V").named::<A>("a").field::<B>()`
fn variant_expr(constructor: &Constructor) -> TokenStream2 {
    let name = &constructor.name;
    let fields = constructor
        .fields
        .iter()
        .filter(|field| !field.skip)
        .map(|field| {
            let ty = &field.ty;
            match &field.ident {
                Some(ident) => {
                    let field_name = ident.unraw().to_string();
                    quote!(.named::<#ty>(#field_name))
                }
                None => quote!(.field::<#ty>()),
            }
        });
    quote!(::descend::Variant::new(#name) #(#fields)*)
}

impl Constructor {
    /// Lay out one token stream per field in this constructor's syntax, as a
    /// pattern or an expression.
    fn assemble(&self, parts: impl Iterator<Item = TokenStream2>) -> TokenStream2 {
        let path = &self.path;
        match self.style {
            Style::Named => {
                let idents = self.fields.iter().map(|field| &field.ident);
                quote!(#path { #(#idents: #parts),* })
            }
            Style::Unnamed => quote!(#path(#(#parts),*)),
            Style::Unit => quote!(#path),
        }
    }
}
