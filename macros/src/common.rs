//! Shared utilities for the `descend` derive.

use syn::{Attribute, Generics, GenericParam, parse_quote};

/// Options from `#[term(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldOptions {
    /// Leave the field out of traversal and out of the shape.
    pub skip: bool,
}

/// Parse every `#[term(...)]` attribute of a field.
///
/// # Returns
/// - `Ok(options)` with defaults when no `term` attribute is present.
/// - `Err(...)` on unknown keys or malformed syntax.
pub(crate) fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("term")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("[descend] unknown `term` option, expected `skip`"))
            }
        })?;
    }
    Ok(options)
}

/// `#[term(...)]` is only meaningful on fields.
pub(crate) fn reject_term_attrs(attrs: &[Attribute]) -> syn::Result<()> {
    match attrs.iter().find(|a| a.path().is_ident("term")) {
        Some(attr) => Err(syn::Error::new_spanned(
            attr,
            "[descend] `#[term(...)]` is only supported on fields",
        )),
        None => Ok(()),
    }
}

/// Add a `Term` bound to every type parameter.
///
/// Terms are `'static`, so lifetime parameters are rejected.
pub(crate) fn add_term_bounds(mut generics: Generics) -> syn::Result<Generics> {
    for param in &mut generics.params {
        match param {
            GenericParam::Lifetime(lifetime) => {
                return Err(syn::Error::new_spanned(
                    lifetime,
                    "[descend] terms must be 'static, lifetime parameters are not supported",
                ));
            }
            GenericParam::Type(type_param) => {
                type_param.bounds.push(parse_quote!(::descend::Term));
            }
            GenericParam::Const(_) => {}
        }
    }
    Ok(generics)
}
