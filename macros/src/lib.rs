//! Procedural macros for `descend`.
//!
//! - `#[derive(Term)]` - Describe a struct or enum to the rewriting engine

extern crate proc_macro;

use proc_macro::TokenStream;

mod common;
mod derive_term;

/// Derive [`Term`] for a struct or enum.
///
/// The generated impl exposes every field as a child, in declaration order,
/// and describes each constructor in `shape()` so that checked rewrites can
/// see which types may occur below this one.
///
/// [`Term`]: https://docs.rs/descend/latest/descend/trait.Term.html
///
/// # Example
///
/// ```ignore
/// use descend::Term;
///
/// #[derive(Term)]
/// enum Expr {
///     Lit(i64),
///     Var(String),
///     Add(Box<Expr>, Box<Expr>),
/// }
/// ```
///
/// # Skipping Fields
///
/// A field marked `#[term(skip)]` is never visited or rewritten and does not
/// need to implement `Term`. Its type is also left out of the shape, so rules
/// targeting it are only reachable through other paths.
///
/// ```ignore
/// #[derive(Term)]
/// struct Spanned {
///     expr: Expr,
///     #[term(skip)]
///     span: core::ops::Range<usize>,
/// }
/// ```
///
/// # Generics
///
/// Every type parameter gets a `Term` bound. Terms are `'static`, so lifetime
/// parameters are rejected, as are unions.
///
/// The generated code refers to the `descend` crate by absolute path, so it
/// must be a direct dependency under that name.
#[proc_macro_derive(Term, attributes(term))]
pub fn derive_term(input: TokenStream) -> TokenStream {
    derive_term::derive_term_impl(input)
}
