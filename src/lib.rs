//! descend - bottom-up generic rewriting over heterogeneous data
//!
//! # Overview
//!
//! Given a nested value built from many types and a chain of rules, each
//! targeting one type, `descend` rewrites every sub-value whose type matches a
//! rule and returns the new whole. It can also collect every sub-value of a
//! given type.
//!
//! Types take part by implementing [`Term`], usually through
//! `#[derive(Term)]`. The trait exposes the immediate children of a value and
//! a static description of the type's constructors.
//!
//! # Quick Start
//!
//! ```
//! use descend::{Term, collect_all, rewrite};
//!
//! #[derive(Clone, Debug, PartialEq, Term)]
//! enum Expr {
//!     Lit(i64),
//!     Neg(Box<Expr>),
//!     Add(Box<Expr>, Box<Expr>),
//! }
//!
//! // Fold `Neg(Lit(n))` into `Lit(-n)` everywhere.
//! let fold = |e: Expr| match e {
//!     Expr::Neg(inner) => match *inner {
//!         Expr::Lit(n) => Expr::Lit(-n),
//!         other => Expr::Neg(Box::new(other)),
//!     },
//!     other => other,
//! };
//!
//! let expr = Expr::Add(
//!     Box::new(Expr::Neg(Box::new(Expr::Lit(1)))),
//!     Box::new(Expr::Lit(2)),
//! );
//! let folded = rewrite(fold, expr).unwrap();
//! assert_eq!(
//!     folded,
//!     Expr::Add(Box::new(Expr::Lit(-1)), Box::new(Expr::Lit(2)))
//! );
//! assert_eq!(collect_all::<i64, _>(&folded), [-1, 2]);
//! ```
//!
//! # Checked and Unchecked Entry Points
//!
//! [`rewrite`] and [`rewrite_effectful`] first verify that every rule's target
//! type can occur somewhere below the input's type, and fail with
//! [`Error::TypeMismatch`] otherwise. [`rewrite_unchecked`] and
//! [`rewrite_effectful_unchecked`] skip the check. Collectors are always
//! unchecked: looking for a type that cannot occur finds nothing.
//!
//! # Features
//!
//! - `derive` (default): re-export `#[derive(Term)]` from `descend-macros`
//! - `std`: `Accumulator` for `std::collections::HashSet`

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![deny(unsafe_code)]

// Lets generated code refer to `::descend` from within this crate too.
extern crate self as descend;

extern crate alloc;

pub mod collect;
pub mod error;
pub mod presence;
pub mod rewrite;
pub mod rule;
pub mod term;

pub use collect::{Accumulator, collect_all, collect_all_by, collect_all_map, collect_all_with};
pub use error::Error;
pub use presence::{TypeSet, check, reachable_types, reachable_types_of};
pub use rewrite::{rewrite, rewrite_effectful, rewrite_effectful_unchecked, rewrite_unchecked};
pub use rule::{IntoRules, Rule, Rules};
pub use term::{Field, Mapper, Shape, Term, TermType, Variant, Visitor};

#[cfg(feature = "derive")]
pub use descend_macros::Term;
