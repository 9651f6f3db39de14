//! End-to-end rewriting over derived types.

mod common;

use std::cell::RefCell;

use common::*;
use descend::{
    Error, Mapper, Rule, Rules, Term, TermType, Visitor, rewrite, rewrite_effectful,
    rewrite_effectful_unchecked, rewrite_unchecked,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Pure rewriting
// ============================================================================

#[test]
fn test_constant_folding_reaches_the_root() {
    // (1 + 2) + -(3) folds completely because children are folded first.
    let expr = add(add(lit(1), lit(2)), neg(lit(3)));
    assert_eq!(rewrite(fold_constants, expr), Ok(lit(0)));
}

#[test]
fn test_folding_stops_at_variables() {
    let expr = add(var("x"), add(lit(2), lit(3)));
    assert_eq!(rewrite(fold_constants, expr), Ok(add(var("x"), lit(5))));
}

#[test]
fn test_string_rule_renames_every_occurrence() {
    let rename = |name: String| if name == "x" { "y".to_string() } else { name };
    let expr = let_("x", lit(1), add(var("x"), var("z")));
    assert_eq!(
        rewrite(rename, expr),
        Ok(let_("y", lit(1), add(var("y"), var("z"))))
    );
}

#[test]
fn test_rules_on_different_types_compose() {
    let expr = let_("x", lit(1), add(var("x"), lit(2)));
    let rules = (|n: i64| n * 10, fold_constants);
    assert_eq!(
        rewrite(rules, expr),
        Ok(let_("x", lit(10), add(var("x"), lit(20))))
    );
}

#[test]
fn test_chained_rules_see_each_others_output() {
    // The second rule sees literals already incremented by the first.
    let rules = Rules::new()
        .then(|n: i64| n + 1)
        .then(|e: Expr| match e {
            Expr::Lit(1) => var("one"),
            other => other,
        });
    assert_eq!(rewrite(rules, add(lit(0), lit(1))), Ok(add(var("one"), lit(2))));
}

// ============================================================================
// Presence check
// ============================================================================

#[test]
fn test_unreachable_target_is_a_type_mismatch() {
    let err = rewrite(|x: f64| x, lit(1)).unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            root: TermType::of::<Expr>(),
            missing: vec![TermType::of::<f64>()],
        }
    );
    assert!(err.to_string().contains("f64"));
}

#[test]
fn test_unchecked_skips_unreachable_target() {
    let expr = add(lit(1), lit(2));
    assert_eq!(rewrite_unchecked(|x: f64| x + 1.0, expr.clone()), expr);
}

#[test]
fn test_reachable_type_absent_from_value() {
    // No `Let` here, so no `String` occurs, but one could.
    let expr = add(lit(1), lit(2));
    let shout = |s: String| s.to_uppercase();
    assert_eq!(rewrite(shout, expr.clone()), Ok(expr));
}

/// Keeps the position of a node, which is not part of the tree.
#[derive(Clone, Debug, PartialEq)]
struct Span {
    start: usize,
    end: usize,
}

#[derive(Clone, Debug, PartialEq, Term)]
struct Spanned {
    expr: Expr,
    #[term(skip)]
    span: Span,
}

#[test]
fn test_skipped_field_is_carried_through() {
    let spanned = Spanned {
        expr: add(lit(1), lit(2)),
        span: Span { start: 0, end: 5 },
    };
    let folded = rewrite(fold_constants, spanned).unwrap();
    assert_eq!(folded.expr, lit(3));
    assert_eq!(folded.span, Span { start: 0, end: 5 });
}

#[test]
fn test_skipped_field_type_is_not_reachable() {
    let spanned = Spanned {
        expr: lit(1),
        span: Span { start: 0, end: 1 },
    };
    let err = rewrite(|n: usize| n + 1, spanned).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

/// Exposes no shape, so nothing below it can be enumerated.
#[derive(Clone, Debug, PartialEq)]
struct Handle(u32);

impl Term for Handle {
    fn map_children<M: Mapper>(self, _mapper: &mut M) -> Result<Self, M::Error> {
        Ok(self)
    }

    fn visit_children<V: Visitor>(&self, _visitor: &mut V) -> Result<(), V::Error> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Term)]
struct Resource {
    handle: Handle,
    uses: i64,
}

#[test]
fn test_opaque_child_fails_construction() {
    let resource = Resource {
        handle: Handle(7),
        uses: 1,
    };
    assert_eq!(
        rewrite(|n: i64| n + 1, resource.clone()),
        Err(Error::ConstructionFailure {
            ty: TermType::of::<Handle>()
        })
    );

    // Without the check the traversal itself still works.
    let bumped = rewrite_unchecked(|n: i64| n + 1, resource);
    assert_eq!(bumped.uses, 2);
    assert_eq!(bumped.handle, Handle(7));
}

// ============================================================================
// Generic types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Term)]
struct Pair<A, B> {
    left: A,
    right: B,
}

#[derive(Clone, Debug, PartialEq, Term)]
enum Either<L, R> {
    Left(L),
    Right(R),
}

#[test]
fn test_generic_struct() {
    let pair = Pair {
        left: 1i64,
        right: "a".to_string(),
    };
    let rules = (|n: i64| n + 1, |s: String| s.repeat(2));
    assert_eq!(
        rewrite(rules, pair),
        Ok(Pair {
            left: 2,
            right: "aa".to_string(),
        })
    );
}

#[test]
fn test_generic_enum_reaches_both_parameters() {
    let values: Vec<Either<i64, bool>> = vec![Either::Left(1), Either::Right(true)];
    let rules = (|n: i64| -n, |b: bool| !b);
    assert_eq!(
        rewrite(rules, values),
        Ok(vec![Either::Left(-1), Either::Right(false)])
    );
}

// ============================================================================
// Effectful rewriting
// ============================================================================

#[derive(Debug, PartialEq)]
enum EvalError {
    Unbound(String),
    Check(Error),
}

impl From<Error> for EvalError {
    fn from(err: Error) -> Self {
        EvalError::Check(err)
    }
}

#[test]
fn test_effects_run_bottom_up_left_to_right() {
    let log = RefCell::new(Vec::new());
    let rules = |e: Expr| -> Result<Expr, EvalError> {
        log.borrow_mut().push(kind(&e));
        Ok(e)
    };

    let expr = add(neg(lit(1)), let_("x", lit(2), var("x")));
    assert_eq!(rewrite_effectful(rules, expr.clone()), Ok(expr));
    assert_eq!(
        log.into_inner(),
        ["Lit", "Neg", "Lit", "Var", "Let", "Add"]
    );
}

#[test]
fn test_effects_within_a_node_follow_chain_order() {
    let log = RefCell::new(Vec::new());
    let rules = (
        Rule::observe(|e: &Expr| log.borrow_mut().push(format!("first {}", kind(e)))),
        Rule::observe(|e: &Expr| log.borrow_mut().push(format!("second {}", kind(e)))),
    );
    rewrite(rules, neg(lit(1))).unwrap();
    assert_eq!(
        log.into_inner(),
        ["first Lit", "second Lit", "first Neg", "second Neg"]
    );
}

#[test]
fn test_first_error_aborts() {
    let seen = RefCell::new(Vec::new());
    let resolve = |e: Expr| {
        seen.borrow_mut().push(kind(&e));
        match e {
            Expr::Var(name) => Err(EvalError::Unbound(name)),
            other => Ok(other),
        }
    };

    let expr = add(lit(1), add(var("y"), lit(2)));
    assert_eq!(
        rewrite_effectful(resolve, expr),
        Err(EvalError::Unbound("y".to_string()))
    );
    // Nothing after the failing `Var` runs.
    assert_eq!(seen.into_inner(), ["Lit", "Var"]);
}

#[test]
fn test_stateful_rule_numbers_literals() {
    let mut next = 0;
    let number = |_: i64| -> Result<i64, EvalError> {
        next += 1;
        Ok(next)
    };
    let expr = add(lit(9), neg(lit(9)));
    assert_eq!(rewrite_effectful(number, expr), Ok(add(lit(1), neg(lit(2)))));
}

#[test]
fn test_effectful_presence_failure_converts() {
    let rules = |b: bool| Ok::<_, EvalError>(b);
    assert!(matches!(
        rewrite_effectful(rules, lit(1)),
        Err(EvalError::Check(Error::TypeMismatch { .. }))
    ));
    assert_eq!(rewrite_effectful_unchecked(rules, lit(1)), Ok(lit(1)));
}
