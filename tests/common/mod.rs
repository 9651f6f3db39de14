//! A small expression language shared by the integration tests.

#![allow(dead_code)]

use descend::Term;

#[derive(Clone, Debug, PartialEq, Term)]
pub enum Expr {
    Lit(i64),
    Var(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
    },
}

pub fn lit(n: i64) -> Expr {
    Expr::Lit(n)
}

pub fn var(name: &str) -> Expr {
    Expr::Var(name.to_string())
}

pub fn neg(inner: Expr) -> Expr {
    Expr::Neg(Box::new(inner))
}

pub fn add(left: Expr, right: Expr) -> Expr {
    Expr::Add(Box::new(left), Box::new(right))
}

pub fn let_(name: &str, value: Expr, body: Expr) -> Expr {
    Expr::Let {
        name: name.to_string(),
        value: Box::new(value),
        body: Box::new(body),
    }
}

/// Folds `Neg` and `Add` over literals. Only looks one level down, so it
/// relies on children being folded first.
pub fn fold_constants(expr: Expr) -> Expr {
    match expr {
        Expr::Neg(inner) => match *inner {
            Expr::Lit(n) => Expr::Lit(-n),
            other => neg(other),
        },
        Expr::Add(left, right) => match (*left, *right) {
            (Expr::Lit(a), Expr::Lit(b)) => Expr::Lit(a + b),
            (left, right) => add(left, right),
        },
        other => other,
    }
}

/// Constructor name of the node, for logs.
pub fn kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Lit(_) => "Lit",
        Expr::Var(_) => "Var",
        Expr::Neg(_) => "Neg",
        Expr::Add(..) => "Add",
        Expr::Let { .. } => "Let",
    }
}
