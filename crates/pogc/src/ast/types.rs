//! Type annotation parse-tree nodes
//!
//! Annotations are unresolved at parse time: a `Named` annotation may turn
//! out not to denote a type at all (e.g. a variable name in type position),
//! which the analyzer rejects with `TypeExpected`.

use crate::common::Span;

/// An unresolved type annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self::new(TypeExprKind::Named(name.into()), span)
    }

    pub fn array(element: TypeExpr, span: Span) -> Self {
        Self::new(TypeExprKind::Array(Box::new(element)), span)
    }
}

/// Type annotation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExprKind {
    /// A name in type position: `int`, `boolean`, ... or a misuse like `x`
    Named(String),
    /// Array annotation: `[int]`, `[[boolean]]`
    Array(Box<TypeExpr>),
}
