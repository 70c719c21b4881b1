//! Statement parse-tree nodes

use crate::common::Span;

use super::{Expr, TypeExpr};

/// A name occurrence with its source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A function parameter: name plus a mandatory type annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeExpr,
    pub span: Span,
}

/// One `else if` link in an if-statement chain
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// An unresolved statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration; the type annotation is optional, the
    /// initializer is not
    VarDecl {
        name: Ident,
        declared_type: Option<TypeExpr>,
        init: Expr,
    },
    /// Assignment to an already-declared name
    Assign { target: Ident, value: Expr },
    /// Function declaration; a missing return annotation means `void`
    FnDecl {
        name: Ident,
        params: Vec<Param>,
        return_type: Option<TypeExpr>,
        body: Vec<Stmt>,
    },
    /// If statement with optional else-if chain and optional final else
    If {
        test: Expr,
        consequent: Vec<Stmt>,
        else_ifs: Vec<ElseIf>,
        alternate: Option<Vec<Stmt>>,
    },
    /// While loop
    While { test: Expr, body: Vec<Stmt> },
    Break,
    Return(Option<Expr>),
    /// Print statement
    Print(Expr),
    /// Bare expression statement (e.g. a call for its effects)
    Expr(Expr),
}
