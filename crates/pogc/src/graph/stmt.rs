//! Typed statement graph nodes

use std::rc::Rc;

use super::{Expr, Function, Reference, Variable};

/// A resolved, typed statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Variable declaration: the entity plus its analyzed initializer
    VarDecl { variable: Rc<Variable>, init: Expr },
    /// Assignment to a resolved declaration
    Assign { target: Reference, source: Expr },
    /// Function declaration; the body belongs to the declaration node, the
    /// entity itself stays immutable
    FnDecl {
        function: Rc<Function>,
        body: Vec<Stmt>,
    },
    If {
        test: Expr,
        consequent: Vec<Stmt>,
        alternate: IfAlternate,
    },
    While { test: Expr, body: Vec<Stmt> },
    Break,
    Return(Option<Expr>),
    Print(Expr),
    /// Bare expression evaluated for its effects
    Expr(Expr),
}

/// The alternate position of an `If`
///
/// An else-if chain is rewritten as a nested `If` statement here, so a
/// consumer only ever sees two-way branches.
#[derive(Debug, Clone, PartialEq)]
pub enum IfAlternate {
    None,
    Block(Vec<Stmt>),
    ElseIf(Box<Stmt>),
}
