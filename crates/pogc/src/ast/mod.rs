//! Untyped parse-tree node definitions
//!
//! This is the input contract of the analyzer: a syntactically well-formed,
//! position-annotated tree produced by the external grammar stage. Nothing in
//! here carries a resolved type; identifiers are bare names.

mod expr;
mod stmt;
mod types;

pub use expr::{BinOp, Expr, ExprKind, UnaryOp};
pub use stmt::{ElseIf, Ident, Param, Stmt, StmtKind};
pub use types::{TypeExpr, TypeExprKind};

/// A whole source program: the ordered top-level statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
