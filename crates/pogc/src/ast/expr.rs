//! Expression parse-tree nodes

use crate::common::Span;

use super::Ident;

/// An unresolved expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds
///
/// There is no boolean literal: `true` and `false` reach the analyzer as
/// identifiers and resolve against read-only variables in the standard
/// context.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal: 42
    Int(i64),
    /// Float literal: 3.14, 1.3E5
    Float(f64),
    /// String literal: "hello"
    Str(String),
    /// Character literal: 'a'
    Char(char),
    /// Identifier: x, f, true
    Identifier(String),
    /// Binary operation: a + b
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation: -x, !x
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Conditional: test ? consequent : alternate
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// Array literal: [1, 2, 3]
    Array(Vec<Expr>),
    /// Subscript: a[i]
    Subscript { array: Box<Expr>, index: Box<Expr> },
    /// Call: f(x, y)
    Call { callee: Ident, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation: -x
    Neg,
    /// Logical not: !x
    Not,
}
