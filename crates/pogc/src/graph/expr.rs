//! Typed expression graph nodes

use crate::ast::{BinOp, UnaryOp};
use crate::types::Type;

use super::Reference;

/// A resolved, typed expression
///
/// The type is fully determined when the node is constructed and is never
/// recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty }
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value), Type::Int)
    }

    pub fn float(value: f64) -> Self {
        Self::new(ExprKind::Float(value), Type::Float)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(value.into()), Type::String)
    }

    pub fn char(value: char) -> Self {
        Self::new(ExprKind::Char(value), Type::Char)
    }

    pub fn reference(reference: Reference) -> Self {
        let ty = reference.ty();
        Self::new(ExprKind::Ref(reference), ty)
    }
}

/// Typed expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(String),
    Char(char),
    /// Identifier reference, resolved to the declaration entity
    Ref(Reference),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Array(Vec<Expr>),
    Subscript {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Reference,
        args: Vec<Expr>,
    },
}
