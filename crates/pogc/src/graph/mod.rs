//! The resolved, typed program graph
//!
//! This is the output artifact of analysis. Every identifier reference holds
//! a shared handle to the `Variable` or `Function` entity created by its
//! declaration, never a bare name; every expression carries the type fixed
//! at construction. Nodes are pure values, immutable once built.

mod expr;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use stmt::{IfAlternate, Stmt};

use std::rc::Rc;

use crate::types::Type;

/// A declared variable or parameter
///
/// Identity, not name, is what references carry: two variables with the same
/// name in different scopes are distinct entities, and every reference within
/// a declaration's scope shares the one `Rc` created when the declaration was
/// analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Set for literal bindings such as the boolean constants
    pub read_only: bool,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: impl Into<String>, read_only: bool, ty: Type) -> Self {
        Self {
            name: name.into(),
            read_only,
            ty,
        }
    }
}

/// A declared or built-in function
///
/// The body lives on the `Stmt::FnDecl` node rather than here, so the entity
/// can be declared in the outer scope (and referenced recursively) before its
/// body has been analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Rc<Variable>>,
    pub return_type: Type,
}

impl Function {
    pub fn new(name: impl Into<String>, params: Vec<Rc<Variable>>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }

    /// The function's immutable `FunctionType`, derived from parameter types
    /// and return type
    pub fn ty(&self) -> Type {
        Type::function(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.return_type.clone(),
        )
    }
}

/// A resolved reference to a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Variable(Rc<Variable>),
    Function(Rc<Function>),
}

impl Reference {
    pub fn name(&self) -> &str {
        match self {
            Reference::Variable(v) => &v.name,
            Reference::Function(f) => &f.name,
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Reference::Variable(v) => v.ty.clone(),
            Reference::Function(f) => f.ty(),
        }
    }
}

/// The fully analyzed program: the ordered top-level graph statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_function_type_derivation() {
        let x = Rc::new(Variable::new("x", false, Type::Boolean));
        let f = Function::new("f", vec![x], Type::Int);
        assert_eq!(f.ty(), Type::function(vec![Type::Boolean], Type::Int));
        assert_eq!(f.ty().to_string(), "(boolean)->int");
    }

    #[test]
    fn test_reference_identity_is_sharing() {
        let v = Rc::new(Variable::new("x", false, Type::Int));
        let a = Reference::Variable(Rc::clone(&v));
        let b = Reference::Variable(Rc::clone(&v));
        let (Reference::Variable(ra), Reference::Variable(rb)) = (&a, &b) else {
            unreachable!()
        };
        assert!(Rc::ptr_eq(ra, rb));
        assert_eq!(a.ty(), Type::Int);
    }
}
