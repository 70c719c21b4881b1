//! Lexical context chain for name resolution
//!
//! Contexts exist only during the traversal; they are torn down in call-stack
//! order as each lexical construct finishes and are never part of the output
//! graph. Besides the name map, a context tracks the innermost enclosing
//! function and whether a loop encloses the current point, which together
//! decide `return` and `break` legality.

use std::collections::HashMap;
use std::rc::Rc;

use crate::common::{AnalyzeError, AnalyzeResult, Span};
use crate::graph::{Function, Reference, Variable};
use crate::types::Type;

/// A lexical scope with parent-based fallback lookup
#[derive(Debug, Default)]
pub struct Context {
    locals: HashMap<String, Reference>,
    parent: Option<Box<Context>>,
    function: Option<Rc<Function>>,
    in_loop: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outermost context pre-populated with the standard environment:
    /// `true`/`false` as read-only booleans, `pi`, and the float builtins.
    /// Built-in functions are ordinary `Function` entities and calls to them
    /// go through the same checks as user functions.
    pub fn standard() -> Self {
        let mut context = Self::new();

        for name in ["true", "false"] {
            let variable = Rc::new(Variable::new(name, true, Type::Boolean));
            context
                .locals
                .insert(name.to_string(), Reference::Variable(variable));
        }
        let pi = Rc::new(Variable::new("pi", true, Type::Float));
        context
            .locals
            .insert("pi".to_string(), Reference::Variable(pi));

        for name in ["sin", "cos", "exp", "ln"] {
            let x = Rc::new(Variable::new("x", false, Type::Float));
            let function = Rc::new(Function::new(name, vec![x], Type::Float));
            context
                .locals
                .insert(name.to_string(), Reference::Function(function));
        }
        let x = Rc::new(Variable::new("x", false, Type::Float));
        let y = Rc::new(Variable::new("y", false, Type::Float));
        let hypot = Rc::new(Function::new("hypot", vec![x, y], Type::Float));
        context
            .locals
            .insert("hypot".to_string(), Reference::Function(hypot));

        context
    }

    /// Declare a name in the current context
    ///
    /// The language forbids shadowing: the declaration is rejected if the
    /// name is reachable anywhere on the chain, not merely in this context.
    pub fn declare(&mut self, name: &str, decl: Reference, span: Span) -> AnalyzeResult<()> {
        if self.lookup(name).is_some() {
            return Err(AnalyzeError::already_declared(name, span));
        }
        self.locals.insert(name.to_string(), decl);
        Ok(())
    }

    /// Look up a name in this context, then each ancestor in order
    pub fn lookup(&self, name: &str) -> Option<&Reference> {
        if let Some(decl) = self.locals.get(name) {
            Some(decl)
        } else if let Some(parent) = &self.parent {
            parent.lookup(name)
        } else {
            None
        }
    }

    /// Enter a plain block: inherits the enclosing function and loop flag
    pub fn push_child(&mut self) {
        let function = self.function.clone();
        let in_loop = self.in_loop;
        self.push(function, in_loop);
    }

    /// Enter a loop body
    pub fn push_loop(&mut self) {
        let function = self.function.clone();
        self.push(function, true);
    }

    /// Enter a function body: resets the loop flag, so `break` legality
    /// never crosses a function boundary
    pub fn push_function(&mut self, function: Rc<Function>) {
        self.push(Some(function), false);
    }

    fn push(&mut self, function: Option<Rc<Function>>, in_loop: bool) {
        let parent = std::mem::take(self);
        *self = Context {
            locals: HashMap::new(),
            parent: Some(Box::new(parent)),
            function,
            in_loop,
        };
    }

    /// Leave the current scope; returns false at the root
    pub fn pop_to_parent(&mut self) -> bool {
        if let Some(parent) = self.parent.take() {
            *self = *parent;
            true
        } else {
            false
        }
    }

    /// The innermost enclosing function, if any
    pub fn enclosing_function(&self) -> Option<&Rc<Function>> {
        self.function.as_ref()
    }

    /// Whether a loop encloses the current point without an intervening
    /// function boundary
    pub fn in_loop(&self) -> bool {
        self.in_loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: Type) -> Reference {
        Reference::Variable(Rc::new(Variable::new(name, false, ty)))
    }

    #[test]
    fn test_lookup_through_ancestors() {
        let mut ctx = Context::new();
        ctx.declare("x", var("x", Type::Int), Span::default()).unwrap();
        ctx.push_child();
        ctx.push_child();
        let found = ctx.lookup("x").unwrap();
        assert_eq!(found.ty(), Type::Int);
        assert!(ctx.lookup("y").is_none());
    }

    #[test]
    fn test_redeclare_reachable_name_rejected() {
        let mut ctx = Context::new();
        ctx.declare("x", var("x", Type::Int), Span::default()).unwrap();

        // Same context
        let err = ctx
            .declare("x", var("x", Type::Int), Span::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Identifier x already declared");

        // Nested context: still reachable, still rejected
        ctx.push_child();
        assert!(ctx.declare("x", var("x", Type::Int), Span::default()).is_err());
    }

    #[test]
    fn test_sibling_scopes_may_reuse_names() {
        let mut ctx = Context::new();
        ctx.push_child();
        ctx.declare("x", var("x", Type::Int), Span::default()).unwrap();
        ctx.pop_to_parent();

        ctx.push_child();
        assert!(ctx.declare("x", var("x", Type::Boolean), Span::default()).is_ok());
    }

    #[test]
    fn test_loop_flag_propagates_through_blocks() {
        let mut ctx = Context::new();
        assert!(!ctx.in_loop());
        ctx.push_loop();
        ctx.push_child();
        assert!(ctx.in_loop());
    }

    #[test]
    fn test_function_boundary_resets_loop_flag() {
        let mut ctx = Context::new();
        ctx.push_loop();
        let f = Rc::new(Function::new("f", vec![], Type::Void));
        ctx.push_function(f);
        assert!(!ctx.in_loop());
        assert!(ctx.enclosing_function().is_some());

        ctx.pop_to_parent();
        assert!(ctx.in_loop());
        assert!(ctx.enclosing_function().is_none());
    }

    #[test]
    fn test_standard_context() {
        let ctx = Context::standard();
        assert_eq!(ctx.lookup("true").unwrap().ty(), Type::Boolean);
        assert_eq!(
            ctx.lookup("sin").unwrap().ty(),
            Type::function(vec![Type::Float], Type::Float)
        );
        assert_eq!(
            ctx.lookup("hypot").unwrap().ty(),
            Type::function(vec![Type::Float, Type::Float], Type::Float)
        );
    }
}
