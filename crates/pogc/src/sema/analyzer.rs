//! The analyzer: a single recursive traversal over the parse tree
//!
//! Each construct is checked eagerly as it is visited and rewritten into its
//! resolved graph node; the first violation anywhere in traversal order
//! aborts the whole analysis. The context chain is the only mutable state,
//! pushed and popped strictly in call-stack order.

use std::rc::Rc;

use crate::ast;
use crate::ast::{BinOp, UnaryOp};
use crate::common::{AnalyzeError, AnalyzeResult, Span};
use crate::graph;
use crate::graph::{Function, Reference, Variable};
use crate::sema::Context;
use crate::types::Type;

/// Analyze a parse tree, producing the resolved program graph or the first
/// semantic error encountered
pub fn analyze(program: &ast::Program) -> AnalyzeResult<graph::Program> {
    Analyzer::new().analyze(program)
}

/// The analyzer traversal state
pub struct Analyzer {
    context: Context,
}

impl Analyzer {
    /// Create an analyzer whose root scope is a child of the standard
    /// context, so programs resolve `true`, `pi`, `sin`, ... without being
    /// able to mistake them for their own declarations
    pub fn new() -> Self {
        let mut context = Context::standard();
        context.push_child();
        Self { context }
    }

    pub fn analyze(mut self, program: &ast::Program) -> AnalyzeResult<graph::Program> {
        let statements = self.analyze_block(&program.statements)?;
        Ok(graph::Program::new(statements))
    }

    /// Analyze a statement sequence in the current context; callers push a
    /// child context first where the construct introduces one
    fn analyze_block(&mut self, statements: &[ast::Stmt]) -> AnalyzeResult<Vec<graph::Stmt>> {
        statements.iter().map(|s| self.analyze_stmt(s)).collect()
    }

    fn analyze_stmt(&mut self, stmt: &ast::Stmt) -> AnalyzeResult<graph::Stmt> {
        match &stmt.kind {
            ast::StmtKind::VarDecl {
                name,
                declared_type,
                init,
            } => self.analyze_var_decl(name, declared_type.as_ref(), init),
            ast::StmtKind::Assign { target, value } => self.analyze_assign(target, value),
            ast::StmtKind::FnDecl {
                name,
                params,
                return_type,
                body,
            } => self.analyze_fn_decl(name, params, return_type.as_ref(), body),
            ast::StmtKind::If {
                test,
                consequent,
                else_ifs,
                alternate,
            } => self.analyze_if(test, consequent, else_ifs, alternate.as_deref()),
            ast::StmtKind::While { test, body } => {
                let test = self.check_boolean(test)?;
                self.context.push_loop();
                let body = self.analyze_block(body)?;
                self.context.pop_to_parent();
                Ok(graph::Stmt::While { test, body })
            }
            ast::StmtKind::Break => {
                if !self.context.in_loop() {
                    return Err(AnalyzeError::IllegalBreak { span: stmt.span });
                }
                Ok(graph::Stmt::Break)
            }
            ast::StmtKind::Return(value) => self.analyze_return(value.as_ref(), stmt.span),
            ast::StmtKind::Print(expr) => Ok(graph::Stmt::Print(self.analyze_expr(expr, None)?)),
            ast::StmtKind::Expr(expr) => Ok(graph::Stmt::Expr(self.analyze_expr(expr, None)?)),
        }
    }

    fn analyze_var_decl(
        &mut self,
        name: &ast::Ident,
        declared_type: Option<&ast::TypeExpr>,
        init: &ast::Expr,
    ) -> AnalyzeResult<graph::Stmt> {
        let declared = declared_type.map(|t| self.resolve_type(t)).transpose()?;
        let init = self.analyze_expr(init, declared.as_ref())?;

        // An explicit annotation must match the initializer exactly;
        // otherwise the variable's type is inferred from the initializer
        if let Some(declared) = &declared {
            if init.ty != *declared {
                return Err(AnalyzeError::type_mismatch(
                    format!("Cannot assign a {} to a {}", init.ty, declared),
                    name.span,
                ));
            }
        }

        let variable = Rc::new(Variable::new(&name.name, false, init.ty.clone()));
        self.context
            .declare(&name.name, Reference::Variable(Rc::clone(&variable)), name.span)?;
        Ok(graph::Stmt::VarDecl { variable, init })
    }

    fn analyze_assign(&mut self, target: &ast::Ident, value: &ast::Expr) -> AnalyzeResult<graph::Stmt> {
        let target = self.resolve(target)?;
        let target_ty = target.ty();
        let source = self.analyze_expr(value, Some(&target_ty))?;
        if source.ty != target_ty {
            return Err(AnalyzeError::type_mismatch(
                format!("Cannot assign a {} to a {}", source.ty, target_ty),
                value.span,
            ));
        }
        Ok(graph::Stmt::Assign { target, source })
    }

    fn analyze_fn_decl(
        &mut self,
        name: &ast::Ident,
        params: &[ast::Param],
        return_type: Option<&ast::TypeExpr>,
        body: &[ast::Stmt],
    ) -> AnalyzeResult<graph::Stmt> {
        let return_type = match return_type {
            Some(annotation) => self.resolve_type(annotation)?,
            None => Type::Void,
        };

        let mut param_vars = Vec::with_capacity(params.len());
        for param in params {
            let ty = self.resolve_type(&param.ty)?;
            param_vars.push(Rc::new(Variable::new(&param.name.name, false, ty)));
        }

        // The function goes into the outer context before its body is
        // analyzed, so recursive self-reference resolves. Its type is fixed
        // here and never changes.
        let function = Rc::new(Function::new(&name.name, param_vars.clone(), return_type));
        self.context
            .declare(&name.name, Reference::Function(Rc::clone(&function)), name.span)?;

        self.context.push_function(Rc::clone(&function));
        for (param, variable) in params.iter().zip(param_vars) {
            self.context.declare(
                &param.name.name,
                Reference::Variable(variable),
                param.name.span,
            )?;
        }
        let body = self.analyze_block(body)?;
        self.context.pop_to_parent();

        Ok(graph::Stmt::FnDecl { function, body })
    }

    fn analyze_if(
        &mut self,
        test: &ast::Expr,
        consequent: &[ast::Stmt],
        else_ifs: &[ast::ElseIf],
        alternate: Option<&[ast::Stmt]>,
    ) -> AnalyzeResult<graph::Stmt> {
        let test = self.check_boolean(test)?;

        self.context.push_child();
        let consequent = self.analyze_block(consequent)?;
        self.context.pop_to_parent();

        // An else-if chain becomes a nested If in the alternate position
        let alternate = if let Some((first, rest)) = else_ifs.split_first() {
            let nested = self.analyze_if(&first.test, &first.body, rest, alternate)?;
            graph::IfAlternate::ElseIf(Box::new(nested))
        } else if let Some(block) = alternate {
            self.context.push_child();
            let block = self.analyze_block(block)?;
            self.context.pop_to_parent();
            graph::IfAlternate::Block(block)
        } else {
            graph::IfAlternate::None
        };

        Ok(graph::Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    fn analyze_return(&mut self, value: Option<&ast::Expr>, span: Span) -> AnalyzeResult<graph::Stmt> {
        let Some(function) = self.context.enclosing_function().cloned() else {
            return Err(AnalyzeError::IllegalReturn { span });
        };

        match value {
            None => {
                if function.return_type != Type::Void {
                    return Err(AnalyzeError::return_value_mismatch(
                        format!("{} should be returned here", function.return_type),
                        span,
                    ));
                }
                Ok(graph::Stmt::Return(None))
            }
            Some(value) => {
                if function.return_type == Type::Void {
                    return Err(AnalyzeError::return_value_mismatch(
                        "Cannot return a value here",
                        span,
                    ));
                }
                let value_span = value.span;
                let value = self.analyze_expr(value, Some(&function.return_type))?;
                if value.ty != function.return_type {
                    return Err(AnalyzeError::type_mismatch(
                        format!("Cannot assign a {} to a {}", value.ty, function.return_type),
                        value_span,
                    ));
                }
                Ok(graph::Stmt::Return(Some(value)))
            }
        }
    }

    /// Analyze an expression, fixing its type at construction
    ///
    /// `expected` is a type hint used only to give empty array literals a
    /// type; it threads through nested array literals and conditional arms
    /// and never relaxes any check.
    fn analyze_expr(&mut self, expr: &ast::Expr, expected: Option<&Type>) -> AnalyzeResult<graph::Expr> {
        match &expr.kind {
            ast::ExprKind::Int(value) => Ok(graph::Expr::int(*value)),
            ast::ExprKind::Float(value) => Ok(graph::Expr::float(*value)),
            ast::ExprKind::Str(value) => Ok(graph::Expr::string(value.clone())),
            ast::ExprKind::Char(value) => Ok(graph::Expr::char(*value)),
            ast::ExprKind::Identifier(name) => {
                let reference = self
                    .context
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| AnalyzeError::undeclared(name, expr.span))?;
                Ok(graph::Expr::reference(reference))
            }
            ast::ExprKind::Binary { op, left, right } => self.analyze_binary(*op, left, right, expr.span),
            ast::ExprKind::Unary { op, operand } => self.analyze_unary(*op, operand),
            ast::ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => self.analyze_conditional(test, consequent, alternate, expected, expr.span),
            ast::ExprKind::Array(elements) => self.analyze_array(elements, expected, expr.span),
            ast::ExprKind::Subscript { array, index } => self.analyze_subscript(array, index),
            ast::ExprKind::Call { callee, args } => self.analyze_call(callee, args, expr.span),
        }
    }

    fn analyze_binary(
        &mut self,
        op: BinOp,
        left: &ast::Expr,
        right: &ast::Expr,
        span: Span,
    ) -> AnalyzeResult<graph::Expr> {
        let lhs = self.analyze_expr(left, None)?;
        let rhs = self.analyze_expr(right, None)?;

        let ty = match op {
            BinOp::Add => {
                self.require_numeric_or_string(&lhs, left.span)?;
                self.require_same_operands(&lhs, &rhs, span)?;
                lhs.ty.clone()
            }
            BinOp::Sub
            | BinOp::Mul
            | BinOp::Div
            | BinOp::Mod
            | BinOp::Pow
            | BinOp::BitAnd
            | BinOp::BitOr
            | BinOp::BitXor
            | BinOp::Shl
            | BinOp::Shr => {
                self.require_numeric(&lhs, left.span)?;
                self.require_same_operands(&lhs, &rhs, span)?;
                lhs.ty.clone()
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                self.require_numeric_or_string(&lhs, left.span)?;
                self.require_same_operands(&lhs, &rhs, span)?;
                Type::Boolean
            }
            // Equality accepts any operand types, including array and
            // function types, as long as they are structurally equal
            BinOp::Eq | BinOp::Ne => {
                self.require_same_operands(&lhs, &rhs, span)?;
                Type::Boolean
            }
            BinOp::And | BinOp::Or => {
                self.require_boolean(&lhs, left.span)?;
                self.require_boolean(&rhs, right.span)?;
                Type::Boolean
            }
        };

        Ok(graph::Expr::new(
            graph::ExprKind::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
            ty,
        ))
    }

    fn analyze_unary(&mut self, op: UnaryOp, operand: &ast::Expr) -> AnalyzeResult<graph::Expr> {
        let inner = self.analyze_expr(operand, None)?;
        let ty = match op {
            UnaryOp::Neg => {
                self.require_numeric(&inner, operand.span)?;
                inner.ty.clone()
            }
            UnaryOp::Not => {
                self.require_boolean(&inner, operand.span)?;
                Type::Boolean
            }
        };
        Ok(graph::Expr::new(
            graph::ExprKind::Unary {
                op,
                operand: Box::new(inner),
            },
            ty,
        ))
    }

    fn analyze_conditional(
        &mut self,
        test: &ast::Expr,
        consequent: &ast::Expr,
        alternate: &ast::Expr,
        expected: Option<&Type>,
        span: Span,
    ) -> AnalyzeResult<graph::Expr> {
        let test = self.check_boolean(test)?;
        let consequent = self.analyze_expr(consequent, expected)?;
        let alternate = self.analyze_expr(alternate, expected.or(Some(&consequent.ty)))?;
        if consequent.ty != alternate.ty {
            return Err(AnalyzeError::type_mismatch(
                "The two arms of the conditional must have the same type",
                span,
            ));
        }
        let ty = consequent.ty.clone();
        Ok(graph::Expr::new(
            graph::ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            ty,
        ))
    }

    fn analyze_array(
        &mut self,
        elements: &[ast::Expr],
        expected: Option<&Type>,
        span: Span,
    ) -> AnalyzeResult<graph::Expr> {
        // An empty literal has no element to infer from; it takes the
        // expected array type when one is in force, else `[void]`, which can
        // never equal a populated array's type
        let Some((first, rest)) = elements.split_first() else {
            let ty = match expected {
                Some(ty @ Type::Array(_)) => ty.clone(),
                _ => Type::array(Type::Void),
            };
            return Ok(graph::Expr::new(graph::ExprKind::Array(Vec::new()), ty));
        };

        let element_hint = match expected {
            Some(Type::Array(element)) => Some(element.as_ref()),
            _ => None,
        };

        let first = self.analyze_expr(first, element_hint)?;
        let element_ty = first.ty.clone();
        let mut out = Vec::with_capacity(elements.len());
        out.push(first);
        for element in rest {
            let element = self.analyze_expr(element, element_hint)?;
            if element.ty != element_ty {
                return Err(AnalyzeError::ArrayElementTypeMismatch { span });
            }
            out.push(element);
        }

        Ok(graph::Expr::new(
            graph::ExprKind::Array(out),
            Type::array(element_ty),
        ))
    }

    fn analyze_subscript(&mut self, array: &ast::Expr, index: &ast::Expr) -> AnalyzeResult<graph::Expr> {
        let array_node = self.analyze_expr(array, None)?;
        let Type::Array(element) = array_node.ty.clone() else {
            return Err(AnalyzeError::type_mismatch(
                format!("Expected an array, found {}", array_node.ty),
                array.span,
            ));
        };

        let index_node = self.analyze_expr(index, None)?;
        if index_node.ty != Type::Int {
            return Err(AnalyzeError::type_mismatch(
                format!("Expected an integer, found {}", index_node.ty),
                index.span,
            ));
        }

        Ok(graph::Expr::new(
            graph::ExprKind::Subscript {
                array: Box::new(array_node),
                index: Box::new(index_node),
            },
            *element,
        ))
    }

    fn analyze_call(
        &mut self,
        callee: &ast::Ident,
        args: &[ast::Expr],
        span: Span,
    ) -> AnalyzeResult<graph::Expr> {
        let callee = self.resolve(callee)?;
        let Type::Function { params, returns } = callee.ty() else {
            return Err(AnalyzeError::CallOfNonFunction { span });
        };

        if params.len() != args.len() {
            return Err(AnalyzeError::ArityMismatch {
                required: params.len(),
                passed: args.len(),
                span,
            });
        }

        let mut arg_nodes = Vec::with_capacity(args.len());
        for (arg, param_ty) in args.iter().zip(&params) {
            let node = self.analyze_expr(arg, Some(param_ty))?;
            if node.ty != *param_ty {
                return Err(AnalyzeError::type_mismatch(
                    format!("Cannot assign a {} to a {}", node.ty, param_ty),
                    arg.span,
                ));
            }
            arg_nodes.push(node);
        }

        Ok(graph::Expr::new(
            graph::ExprKind::Call {
                callee,
                args: arg_nodes,
            },
            *returns,
        ))
    }

    /// Analyze a test expression and require it to be boolean
    fn check_boolean(&mut self, test: &ast::Expr) -> AnalyzeResult<graph::Expr> {
        let node = self.analyze_expr(test, None)?;
        self.require_boolean(&node, test.span)?;
        Ok(node)
    }

    fn require_boolean(&self, expr: &graph::Expr, span: Span) -> AnalyzeResult<()> {
        if expr.ty != Type::Boolean {
            return Err(AnalyzeError::type_mismatch(
                format!("Expected a boolean, found {}", expr.ty),
                span,
            ));
        }
        Ok(())
    }

    fn require_numeric(&self, expr: &graph::Expr, span: Span) -> AnalyzeResult<()> {
        if !expr.ty.is_numeric() {
            return Err(AnalyzeError::type_mismatch(
                format!("Expected a number, found {}", expr.ty),
                span,
            ));
        }
        Ok(())
    }

    fn require_numeric_or_string(&self, expr: &graph::Expr, span: Span) -> AnalyzeResult<()> {
        if !expr.ty.is_numeric_or_string() {
            return Err(AnalyzeError::type_mismatch(
                format!("Expected a number or string, found {}", expr.ty),
                span,
            ));
        }
        Ok(())
    }

    fn require_same_operands(
        &self,
        left: &graph::Expr,
        right: &graph::Expr,
        span: Span,
    ) -> AnalyzeResult<()> {
        if left.ty != right.ty {
            return Err(AnalyzeError::type_mismatch(
                "Operands do not have the same type",
                span,
            ));
        }
        Ok(())
    }

    fn resolve(&self, ident: &ast::Ident) -> AnalyzeResult<Reference> {
        self.context
            .lookup(&ident.name)
            .cloned()
            .ok_or_else(|| AnalyzeError::undeclared(&ident.name, ident.span))
    }

    /// Resolve a type annotation; a name that does not denote a type fails
    /// with `TypeExpected`
    fn resolve_type(&self, annotation: &ast::TypeExpr) -> AnalyzeResult<Type> {
        match &annotation.kind {
            ast::TypeExprKind::Named(name) => match name.as_str() {
                "int" => Ok(Type::Int),
                "float" => Ok(Type::Float),
                "string" => Ok(Type::String),
                "boolean" => Ok(Type::Boolean),
                "char" => Ok(Type::Char),
                "void" => Ok(Type::Void),
                _ => Err(AnalyzeError::TypeExpected {
                    span: annotation.span,
                }),
            },
            ast::TypeExprKind::Array(element) => Ok(Type::array(self.resolve_type(element)?)),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
