//! Type checking.
//!
//! A post-order walk: children are typed before their parent reads their
//! annotation. Parameters of every function are settled before any body is
//! checked, so a call sees the callee's full signature no matter where the
//! callee is defined. Whenever a type cannot be determined the node is
//! annotated with `void` and checking carries on.

use rustc_hash::FxHashSet;

use crate::{
    ast::{
        visitor::Visitor, AssignStmt, BinaryExpr, CallExpr, Expr, FnDecl, GroupedExpr,
        IdentifierExpr, IndexExpr, LocalStmt, Module, NumberExpr, Resolution, ReturnStmt, Stmt,
        UnaryExpr,
    },
    errors::{TypeCheckError, TypeCheckErrorKind},
    typing::{TypeRef, TypeTable},
    Span,
};

pub struct TypeChecker<'a> {
    types: &'a TypeTable<'a>,
    /// Function whose body is being checked.
    current_fn: Option<&'a FnDecl<'a>>,
    /// Functions whose parameters are being settled.
    settling: FxHashSet<*const FnDecl<'a>>,
    errors: Vec<TypeCheckError>,
}

fn quoted(ty: TypeRef<'_>) -> String {
    format!("`{}`", ty)
}

impl<'a> TypeChecker<'a> {
    pub fn new(types: &'a TypeTable<'a>) -> Self {
        TypeChecker {
            types,
            current_fn: None,
            settling: FxHashSet::default(),
            errors: vec![],
        }
    }

    pub fn check(mut self, module: &'a Module<'a>) -> Vec<TypeCheckError> {
        self.visit_module(module);
        tracing::debug!(
            errors = self.errors.len(),
            types = self.types.num_types(),
            "type checking finished"
        );
        self.errors
    }

    fn error(&mut self, kind: TypeCheckErrorKind, span: Span) {
        self.errors.push(TypeCheckError::new(kind, span));
    }

    /// The annotation of an already visited expression.
    fn type_of(&self, expr: &Expr<'a>) -> TypeRef<'a> {
        expr.get_type().unwrap_or(self.types.void_type())
    }

    fn check_expr(&mut self, expr: &'a Expr<'a>) -> TypeRef<'a> {
        self.visit_expr(expr);
        self.type_of(expr)
    }

    /// The interned signature of `function`.
    ///
    /// Parameters are settled on first use, so an initializer naming a later
    /// function sees its real signature. A function reached again while its
    /// own parameters are settling gets an uncached signature in which the
    /// unsettled parameters are `void`.
    fn function_type(&mut self, function: &'a FnDecl<'a>) -> TypeRef<'a> {
        if let Some(ty) = function.ty.get() {
            return ty;
        }

        let key = function as *const FnDecl<'a>;
        if !self.settling.insert(key) {
            return self.signature(function);
        }

        for param in function.params {
            self.visit_local(param);
        }
        self.settling.remove(&key);

        let ty = self.signature(function);
        function.ty.set(Some(ty));
        ty
    }

    fn signature(&self, function: &'a FnDecl<'a>) -> TypeRef<'a> {
        let params: Vec<_> = function
            .params
            .iter()
            .map(|param| param.get_type().unwrap_or(self.types.void_type()))
            .collect();
        self.types.function(&params, function.ret_ty)
    }
}

impl<'a> Visitor<'a> for TypeChecker<'a> {
    fn visit_module(&mut self, module: &'a Module<'a>) {
        for function in module.functions() {
            self.function_type(function);
        }
        for function in module.functions() {
            self.visit_fn(function);
        }
    }

    fn visit_fn(&mut self, function: &'a FnDecl<'a>) {
        self.current_fn = Some(function);
        self.visit_block(function.body);
        self.current_fn = None;
    }

    fn visit_local(&mut self, local: &'a LocalStmt<'a>) {
        let init_ty = local.init.map(|init| self.check_expr(init));

        let ty = match (local.declared_ty, init_ty) {
            (Some(declared), Some(init)) => {
                if declared != init {
                    self.error(
                        TypeCheckErrorKind::InvalidAssignment {
                            expected: quoted(declared),
                            found: quoted(init),
                        },
                        local.span,
                    );
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(init)) => init,
            (None, None) => {
                self.error(
                    TypeCheckErrorKind::InvalidAssignment {
                        expected: String::from("a type or an initializer"),
                        found: String::from("neither"),
                    },
                    local.span,
                );
                self.types.void_type()
            }
        };

        local.ty.set(Some(ty));
    }

    fn visit_assign(&mut self, stmt: &'a Stmt<'a>, assign: &'a AssignStmt<'a>) {
        let lhs = self.check_expr(assign.lhs);
        let rhs = self.check_expr(assign.rhs);

        if lhs != rhs {
            self.error(
                TypeCheckErrorKind::InvalidAssignment {
                    expected: quoted(lhs),
                    found: quoted(rhs),
                },
                stmt.span,
            );
        }
    }

    fn visit_return(&mut self, stmt: &'a Stmt<'a>, return_stmt: &'a ReturnStmt<'a>) {
        let expected = match self.current_fn {
            Some(function) => function.ret_ty,
            None => self.types.void_type(),
        };
        let found = return_stmt.expr.map(|expr| self.check_expr(expr));

        let found = match found {
            None if expected.is_void() => return,
            Some(found) if found == expected && !expected.is_void() => return,
            None => String::from("nothing"),
            Some(found) => quoted(found),
        };
        let expected = if expected.is_void() {
            String::from("no value")
        } else {
            quoted(expected)
        };

        self.error(TypeCheckErrorKind::InvalidReturn { expected, found }, stmt.span);
    }

    fn visit_number(&mut self, expr: &'a Expr<'a>, _number: &'a NumberExpr) {
        expr.ty.set(Some(self.types.number_type()));
    }

    fn visit_identifier(&mut self, expr: &'a Expr<'a>, identifier: &'a IdentifierExpr<'a>) {
        let ty = match identifier.decl.get() {
            Resolution::Local(local) => local.get_type().unwrap_or(self.types.void_type()),
            Resolution::Function(function) => self.function_type(function),
            Resolution::Unresolved => self.types.void_type(),
        };
        expr.ty.set(Some(ty));
    }

    fn visit_unary(&mut self, expr: &'a Expr<'a>, unary: &'a UnaryExpr<'a>) {
        let ty = self.check_expr(unary.expr);
        expr.ty.set(Some(ty));
    }

    fn visit_grouped(&mut self, expr: &'a Expr<'a>, grouped: &'a GroupedExpr<'a>) {
        let ty = self.check_expr(grouped.expr);
        expr.ty.set(Some(ty));
    }

    /// Operands must have the same type. The result is the left operand's
    /// type even when they differ.
    fn visit_binary(&mut self, expr: &'a Expr<'a>, binary: &'a BinaryExpr<'a>) {
        let lhs = self.check_expr(binary.lhs);
        let rhs = self.check_expr(binary.rhs);

        if lhs != rhs {
            self.error(
                TypeCheckErrorKind::InvalidBinaryOperation {
                    lhs: lhs.to_string(),
                    rhs: rhs.to_string(),
                },
                expr.span,
            );
        }
        expr.ty.set(Some(lhs));
    }

    fn visit_call(&mut self, expr: &'a Expr<'a>, call: &'a CallExpr<'a>) {
        let callee = self.check_expr(call.callee);
        let args: Vec<_> = call.args.iter().map(|arg| self.check_expr(arg)).collect();

        let ty = match callee.as_function() {
            Some(signature)
                if signature.num_params() == args.len()
                    && signature.params().zip(args.iter()).all(|(param, arg)| param == *arg) =>
            {
                signature.ret
            }
            _ => {
                let args = args
                    .iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.error(
                    TypeCheckErrorKind::InvalidCall {
                        callee: callee.to_string(),
                        args,
                    },
                    expr.span,
                );
                self.types.void_type()
            }
        };
        expr.ty.set(Some(ty));
    }

    fn visit_index(&mut self, expr: &'a Expr<'a>, index: &'a IndexExpr<'a>) {
        let base = self.check_expr(index.base);
        let offset = self.check_expr(index.index);

        let ty = match base.pointee() {
            Some(pointee) if offset.is_number() => pointee,
            _ => {
                self.error(
                    TypeCheckErrorKind::InvalidIndex {
                        base: base.to_string(),
                        index: offset.to_string(),
                    },
                    expr.span,
                );
                self.types.void_type()
            }
        };
        expr.ty.set(Some(ty));
    }
}

/// Type checks every function of `module`.
pub fn check<'a>(module: &'a Module<'a>, types: &'a TypeTable<'a>) -> Vec<TypeCheckError> {
    TypeChecker::new(types).check(module)
}
