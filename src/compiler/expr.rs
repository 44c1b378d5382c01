use inkwell::{
    values::{BasicMetadataValueEnum, BasicValueEnum, IntValue, PointerValue},
    FloatPredicate, IntPredicate,
};

use crate::{
    ast::{BinOpKind, BinaryExpr, CallExpr, Expr, ExprKind, Resolution, UnOpKind},
    errors::CompileError,
};

use super::compiler::Compiler;

fn unsupported(what: impl std::fmt::Display) -> CompileError {
    CompileError::Codegen(format!("unsupported {}", what))
}

/// Generates LLVM IR for the given expression. Calls of `void` functions
/// produce no value.
pub fn gen_expression<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    expression: &'a Expr<'a>,
) -> Result<Option<BasicValueEnum<'ctx>>, CompileError> {
    let value: BasicValueEnum<'ctx> = match &expression.kind {
        ExprKind::Number(number) => compiler.context.f64_type().const_float(number.value).into(),
        ExprKind::Identifier(identifier) => match identifier.decl.get() {
            Resolution::Local(_) => {
                let slot = gen_address(compiler, expression)?;
                compiler.builder.build_load(slot, identifier.name)?
            }
            Resolution::Function(function) => compiler.functions[&(function as *const _)]
                .as_global_value()
                .as_pointer_value()
                .into(),
            Resolution::Unresolved => return Err(unsupported("unresolved identifier")),
        },
        ExprKind::Unary(unary) => {
            let operand = gen_value(compiler, unary.expr)?;
            match unary.op {
                UnOpKind::Neg => match operand {
                    BasicValueEnum::FloatValue(operand) => {
                        compiler.builder.build_float_neg(operand, "neg")?.into()
                    }
                    _ => return Err(unsupported("negation of a non-number")),
                },
                UnOpKind::Not => {
                    let truthy = truthiness(compiler, operand)?;
                    let falsy = compiler.builder.build_not(truthy, "not")?;
                    bool_to_number(compiler, falsy)?
                }
            }
        }
        ExprKind::Binary(binary) => gen_binary(compiler, binary)?,
        ExprKind::Call(call) => return gen_call(compiler, call),
        ExprKind::Index(_) => {
            let address = gen_address(compiler, expression)?;
            compiler.builder.build_load(address, "elem")?
        }
        ExprKind::Grouped(grouped) => return gen_expression(compiler, grouped.expr),
    };

    Ok(Some(value))
}

pub fn gen_value<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    expression: &'a Expr<'a>,
) -> Result<BasicValueEnum<'ctx>, CompileError> {
    gen_expression(compiler, expression)?
        .ok_or_else(|| unsupported("use of a `void` value"))
}

/// Generates an `i1` that is set when `expression` is non-zero.
pub fn gen_condition<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    expression: &'a Expr<'a>,
) -> Result<IntValue<'ctx>, CompileError> {
    let value = gen_value(compiler, expression)?;
    truthiness(compiler, value)
}

/// Address of an assignable expression: a local or an indexed element.
pub fn gen_address<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    expression: &'a Expr<'a>,
) -> Result<PointerValue<'ctx>, CompileError> {
    match &expression.kind {
        ExprKind::Identifier(identifier) => match identifier.decl.get() {
            Resolution::Local(local) => compiler
                .locals
                .get(&(local as *const _))
                .copied()
                .ok_or_else(|| unsupported(format!("use of `{}` before its slot", local.name))),
            _ => Err(unsupported(format!("assignment to `{}`", identifier.name))),
        },
        ExprKind::Index(index) => {
            let base = gen_value(compiler, index.base)?;
            let offset = gen_value(compiler, index.index)?;

            let (BasicValueEnum::PointerValue(base), BasicValueEnum::FloatValue(offset)) =
                (base, offset)
            else {
                return Err(unsupported("index operands"));
            };

            let offset = compiler.builder.build_float_to_signed_int(
                offset,
                compiler.context.i64_type(),
                "offset",
            )?;
            // In bounds is the program's responsibility.
            Ok(unsafe { compiler.builder.build_gep(base, &[offset], "elem_ptr")? })
        }
        ExprKind::Grouped(grouped) => gen_address(compiler, grouped.expr),
        _ => Err(unsupported("assignment target")),
    }
}

fn gen_binary<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    binary: &'a BinaryExpr<'a>,
) -> Result<BasicValueEnum<'ctx>, CompileError> {
    let lhs = gen_value(compiler, binary.lhs)?;
    let rhs = gen_value(compiler, binary.rhs)?;
    let builder = &compiler.builder;

    if binary.op.is_logical() {
        let lhs = truthiness(compiler, lhs)?;
        let rhs = truthiness(compiler, rhs)?;
        let result = match binary.op {
            BinOpKind::And => builder.build_and(lhs, rhs, "and")?,
            _ => builder.build_or(lhs, rhs, "or")?,
        };
        return bool_to_number(compiler, result);
    }

    match (lhs, rhs) {
        (BasicValueEnum::FloatValue(lhs), BasicValueEnum::FloatValue(rhs)) => {
            let predicate = match binary.op {
                BinOpKind::Mul => return Ok(builder.build_float_mul(lhs, rhs, "mul")?.into()),
                BinOpKind::Div => return Ok(builder.build_float_div(lhs, rhs, "div")?.into()),
                BinOpKind::Add => return Ok(builder.build_float_add(lhs, rhs, "add")?.into()),
                BinOpKind::Sub => return Ok(builder.build_float_sub(lhs, rhs, "sub")?.into()),
                BinOpKind::Lt => FloatPredicate::OLT,
                BinOpKind::Le => FloatPredicate::OLE,
                BinOpKind::Gt => FloatPredicate::OGT,
                BinOpKind::Ge => FloatPredicate::OGE,
                BinOpKind::Eq => FloatPredicate::OEQ,
                BinOpKind::Ne => FloatPredicate::UNE,
                BinOpKind::And | BinOpKind::Or => unreachable!("handled above"),
            };
            let result = builder.build_float_compare(predicate, lhs, rhs, "cmp")?;
            bool_to_number(compiler, result)
        }
        (BasicValueEnum::PointerValue(lhs), BasicValueEnum::PointerValue(rhs))
            if matches!(binary.op, BinOpKind::Eq | BinOpKind::Ne) =>
        {
            let i64_type = compiler.context.i64_type();
            let lhs = builder.build_ptr_to_int(lhs, i64_type, "lhs")?;
            let rhs = builder.build_ptr_to_int(rhs, i64_type, "rhs")?;
            let predicate = match binary.op {
                BinOpKind::Eq => IntPredicate::EQ,
                _ => IntPredicate::NE,
            };
            let result = builder.build_int_compare(predicate, lhs, rhs, "cmp")?;
            bool_to_number(compiler, result)
        }
        _ => Err(unsupported(format!("operator `{}` on these operands", binary.op))),
    }
}

fn gen_call<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    call: &'a CallExpr<'a>,
) -> Result<Option<BasicValueEnum<'ctx>>, CompileError> {
    let direct = match &call.callee.kind {
        ExprKind::Identifier(identifier) => match identifier.decl.get() {
            Resolution::Function(function) => Some(compiler.functions[&(function as *const _)]),
            _ => None,
        },
        _ => None,
    };

    let callee = match direct {
        Some(_) => None,
        None => Some(gen_value(compiler, call.callee)?),
    };

    let args = call
        .args
        .iter()
        .map(|arg| gen_value(compiler, arg).map(BasicMetadataValueEnum::from))
        .collect::<Result<Vec<_>, _>>()?;

    let site = match (direct, callee) {
        (Some(function), _) => compiler.builder.build_call(function, &args, "call")?,
        (None, Some(BasicValueEnum::PointerValue(pointer))) => {
            let ty = call
                .callee
                .get_type()
                .ok_or_else(|| unsupported("call of an untyped callee"))?;
            let fn_type = compiler.function_type(ty)?;
            compiler
                .builder
                .build_indirect_call(fn_type, pointer, &args, "call")?
        }
        _ => return Err(unsupported("callee")),
    };

    Ok(site.try_as_basic_value().left())
}

/// `i1` that is set when `value` is non-zero or a non-null pointer.
fn truthiness<'ctx>(
    compiler: &Compiler<'ctx, '_>,
    value: BasicValueEnum<'ctx>,
) -> Result<IntValue<'ctx>, CompileError> {
    let builder = &compiler.builder;
    match value {
        BasicValueEnum::FloatValue(value) => {
            let zero = compiler.context.f64_type().const_zero();
            Ok(builder.build_float_compare(FloatPredicate::UNE, value, zero, "truthy")?)
        }
        BasicValueEnum::PointerValue(value) => {
            let i64_type = compiler.context.i64_type();
            let address = builder.build_ptr_to_int(value, i64_type, "address")?;
            Ok(builder.build_int_compare(IntPredicate::NE, address, i64_type.const_zero(), "truthy")?)
        }
        _ => Err(unsupported("condition")),
    }
}

/// Widens an `i1` to `0.0` or `1.0`.
fn bool_to_number<'ctx>(
    compiler: &Compiler<'ctx, '_>,
    value: IntValue<'ctx>,
) -> Result<BasicValueEnum<'ctx>, CompileError> {
    Ok(compiler
        .builder
        .build_unsigned_int_to_float(value, compiler.context.f64_type(), "bool")?
        .into())
}
