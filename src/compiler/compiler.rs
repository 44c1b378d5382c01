//! Main compiler module.
//!
//! This module contains the core Compiler structure. It owns the LLVM
//! module and builder, converts interned types to LLVM types and keeps the
//! mapping from AST nodes to the LLVM values created for them.

use inkwell::{
    basic_block::BasicBlock,
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    types::{BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FunctionType, PointerType},
    values::{FunctionValue, PointerValue},
    AddressSpace,
};
use rustc_hash::FxHashMap;

use crate::{
    ast::{self, FnDecl, LocalStmt, WhileStmt},
    errors::CompileError,
    typing::{Type, TypeRef},
};

use super::stmt::gen_block;

/// Code generation state for one module.
///
/// AST nodes are keyed by address: two locals may share a name, and the
/// resolver has already bound every use to its declaration.
pub struct Compiler<'ctx, 'a> {
    /// Reference to the LLVM context
    pub context: &'ctx Context,
    /// The LLVM module being built
    pub module: Module<'ctx>,
    /// The LLVM IR builder
    pub builder: Builder<'ctx>,

    pub functions: FxHashMap<*const FnDecl<'a>, FunctionValue<'ctx>>,
    /// Stack slot of every local and parameter of the current function.
    pub locals: FxHashMap<*const LocalStmt<'a>, PointerValue<'ctx>>,
    /// Block following each loop of the current function, the target of its
    /// `break` statements.
    pub loop_exits: FxHashMap<*const WhileStmt<'a>, BasicBlock<'ctx>>,
    pub current_fn: Option<FunctionValue<'ctx>>,
}

impl<'ctx, 'a> Compiler<'ctx, 'a> {
    pub fn new(context: &'ctx Context, name: &str) -> Self {
        Compiler {
            context,
            module: context.create_module(name),
            builder: context.create_builder(),
            functions: FxHashMap::default(),
            locals: FxHashMap::default(),
            loop_exits: FxHashMap::default(),
            current_fn: None,
        }
    }

    /// Declares every function, then emits every body, so calls may refer
    /// to functions defined later in the file.
    pub fn compile(&mut self, module: &'a ast::Module<'a>) -> Result<(), CompileError> {
        for function in module.functions() {
            self.declare_function(function)?;
        }
        for function in module.functions() {
            self.gen_function(function)?;
        }

        self.module
            .verify()
            .map_err(|message| CompileError::Codegen(message.to_string()))
    }

    pub fn ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Converts a value type to an LLVM type. `void` has no values.
    pub fn convert_type(&self, ty: TypeRef<'a>) -> Result<BasicTypeEnum<'ctx>, CompileError> {
        match ty.get() {
            Type::Void => Err(CompileError::Codegen(String::from(
                "`void` cannot be stored in a value",
            ))),
            Type::Number => Ok(self.context.f64_type().into()),
            Type::Pointer(pointee) => Ok(self.pointer_type(*pointee)?.into()),
            Type::Function(_) => Ok(self
                .function_type(ty)?
                .ptr_type(AddressSpace::default())
                .into()),
        }
    }

    /// `&void` is lowered to `i8*`.
    fn pointer_type(&self, pointee: TypeRef<'a>) -> Result<PointerType<'ctx>, CompileError> {
        if pointee.is_void() {
            return Ok(self.context.i8_type().ptr_type(AddressSpace::default()));
        }
        Ok(self.convert_type(pointee)?.ptr_type(AddressSpace::default()))
    }

    pub fn function_type(&self, ty: TypeRef<'a>) -> Result<FunctionType<'ctx>, CompileError> {
        let signature = ty
            .as_function()
            .ok_or_else(|| CompileError::Codegen(format!("`{}` is not a function type", ty)))?;

        let params = signature
            .params()
            .map(|param| self.convert_type(param).map(BasicMetadataTypeEnum::from))
            .collect::<Result<Vec<_>, _>>()?;

        if signature.ret.is_void() {
            Ok(self.context.void_type().fn_type(&params, false))
        } else {
            Ok(self.convert_type(signature.ret)?.fn_type(&params, false))
        }
    }

    fn declare_function(&mut self, function: &'a FnDecl<'a>) -> Result<(), CompileError> {
        let ty = function.ty.get().ok_or_else(|| {
            CompileError::Codegen(format!("function `{}` was not type checked", function.name))
        })?;

        let value = self.module.add_function(
            function.name,
            self.function_type(ty)?,
            Some(Linkage::External),
        );
        self.functions.insert(function, value);
        Ok(())
    }

    fn gen_function(&mut self, function: &'a FnDecl<'a>) -> Result<(), CompileError> {
        let value = self.functions[&(function as *const _)];
        self.current_fn = Some(value);
        self.locals.clear();
        self.loop_exits.clear();

        let entry = self.context.append_basic_block(value, "entry");
        self.builder.position_at_end(entry);

        for (param, arg) in function.params.iter().zip(value.get_param_iter()) {
            let slot = self.create_slot(param)?;
            self.builder.build_store(slot, arg)?;
        }

        gen_block(self, function.body)?;

        // Falling off the end returns the zero value.
        if !self.is_terminated() {
            if function.ret_ty.is_void() {
                self.builder.build_return(None)?;
            } else {
                let zero = self.convert_type(function.ret_ty)?.const_zero();
                self.builder.build_return(Some(&zero))?;
            }
        }

        self.current_fn = None;
        Ok(())
    }

    /// Allocates the stack slot of `local` in the current function.
    pub fn create_slot(
        &mut self,
        local: &'a LocalStmt<'a>,
    ) -> Result<PointerValue<'ctx>, CompileError> {
        let ty = local.get_type().ok_or_else(|| {
            CompileError::Codegen(format!("local `{}` was not type checked", local.name))
        })?;

        let slot = self.builder.build_alloca(self.convert_type(ty)?, local.name)?;
        self.locals.insert(local, slot);
        Ok(slot)
    }

    pub fn append_block(&self, name: &str) -> Result<BasicBlock<'ctx>, CompileError> {
        let function = self
            .current_fn
            .ok_or_else(|| CompileError::Codegen(String::from("no function to append to")))?;
        Ok(self.context.append_basic_block(function, name))
    }

    /// Whether the block being built already ends in a branch or return.
    pub fn is_terminated(&self) -> bool {
        self.builder
            .get_insert_block()
            .map_or(true, |block| block.get_terminator().is_some())
    }
}

/// Lowers a checked module to verified LLVM IR text.
pub fn generate<'a>(module: &'a ast::Module<'a>) -> Result<String, CompileError> {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, module.name);

    compiler.compile(module)?;
    tracing::debug!(functions = compiler.functions.len(), "generated LLVM module");

    Ok(compiler.ir())
}
