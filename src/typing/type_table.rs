//! Hash-consing of compound types.
//!
//! `void` and `number` are allocated once when the table is created. Pointer
//! and function types are looked up by their structure before anything is
//! allocated, so a duplicate never reaches the arena.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use super::types::{FunctionType, Type, TypeRef};
use crate::{adt::IntrusiveList, alloc::Arena};

/// Structural key of a compound type. Nested types are already canonical,
/// so comparing them by address is structural comparison.
#[derive(PartialEq, Eq, Hash)]
enum Shape<'a> {
    Pointer(TypeRef<'a>),
    Function(Vec<TypeRef<'a>>, TypeRef<'a>),
}

pub struct TypeTable<'a> {
    arena: &'a Arena,
    void: TypeRef<'a>,
    number: TypeRef<'a>,
    interned: RefCell<FxHashMap<Shape<'a>, TypeRef<'a>>>,
}

impl<'a> TypeTable<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        TypeTable {
            arena,
            void: TypeRef::new(arena.alloc(Type::Void)),
            number: TypeRef::new(arena.alloc(Type::Number)),
            interned: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn void_type(&self) -> TypeRef<'a> {
        self.void
    }

    pub fn number_type(&self) -> TypeRef<'a> {
        self.number
    }

    /// Canonical `&pointee`.
    pub fn pointer(&self, pointee: TypeRef<'a>) -> TypeRef<'a> {
        self.intern(Shape::Pointer(pointee), |_| Type::Pointer(pointee))
    }

    /// Canonical `fn(params...): ret`.
    pub fn function(&self, params: &[TypeRef<'a>], ret: TypeRef<'a>) -> TypeRef<'a> {
        self.intern(Shape::Function(params.to_vec(), ret), |arena| {
            Type::Function(FunctionType {
                params: IntrusiveList::from_iter_in(arena, params.iter().copied()),
                ret,
            })
        })
    }

    /// Returns the canonical instance of a type built anywhere, recursing
    /// into pointees, parameters and return types.
    pub fn make(&self, candidate: &Type<'_>) -> TypeRef<'a> {
        match candidate {
            Type::Void => self.void,
            Type::Number => self.number,
            Type::Pointer(pointee) => {
                let pointee = self.make(pointee);
                self.pointer(pointee)
            }
            Type::Function(function) => {
                let params: Vec<_> = function.params().map(|param| self.make(&param)).collect();
                let ret = self.make(&function.ret);
                self.function(&params, ret)
            }
        }
    }

    /// Number of distinct types, including `void` and `number`.
    pub fn num_types(&self) -> usize {
        self.interned.borrow().len() + 2
    }

    fn intern(
        &self,
        shape: Shape<'a>,
        build: impl FnOnce(&'a Arena) -> Type<'a>,
    ) -> TypeRef<'a> {
        if let Some(existing) = self.interned.borrow().get(&shape) {
            return *existing;
        }

        let ty = TypeRef::new(self.arena.alloc(build(self.arena)));
        self.interned.borrow_mut().insert(shape, ty);
        ty
    }
}
