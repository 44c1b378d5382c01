use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    ops::Deref,
    ptr,
};

use crate::adt::IntrusiveList;

#[derive(Debug)]
pub enum Type<'a> {
    Void,
    Number,
    Pointer(TypeRef<'a>),
    Function(FunctionType<'a>),
}

impl<'a> Type<'a> {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Type::Number)
    }

    pub fn pointee(&self) -> Option<TypeRef<'a>> {
        match self {
            Type::Pointer(pointee) => Some(*pointee),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType<'a>> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// Parameter types in order, followed by the return type.
#[derive(Debug, Clone, Copy)]
pub struct FunctionType<'a> {
    pub params: IntrusiveList<'a, TypeRef<'a>>,
    pub ret: TypeRef<'a>,
}

impl<'a> FunctionType<'a> {
    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> impl Iterator<Item = TypeRef<'a>> {
        self.params.iter().copied()
    }
}

/// Handle to a canonical type.
///
/// Every `TypeRef` handed out by [`TypeTable`](super::TypeTable) points at
/// the single interned instance of its structure, so equality and hashing
/// only look at the address.
#[derive(Clone, Copy)]
pub struct TypeRef<'a>(&'a Type<'a>);

impl<'a> TypeRef<'a> {
    pub(crate) fn new(ty: &'a Type<'a>) -> Self {
        TypeRef(ty)
    }

    pub fn get(self) -> &'a Type<'a> {
        self.0
    }
}

impl<'a> Deref for TypeRef<'a> {
    type Target = Type<'a>;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl PartialEq for TypeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Eq for TypeRef<'_> {}

impl Hash for TypeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state)
    }
}

impl Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

impl Display for TypeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Type::Void => write!(f, "void"),
            Type::Number => write!(f, "number"),
            Type::Pointer(pointee) => write!(f, "&{}", pointee),
            Type::Function(function) => {
                write!(f, "fn(")?;
                for (i, param) in function.params().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, "): {}", function.ret)
            }
        }
    }
}
