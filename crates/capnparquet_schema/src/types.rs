//! Field and value types of the declaration graph.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// The type of a field slot, constant, or annotation value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Type {
    /// No value.
    Void,
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 text.
    Text,
    /// Opaque bytes.
    Data,
    /// Homogeneous list.
    List(Box<Type>),
    /// Reference to an enum declaration.
    Enum {
        /// Id of the enum node.
        type_id: NodeId,
    },
    /// Reference to a struct declaration.
    Struct {
        /// Id of the struct node.
        type_id: NodeId,
    },
    /// Reference to an interface declaration.
    Interface {
        /// Id of the interface node.
        type_id: NodeId,
    },
    /// Untyped pointer.
    AnyPointer {
        /// True when the pointer carries no constraint at all.
        unconstrained: bool,
    },
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a struct reference.
    #[must_use]
    pub const fn structure(type_id: NodeId) -> Self {
        Self::Struct { type_id }
    }

    /// Creates an enum reference.
    #[must_use]
    pub const fn enumeration(type_id: NodeId) -> Self {
        Self::Enum { type_id }
    }

    /// Returns the fieldless discriminant of this type.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Void => TypeKind::Void,
            Self::Bool => TypeKind::Bool,
            Self::Int8 => TypeKind::Int8,
            Self::Int16 => TypeKind::Int16,
            Self::Int32 => TypeKind::Int32,
            Self::Int64 => TypeKind::Int64,
            Self::Uint8 => TypeKind::Uint8,
            Self::Uint16 => TypeKind::Uint16,
            Self::Uint32 => TypeKind::Uint32,
            Self::Uint64 => TypeKind::Uint64,
            Self::Float32 => TypeKind::Float32,
            Self::Float64 => TypeKind::Float64,
            Self::Text => TypeKind::Text,
            Self::Data => TypeKind::Data,
            Self::List(_) => TypeKind::List,
            Self::Enum { .. } => TypeKind::Enum,
            Self::Struct { .. } => TypeKind::Struct,
            Self::Interface { .. } => TypeKind::Interface,
            Self::AnyPointer { .. } => TypeKind::AnyPointer,
        }
    }

    /// Returns the referenced declaration id for enum, struct and interface types.
    #[must_use]
    pub const fn referenced_id(&self) -> Option<NodeId> {
        match self {
            Self::Enum { type_id } | Self::Struct { type_id } | Self::Interface { type_id } => {
                Some(*type_id)
            }
            _ => None,
        }
    }

    /// Returns the element type of a list.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(element) => write!(f, "List({element})"),
            Self::Enum { type_id } | Self::Struct { type_id } | Self::Interface { type_id } => {
                write!(f, "{}@{type_id:#x}", self.kind())
            }
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// The category of a type without its payload.
///
/// This is the "source category" the mapping engine classifies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TypeKind {
    /// No value.
    Void,
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 text.
    Text,
    /// Opaque bytes.
    Data,
    /// List.
    List,
    /// Enum.
    Enum,
    /// Struct or group.
    Struct,
    /// Interface.
    Interface,
    /// Untyped pointer.
    AnyPointer,
}

impl TypeKind {
    /// Every kind, in schema declaration order.
    pub const ALL: [TypeKind; 19] = [
        Self::Void,
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::Text,
        Self::Data,
        Self::List,
        Self::Enum,
        Self::Struct,
        Self::Interface,
        Self::AnyPointer,
    ];

    /// Returns the lower-case schema name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Text => "text",
            Self::Data => "data",
            Self::List => "list",
            Self::Enum => "enum",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::AnyPointer => "anypointer",
        }
    }

    /// Returns true for the eight integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
