//! Literal values for constants, defaults, and annotation applications.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A literal value.
///
/// The variant mirrors the declared [`Type`](crate::Type) it was written
/// against; a struct value lists only the fields that were set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Value {
    /// No value.
    Void,
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    Int8(i8),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 8-bit unsigned integer.
    Uint8(u8),
    /// 16-bit unsigned integer.
    Uint16(u16),
    /// 32-bit unsigned integer.
    Uint32(u32),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 text.
    Text(String),
    /// Opaque bytes.
    Data(Vec<u8>),
    /// List elements.
    List(Vec<Value>),
    /// Enumerant ordinal.
    Enum(u16),
    /// Fields that were set, by name.
    Struct(Vec<FieldValue>),
    /// Interface value (never present in schema files).
    Interface,
    /// Untyped pointer value (never present in schema files).
    AnyPointer,
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Looks up a set field of a struct value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Struct(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.value),
            _ => None,
        }
    }
}

/// One set field of a struct value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldValue {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: Value,
}

impl FieldValue {
    /// Creates a field value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
