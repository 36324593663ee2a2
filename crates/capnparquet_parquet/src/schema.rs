//! Parquet schema nodes.
//!
//! Construction never fails; [`SchemaDescriptor`](crate::SchemaDescriptor)
//! checks the finished tree.

use std::rc::Rc;

use crate::types::{LogicalType, PhysicalType, Repetition};

/// Shared handle to a schema node.
///
/// A group owns its children through these handles. Each use site of a
/// flattened struct gets its own group, so handles are only shared while a
/// child is being moved into its parent.
pub type NodeRef = Rc<SchemaNode>;

/// A node of a Parquet schema tree.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaNode {
    /// A leaf column.
    Primitive(PrimitiveNode),
    /// A nested group.
    Group(GroupNode),
}

impl SchemaNode {
    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => &p.name,
            Self::Group(g) => &g.name,
        }
    }

    /// The field repetition.
    #[must_use]
    pub fn repetition(&self) -> Repetition {
        match self {
            Self::Primitive(p) => p.repetition,
            Self::Group(g) => g.repetition,
        }
    }

    /// The logical annotation.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Self::Primitive(p) => p.logical_type,
            Self::Group(g) => g.logical_type,
        }
    }

    /// Returns true for groups.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Returns the group, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Self::Group(g) => Some(g),
            Self::Primitive(_) => None,
        }
    }

    /// Returns the primitive, if this is one.
    #[must_use]
    pub fn as_primitive(&self) -> Option<&PrimitiveNode> {
        match self {
            Self::Primitive(p) => Some(p),
            Self::Group(_) => None,
        }
    }

    /// Wraps the node in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> NodeRef {
        Rc::new(self)
    }
}

impl From<PrimitiveNode> for SchemaNode {
    fn from(node: PrimitiveNode) -> Self {
        Self::Primitive(node)
    }
}

impl From<GroupNode> for SchemaNode {
    fn from(node: GroupNode) -> Self {
        Self::Group(node)
    }
}

/// Precision and scale of a decimal column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalMetadata {
    /// Total number of digits.
    pub precision: i32,
    /// Digits after the decimal point.
    pub scale: i32,
}

/// A leaf column.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveNode {
    /// Field name.
    pub name: String,
    /// Field repetition.
    pub repetition: Repetition,
    /// Storage type.
    pub physical_type: PhysicalType,
    /// Logical annotation.
    pub logical_type: LogicalType,
    /// Byte length for fixed-length arrays.
    pub type_length: Option<i32>,
    /// Precision and scale for decimals.
    pub decimal: Option<DecimalMetadata>,
}

impl PrimitiveNode {
    /// Creates a primitive node.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        repetition: Repetition,
        physical_type: PhysicalType,
        logical_type: LogicalType,
    ) -> Self {
        Self {
            name: name.into(),
            repetition,
            physical_type,
            logical_type,
            type_length: None,
            decimal: None,
        }
    }

    /// Sets the fixed byte length.
    #[must_use]
    pub fn with_length(mut self, length: i32) -> Self {
        self.type_length = Some(length);
        self
    }

    /// Sets decimal precision and scale.
    #[must_use]
    pub fn with_decimal(mut self, precision: i32, scale: i32) -> Self {
        self.decimal = Some(DecimalMetadata { precision, scale });
        self
    }
}

/// A group of fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupNode {
    /// Field name.
    pub name: String,
    /// Field repetition.
    pub repetition: Repetition,
    /// Logical annotation.
    pub logical_type: LogicalType,
    /// Child fields in order.
    pub fields: Vec<NodeRef>,
}

impl GroupNode {
    /// Creates a group node.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        repetition: Repetition,
        logical_type: LogicalType,
        fields: Vec<NodeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            repetition,
            logical_type,
            fields,
        }
    }

    /// Number of direct children.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&NodeRef> {
        self.fields.get(index)
    }

    /// Returns the first child named `name`.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&NodeRef> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
