//! Declaration nodes.
//!
//! A [`Node`] is one entry of the compiler's node table: a file, struct,
//! enum, interface, constant, or annotation declaration. Nodes refer to one
//! another by [`NodeId`]; the [`SchemaGraph`](crate::SchemaGraph) resolves
//! those references.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Type;
use crate::value::Value;

/// Unique 64-bit id of a declaration.
pub type NodeId = u64;

/// A declaration in the schema graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Unique id.
    pub id: NodeId,
    /// Fully qualified display name, e.g. `shapes.capnp:Shape.Corner`.
    pub display_name: String,
    /// Length of the qualifying prefix of `display_name`.
    pub display_name_prefix_length: usize,
    /// Id of the lexically enclosing declaration (0 for files).
    pub scope_id: NodeId,
    /// Declarations nested inside this one, in declaration order.
    pub nested_nodes: Vec<NestedNode>,
    /// Annotations applied to this declaration.
    pub annotations: Vec<Annotation>,
    /// Category-specific body.
    pub kind: NodeKind,
}

impl Node {
    /// Creates a node, deriving the display name prefix from the qualified name.
    #[must_use]
    pub fn new(id: NodeId, display_name: impl Into<String>, kind: NodeKind) -> Self {
        let display_name = display_name.into();
        let display_name_prefix_length =
            default_prefix_length(&display_name, matches!(kind, NodeKind::File));
        Self {
            id,
            display_name,
            display_name_prefix_length,
            scope_id: 0,
            nested_nodes: Vec::new(),
            annotations: Vec::new(),
            kind,
        }
    }

    /// Creates a file node.
    #[must_use]
    pub fn file(id: NodeId, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, NodeKind::File)
    }

    /// Sets the enclosing scope.
    #[must_use]
    pub fn with_scope(mut self, scope_id: NodeId) -> Self {
        self.scope_id = scope_id;
        self
    }

    /// Appends a nested declaration.
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, id: NodeId) -> Self {
        self.nested_nodes.push(NestedNode {
            name: name.into(),
            id,
        });
        self
    }

    /// Appends an applied annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns the unqualified name, e.g. `Corner` for `shapes.capnp:Shape.Corner`.
    #[must_use]
    pub fn short_display_name(&self) -> &str {
        self.display_name
            .get(self.display_name_prefix_length..)
            .unwrap_or(&self.display_name)
    }

    /// Returns the struct body, if this is a struct.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructNode> {
        match &self.kind {
            NodeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the enum body, if this is an enum.
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumNode> {
        match &self.kind {
            NodeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the annotation declaration body, if this is one.
    #[must_use]
    pub fn as_annotation(&self) -> Option<&AnnotationNode> {
        match &self.kind {
            NodeKind::Annotation(a) => Some(a),
            _ => None,
        }
    }

    /// Returns true if this is a file node.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File)
    }
}

fn default_prefix_length(display_name: &str, is_file: bool) -> usize {
    if is_file {
        return display_name.rfind('/').map_or(0, |i| i + 1);
    }
    let start = display_name.rfind(':').map_or(0, |i| i + 1);
    display_name[start..]
        .rfind('.')
        .map_or(start, |i| start + i + 1)
}

/// Category-specific body of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NodeKind {
    /// A schema file.
    File,
    /// A struct or group.
    Struct(StructNode),
    /// An enum.
    Enum(EnumNode),
    /// An interface.
    Interface(InterfaceNode),
    /// A constant.
    Const(ConstNode),
    /// An annotation declaration.
    Annotation(AnnotationNode),
}

impl NodeKind {
    /// Returns the lower-case category name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
            Self::Interface(_) => "interface",
            Self::Const(_) => "const",
            Self::Annotation(_) => "annotation",
        }
    }
}

/// Reference from a scope to a declaration nested inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestedNode {
    /// Unqualified name.
    pub name: String,
    /// Id of the nested node.
    pub id: NodeId,
}

// =============================================================================
// Structs and Fields
// =============================================================================

/// Body of a struct or group declaration.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructNode {
    /// True when this struct is a group nested inline in a field.
    pub is_group: bool,
    /// Number of union members (0 when the struct has no union).
    pub discriminant_count: u16,
    /// Fields in ordinal order.
    pub fields: Vec<Field>,
}

impl StructNode {
    /// Creates a struct body from its fields.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        let discriminant_count = fields.iter().filter(|f| f.discriminant.is_some()).count();
        Self {
            is_group: false,
            discriminant_count: u16::try_from(discriminant_count).unwrap_or(u16::MAX),
            fields,
        }
    }

    /// Creates a group body from its fields.
    #[must_use]
    pub fn group(fields: Vec<Field>) -> Self {
        Self {
            is_group: true,
            ..Self::new(fields)
        }
    }

    /// Fields that are members of the unnamed union.
    pub fn union_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.discriminant.is_some())
    }

    /// Fields outside the union.
    pub fn non_union_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.discriminant.is_none())
    }
}

/// A struct field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Position in source order.
    pub code_order: u16,
    /// Declared ordinal (`@N`).
    pub ordinal: Ordinal,
    /// Union discriminant value, when the field is a union member.
    pub discriminant: Option<u16>,
    /// Annotations applied to the field.
    pub annotations: Vec<Annotation>,
    /// Slot or group.
    pub kind: FieldKind,
}

impl Field {
    /// Creates a slot field of the given type.
    #[must_use]
    pub fn slot(name: impl Into<String>, ty: Type) -> Self {
        Self::with_kind(
            name,
            FieldKind::Slot(Slot {
                offset: 0,
                ty,
                default_value: None,
                had_explicit_default: false,
            }),
        )
    }

    /// Creates a group field backed by the group node `type_id`.
    #[must_use]
    pub fn group(name: impl Into<String>, type_id: NodeId) -> Self {
        Self::with_kind(name, FieldKind::Group { type_id })
    }

    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            code_order: 0,
            ordinal: Ordinal::Implicit,
            discriminant: None,
            annotations: Vec::new(),
            kind,
        }
    }

    /// Sets an explicit ordinal.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: u16) -> Self {
        self.ordinal = Ordinal::Explicit(ordinal);
        self
    }

    /// Sets the source-order position.
    #[must_use]
    pub fn with_code_order(mut self, code_order: u16) -> Self {
        self.code_order = code_order;
        self
    }

    /// Marks the field as a union member.
    #[must_use]
    pub fn with_discriminant(mut self, discriminant: u16) -> Self {
        self.discriminant = Some(discriminant);
        self
    }

    /// Sets the slot offset. No effect on group fields.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        if let FieldKind::Slot(slot) = &mut self.kind {
            slot.offset = offset;
        }
        self
    }

    /// Sets an explicit default value. No effect on group fields.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        if let FieldKind::Slot(slot) = &mut self.kind {
            slot.default_value = Some(value);
            slot.had_explicit_default = true;
        }
        self
    }

    /// Appends an applied annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns the slot, if this is a slot field.
    #[must_use]
    pub fn as_slot(&self) -> Option<&Slot> {
        match &self.kind {
            FieldKind::Slot(slot) => Some(slot),
            FieldKind::Group { .. } => None,
        }
    }
}

/// Whether a field stores a value or groups other fields inline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldKind {
    /// A plain value field.
    Slot(Slot),
    /// An inline group.
    Group {
        /// Id of the group's struct node.
        type_id: NodeId,
    },
}

/// Storage of a slot field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    /// Offset in units of the field's size.
    pub offset: u32,
    /// Declared type.
    pub ty: Type,
    /// Default value, if any.
    pub default_value: Option<Value>,
    /// True when the default was written in the source.
    pub had_explicit_default: bool,
}

/// Declared field ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Ordinal {
    /// No `@N` in the source.
    #[default]
    Implicit,
    /// `@N`.
    Explicit(u16),
}

impl Ordinal {
    /// Returns the explicit ordinal, if any.
    #[must_use]
    pub const fn explicit(self) -> Option<u16> {
        match self {
            Self::Implicit => None,
            Self::Explicit(n) => Some(n),
        }
    }
}

// =============================================================================
// Enums, Interfaces, Constants
// =============================================================================

/// Body of an enum declaration.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumNode {
    /// Enumerants in ordinal order.
    pub enumerants: Vec<Enumerant>,
}

impl EnumNode {
    /// Creates an enum body from enumerant names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enumerants: names.into_iter().map(Enumerant::new).collect(),
        }
    }
}

/// One named constant of an enum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enumerant {
    /// Enumerant name.
    pub name: String,
    /// Position in source order.
    pub code_order: u16,
    /// Annotations applied to the enumerant.
    pub annotations: Vec<Annotation>,
}

impl Enumerant {
    /// Creates an enumerant.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code_order: 0,
            annotations: Vec::new(),
        }
    }

    /// Appends an applied annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Body of an interface declaration.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterfaceNode {
    /// Methods in ordinal order.
    pub methods: Vec<Method>,
}

/// An interface method.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Position in source order.
    pub code_order: u16,
    /// Generic parameter names; non-empty for generic methods.
    pub implicit_parameters: Vec<String>,
    /// Id of the parameter struct.
    pub param_struct_type: NodeId,
    /// Id of the result struct.
    pub result_struct_type: NodeId,
    /// Annotations applied to the method.
    pub annotations: Vec<Annotation>,
}

impl Method {
    /// Creates a method with the given parameter and result structs.
    #[must_use]
    pub fn new(name: impl Into<String>, params: NodeId, results: NodeId) -> Self {
        Self {
            name: name.into(),
            code_order: 0,
            implicit_parameters: Vec::new(),
            param_struct_type: params,
            result_struct_type: results,
            annotations: Vec::new(),
        }
    }

    /// Makes the method generic over the given parameter names.
    #[must_use]
    pub fn with_implicit_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an applied annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Body of a constant declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstNode {
    /// Declared type.
    pub ty: Type,
    /// Constant value.
    pub value: Value,
}

// =============================================================================
// Annotations
// =============================================================================

/// Body of an annotation declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotationNode {
    /// Type of the value an application carries.
    pub ty: Type,
    /// Declaration kinds this annotation may be applied to.
    pub targets: Vec<AnnotationTarget>,
}

impl AnnotationNode {
    /// Creates an annotation declaration with no targets.
    #[must_use]
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            targets: Vec::new(),
        }
    }

    /// Creates an annotation declaration applicable everywhere (`(*)`).
    #[must_use]
    pub fn everywhere(ty: Type) -> Self {
        Self {
            ty,
            targets: AnnotationTarget::ALL.to_vec(),
        }
    }

    /// Adds a target.
    #[must_use]
    pub fn targeting(mut self, target: AnnotationTarget) -> Self {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
        self
    }

    /// Returns true if the annotation may be applied to `target`.
    #[must_use]
    pub fn applies_to(&self, target: AnnotationTarget) -> bool {
        self.targets.contains(&target)
    }
}

/// A kind of declaration an annotation may be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AnnotationTarget {
    /// Struct declarations.
    Struct,
    /// Interface declarations.
    Interface,
    /// Group fields.
    Group,
    /// Enum declarations.
    Enum,
    /// Files.
    File,
    /// Fields.
    Field,
    /// Unions.
    Union,
    /// Enumerants.
    Enumerant,
    /// Annotation declarations.
    Annotation,
    /// Constants.
    Const,
    /// Method parameters.
    Param,
    /// Methods.
    Method,
}

impl AnnotationTarget {
    /// Every target, in the fixed order they are reported.
    pub const ALL: [AnnotationTarget; 12] = [
        Self::Struct,
        Self::Interface,
        Self::Group,
        Self::Enum,
        Self::File,
        Self::Field,
        Self::Union,
        Self::Enumerant,
        Self::Annotation,
        Self::Const,
        Self::Param,
        Self::Method,
    ];

    /// Returns the target name as written in schema source.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Group => "group",
            Self::Enum => "enum",
            Self::File => "file",
            Self::Field => "field",
            Self::Union => "union",
            Self::Enumerant => "enumerant",
            Self::Annotation => "annotation",
            Self::Const => "const",
            Self::Param => "param",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for AnnotationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An annotation applied to a declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    /// Id of the annotation declaration.
    pub id: NodeId,
    /// Applied value, typed by the declaration.
    pub value: Value,
}

impl Annotation {
    /// Creates an applied annotation.
    #[must_use]
    pub fn new(id: NodeId, value: Value) -> Self {
        Self { id, value }
    }

    /// Creates a void-valued annotation.
    #[must_use]
    pub fn marker(id: NodeId) -> Self {
        Self::new(id, Value::Void)
    }
}
