//! Intermediate tree built during traversal.
//!
//! Nodes live in an arena ([`AstTree`]) and refer to each other by
//! [`AstId`]. Detaching a node tombstones it: it keeps its slot and its
//! parent link, drops out of [`AstTree::children`], and stays visible to
//! [`AstTree::all_children`] so named-type resolution can still find it.

use std::collections::BTreeSet;
use std::fmt;

use capnparquet_parquet::NodeRef;
use capnparquet_schema::{AnnotationTarget, Error, ErrorKind, NodeId, Result, TypeKind};

use crate::classify::Classification;
use crate::semantic::AnnotationFacts;

/// Index of a node in an [`AstTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AstId(usize);

impl AstId {
    /// The arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of an AST node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AstKind {
    /// A schema file.
    File,
    /// A struct declaration.
    Struct,
    /// An enum declaration.
    Enum,
    /// An interface declaration.
    Interface,
    /// A constant declaration.
    Const,
    /// An annotation declaration or an applied annotation.
    Annotation,
    /// A struct field.
    Field,
    /// An enum enumerant.
    Enumerant,
    /// A resolved type position.
    Type,
    /// A literal value position.
    Value,
}

impl AstKind {
    /// Lower-case category name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Const => "const",
            Self::Annotation => "annotation",
            Self::Field => "field",
            Self::Enumerant => "enumerant",
            Self::Type => "type",
            Self::Value => "value",
        }
    }
}

/// A literal copied from the schema, tagged by primitive kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Text.
    String(String),
    /// Bytes.
    Binary(Vec<u8>),
}

impl Literal {
    /// Reads an integer literal as `i32`, if it fits.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Self::I8(v) => Some(i32::from(v)),
            Self::I16(v) => Some(i32::from(v)),
            Self::I32(v) => Some(v),
            Self::I64(v) => i32::try_from(v).ok(),
            Self::U8(v) => Some(i32::from(v)),
            Self::U16(v) => Some(i32::from(v)),
            Self::U32(v) => i32::try_from(v).ok(),
            Self::U64(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Reads a text literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A declaration referenced by a type position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    /// Referenced node id.
    pub id: NodeId,
    /// Referenced node's unqualified name.
    pub name: String,
}

/// One node of the intermediate tree.
#[derive(Clone, Debug)]
pub struct AstNode {
    /// Category.
    pub kind: AstKind,
    /// Display name.
    pub name: String,
    /// Schema node id (declarations and applied annotations).
    pub node_id: Option<NodeId>,
    /// Enclosing scope id (declarations).
    pub scope_id: Option<NodeId>,
    /// Explicit field ordinal, or enumerant/enum value ordinal.
    pub ordinal: Option<u16>,
    /// Slot offset (fields).
    pub offset: Option<u32>,
    /// Originating schema type category.
    pub source: Option<TypeKind>,
    /// True for nodes created from a declaration.
    pub declared: bool,
    /// True when a slot field had an explicit default.
    pub had_default: bool,
    /// True for unconstrained any-pointer types.
    pub unconstrained: bool,
    /// Declaration referenced by an enum, struct or interface type.
    pub type_ref: Option<TypeRef>,
    /// Symbolic name of an enum value.
    pub enumerant_name: Option<String>,
    /// Copied literal payload.
    pub literal: Option<Literal>,
    /// Facts gathered from applied annotation children.
    pub facts: AnnotationFacts,
    /// Kinds of declaration an annotation declaration applies to.
    pub targets: BTreeSet<AnnotationTarget>,
    /// Result of classification, once finalized.
    pub classification: Option<Classification>,
    /// True while a struct reference waits for its declaration to be inlined.
    pub unresolved: bool,
    parent: Option<AstId>,
    children: Vec<AstId>,
    detached: bool,
    target: Option<NodeRef>,
}

impl AstNode {
    /// Creates a node with no metadata.
    #[must_use]
    pub fn new(kind: AstKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            node_id: None,
            scope_id: None,
            ordinal: None,
            offset: None,
            source: None,
            declared: false,
            had_default: false,
            unconstrained: false,
            type_ref: None,
            enumerant_name: None,
            literal: None,
            facts: AnnotationFacts::default(),
            targets: BTreeSet::new(),
            classification: None,
            unresolved: false,
            parent: None,
            children: Vec::new(),
            detached: false,
            target: None,
        }
    }

    /// Sets the schema node id.
    #[must_use]
    pub fn with_node_id(mut self, id: NodeId) -> Self {
        self.node_id = Some(id);
        self
    }

    /// Sets the source type category.
    #[must_use]
    pub fn with_source(mut self, source: TypeKind) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns true for applied annotations (as opposed to declarations).
    #[must_use]
    pub fn is_applied_annotation(&self) -> bool {
        self.kind == AstKind::Annotation && !self.declared
    }

    /// The parent node.
    #[must_use]
    pub fn parent(&self) -> Option<AstId> {
        self.parent
    }

    /// True once the node has been tombstoned.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// The finished target schema node.
    #[must_use]
    pub fn target(&self) -> Option<&NodeRef> {
        self.target.as_ref()
    }

    /// True when the node is composite.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.classification.is_some_and(|c| c.is_composite())
    }
}

/// Arena of [`AstNode`]s.
#[derive(Clone, Debug, Default)]
pub struct AstTree {
    nodes: Vec<AstNode>,
}

impl AstTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` as the last child of `parent`, or as a root.
    pub fn push(&mut self, mut node: AstNode, parent: Option<AstId>) -> AstId {
        let id = AstId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Returns the node at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn get(&self, id: AstId) -> &AstNode {
        &self.nodes[id.0]
    }

    /// Returns the node at `id` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn get_mut(&mut self, id: AstId) -> &mut AstNode {
        &mut self.nodes[id.0]
    }

    /// The first node pushed without a parent.
    #[must_use]
    pub fn root(&self) -> Option<AstId> {
        self.nodes
            .iter()
            .position(|n| n.parent.is_none())
            .map(AstId)
    }

    /// Number of nodes, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live children of `id`, in insertion order.
    pub fn children(&self, id: AstId) -> impl Iterator<Item = AstId> + '_ {
        self.all_children(id).filter(|c| !self.nodes[c.0].detached)
    }

    /// Children of `id` including tombstoned ones.
    pub fn all_children(&self, id: AstId) -> impl Iterator<Item = AstId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// `id`'s parent, grandparent, and so on up to the root.
    pub fn ancestors(&self, id: AstId) -> impl Iterator<Item = AstId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, |p| self.nodes[p.0].parent)
    }

    /// Tombstones `id`. Its subtree is left untouched.
    pub fn detach(&mut self, id: AstId) {
        self.nodes[id.0].detached = true;
    }

    /// Records the target schema node of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::TargetAlreadySet`] if `id` already has one.
    pub fn set_target(&mut self, id: AstId, target: NodeRef) -> Result<()> {
        let node = &mut self.nodes[id.0];
        if node.target.is_some() {
            return Err(Error::new(ErrorKind::TargetAlreadySet(format!(
                "{id} ({} {})",
                node.kind.name(),
                node.name
            ))));
        }
        node.target = Some(target);
        Ok(())
    }

    /// Swaps the target of an already finalized node, returning the old one.
    pub(crate) fn replace_target(&mut self, id: AstId, target: NodeRef) -> Option<NodeRef> {
        self.nodes[id.0].target.replace(target)
    }

    /// Live nodes below `id`, depth first in insertion order.
    #[must_use]
    pub fn descendants(&self, id: AstId) -> Vec<AstId> {
        let mut out = Vec::new();
        let mut stack: Vec<AstId> = self.children(id).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let start = stack.len();
            stack.extend(self.children(next));
            stack[start..].reverse();
        }
        out
    }

    /// Iterates over every node id, tombstones included.
    pub fn ids(&self) -> impl Iterator<Item = AstId> {
        (0..self.nodes.len()).map(AstId)
    }
}
