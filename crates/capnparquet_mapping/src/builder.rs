//! Visitor that grows the AST and finalizes each node as it closes.

use capnparquet_schema::{
    Annotation, AnnotationNode, Enumerant, Error, Field, NestedNode, Node, NodeKind, RequestedFile,
    Result, Slot, Type, TypeKind, Value,
};
use capnparquet_traversal::{Cursor, SchemaVisitor, Visit, walk_type};
use tracing::trace;

use crate::ast::{AstId, AstKind, AstNode, AstTree, Literal, TypeRef};
use crate::mapper::finalize;

/// Builds an [`AstTree`] while being walked over one file.
///
/// Every hook that creates a node pushes it on the open stack; the matching
/// exit hook finalizes it and pops it. New nodes become the last child of
/// the node on top of the stack.
#[derive(Debug, Default)]
pub struct AstBuilder {
    tree: AstTree,
    open: Vec<AstId>,
    error: Option<Error>,
}

impl AstBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree built so far.
    #[must_use]
    pub fn tree(&self) -> &AstTree {
        &self.tree
    }

    /// Number of nodes still open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Finishes building and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while finalizing a node, or an
    /// internal error if the walk left nodes open.
    pub fn finish(self) -> Result<AstTree> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.open.is_empty() {
            return Err(Error::internal(format!(
                "{} AST nodes left open after traversal",
                self.open.len()
            )));
        }
        Ok(self.tree)
    }

    fn open(&mut self, node: AstNode) -> AstId {
        let parent = self.open.last().copied();
        trace!(kind = node.kind.name(), name = %node.name, depth = self.open.len(), "open");
        let id = self.tree.push(node, parent);
        self.open.push(id);
        id
    }

    fn close(&mut self) {
        let Some(id) = self.open.pop() else {
            self.fail(Error::internal("close without an open AST node"));
            return;
        };
        if self.error.is_none() {
            if let Err(error) = finalize(&mut self.tree, id) {
                self.fail(error);
            }
        }
    }

    fn current(&mut self) -> Option<&mut AstNode> {
        let id = *self.open.last()?;
        Some(self.tree.get_mut(id))
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl<'g> SchemaVisitor<'g> for AstBuilder {
    fn enter_file(&mut self, _: &mut Cursor<'g>, _: &'g RequestedFile, node: &'g Node) -> Visit {
        self.open(AstNode::new(AstKind::File, &node.display_name).with_node_id(node.id));
        Visit::Continue
    }

    fn leave_file(&mut self, _: &mut Cursor<'g>, _: &'g RequestedFile, _: &'g Node) {
        self.close();
    }

    fn enter_decl(&mut self, _: &mut Cursor<'g>, _: &'g NestedNode, node: &'g Node) -> Visit {
        let (kind, source) = match &node.kind {
            NodeKind::File => return Visit::AbortSubtree,
            NodeKind::Struct(_) => (AstKind::Struct, Some(TypeKind::Struct)),
            NodeKind::Enum(_) => (AstKind::Enum, Some(TypeKind::Enum)),
            NodeKind::Interface(_) => (AstKind::Interface, Some(TypeKind::Interface)),
            NodeKind::Const(_) => (AstKind::Const, None),
            NodeKind::Annotation(_) => (AstKind::Annotation, None),
        };
        let mut ast = AstNode::new(kind, node.short_display_name()).with_node_id(node.id);
        ast.scope_id = Some(node.scope_id);
        ast.source = source;
        ast.declared = true;
        self.open(ast);
        Visit::Continue
    }

    fn leave_decl(&mut self, _: &mut Cursor<'g>, _: &'g NestedNode, _: &'g Node) {
        self.close();
    }

    fn enter_annotation_decl(&mut self, _: &mut Cursor<'g>, _: &'g Node, body: &'g AnnotationNode) -> Visit {
        if let Some(node) = self.current() {
            node.targets.extend(body.targets.iter().copied());
        }
        Visit::Continue
    }

    fn enter_annotation(&mut self, _: &mut Cursor<'g>, _: &'g Annotation, decl: &'g Node) -> Visit {
        self.open(AstNode::new(AstKind::Annotation, decl.short_display_name()).with_node_id(decl.id));
        Visit::Continue
    }

    fn leave_annotation(&mut self, _: &mut Cursor<'g>, _: &'g Annotation, _: &'g Node) {
        self.close();
    }

    fn enter_struct_field(&mut self, _: &mut Cursor<'g>, field: &'g Field) -> Visit {
        let mut ast = AstNode::new(AstKind::Field, &field.name);
        ast.ordinal = field.ordinal.explicit();
        self.open(ast);
        Visit::Continue
    }

    fn leave_struct_field(&mut self, _: &mut Cursor<'g>, _: &'g Field) {
        self.close();
    }

    fn enter_field_slot(&mut self, _: &mut Cursor<'g>, _: &'g Field, slot: &'g Slot) -> Visit {
        if let Some(node) = self.current() {
            node.offset = Some(slot.offset);
            node.had_default = slot.had_explicit_default;
            node.source = Some(slot.ty.kind());
        }
        Visit::Continue
    }

    fn enter_field_group(&mut self, _: &mut Cursor<'g>, _: &'g Field, _: &'g Node) -> Visit {
        if let Some(node) = self.current() {
            node.source = Some(TypeKind::Struct);
        }
        Visit::Continue
    }

    fn enter_enumerant(&mut self, _: &mut Cursor<'g>, ordinal: u16, enumerant: &'g Enumerant) -> Visit {
        let mut ast = AstNode::new(AstKind::Enumerant, &enumerant.name);
        ast.ordinal = Some(ordinal);
        self.open(ast);
        Visit::Continue
    }

    fn leave_enumerant(&mut self, _: &mut Cursor<'g>, _: u16, _: &'g Enumerant) {
        self.close();
    }

    fn enter_type(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type) -> Visit {
        let kind = ty.kind();
        let mut ast = AstNode::new(AstKind::Type, kind.name()).with_source(kind);
        ast.unconstrained = matches!(ty, Type::AnyPointer { unconstrained: true });
        if let Some(id) = ty.referenced_id() {
            ast.type_ref = cursor
                .graph()
                .short_display_name(id)
                .map(|name| TypeRef { id, name: name.to_owned() });
        }
        self.open(ast);

        // The list node needs its element finalized before it can be.
        if let Type::List(element) = ty {
            walk_type(self, cursor, element);
            self.close();
            return Visit::Handled;
        }
        Visit::Continue
    }

    fn leave_type(&mut self, _: &mut Cursor<'g>, _: &'g Type) {
        self.close();
    }

    fn enter_value(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type, value: &'g Value) -> Visit {
        // Named after the field, constant or annotation that holds it.
        let name = self
            .open
            .last()
            .map(|id| self.tree.get(*id).name.clone())
            .unwrap_or_default();
        let mut ast = AstNode::new(AstKind::Value, name).with_source(ty.kind());
        ast.literal = literal(value);
        if let (Type::Enum { type_id }, Value::Enum(ordinal)) = (ty, value) {
            ast.ordinal = Some(*ordinal);
            ast.enumerant_name = cursor
                .graph()
                .get(*type_id)
                .and_then(Node::as_enum)
                .and_then(|e| e.enumerants.get(usize::from(*ordinal)))
                .map(|e| e.name.clone());
        }
        self.open(ast);
        Visit::Continue
    }

    fn leave_value(&mut self, _: &mut Cursor<'g>, _: &'g Type, _: &'g Value) {
        self.close();
    }
}

/// Copies a scalar payload. Lists and structs are carried by child nodes.
fn literal(value: &Value) -> Option<Literal> {
    Some(match value {
        Value::Bool(v) => Literal::Bool(*v),
        Value::Int8(v) => Literal::I8(*v),
        Value::Int16(v) => Literal::I16(*v),
        Value::Int32(v) => Literal::I32(*v),
        Value::Int64(v) => Literal::I64(*v),
        Value::Uint8(v) => Literal::U8(*v),
        Value::Uint16(v) => Literal::U16(*v),
        Value::Uint32(v) => Literal::U32(*v),
        Value::Uint64(v) => Literal::U64(*v),
        Value::Float32(v) => Literal::Float(*v),
        Value::Float64(v) => Literal::Double(*v),
        Value::Text(v) => Literal::String(v.clone()),
        Value::Data(v) => Literal::Binary(v.clone()),
        Value::Void
        | Value::List(_)
        | Value::Enum(_)
        | Value::Struct(_)
        | Value::Interface
        | Value::AnyPointer => return None,
    })
}
