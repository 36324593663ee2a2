//! Id-addressed view over a request's node table.
//!
//! [`SchemaGraph::from_request`] is the trust boundary of the converter: it
//! checks that every id a node refers to resolves to a node of the expected
//! kind. Downstream layers assume the check held and skip what they cannot
//! resolve instead of failing.

use im::HashMap;

use crate::error::{Error, ErrorKind, Result};
use crate::node::{FieldKind, Node, NodeId, NodeKind, StructNode};
use crate::request::CodeGeneratorRequest;
use crate::types::Type;

/// Immutable declaration graph with O(1) lookup by id.
#[derive(Clone, Debug, Default)]
pub struct SchemaGraph {
    nodes: HashMap<NodeId, Node>,
}

impl SchemaGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a request and checks referential integrity.
    ///
    /// # Errors
    ///
    /// Returns an error if a node, field type, group, method, or annotation
    /// refers to an id that is missing or of the wrong kind, or if a
    /// requested file does not name a file node.
    pub fn from_request(request: &CodeGeneratorRequest) -> Result<Self> {
        let graph: Self = request.nodes.iter().cloned().collect();
        graph.check_references()?;
        for file in &request.requested_files {
            let node = graph.resolve(file.id, &file.filename)?;
            if !node.is_file() {
                return Err(Error::new(ErrorKind::WrongNodeKind {
                    id: file.id,
                    expected: "file",
                }));
            }
        }
        Ok(graph)
    }

    /// Adds or replaces a node.
    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    /// Returns a graph with `node` added.
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert(node);
        self
    }

    /// Looks up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node, failing with an unresolved reference error.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the graph.
    pub fn resolve(&self, id: NodeId, referrer: &str) -> Result<&Node> {
        self.get(id)
            .ok_or_else(|| Error::unresolved_node(id, referrer))
    }

    /// Returns the unqualified name of a node, if it exists.
    #[must_use]
    pub fn short_display_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::short_display_name)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Checks every reference held by every node.
    ///
    /// # Errors
    ///
    /// Returns the first unresolved or mis-kinded reference found.
    pub fn check_references(&self) -> Result<()> {
        for node in self.nodes.values() {
            self.check_node(node)?;
        }
        Ok(())
    }

    fn check_node(&self, node: &Node) -> Result<()> {
        let referrer = node.display_name.as_str();
        for nested in &node.nested_nodes {
            self.resolve(nested.id, referrer)?;
        }
        self.check_annotations(node.annotations.iter().map(|a| a.id), referrer)?;
        match &node.kind {
            NodeKind::File => {}
            NodeKind::Struct(s) => self.check_struct(s, referrer)?,
            NodeKind::Enum(e) => {
                for enumerant in &e.enumerants {
                    self.check_annotations(enumerant.annotations.iter().map(|a| a.id), referrer)?;
                }
            }
            NodeKind::Interface(i) => {
                for method in &i.methods {
                    self.expect_struct(method.param_struct_type, referrer)?;
                    self.expect_struct(method.result_struct_type, referrer)?;
                    self.check_annotations(method.annotations.iter().map(|a| a.id), referrer)?;
                }
            }
            NodeKind::Const(c) => self.check_type(&c.ty, referrer)?,
            NodeKind::Annotation(a) => self.check_type(&a.ty, referrer)?,
        }
        Ok(())
    }

    fn check_struct(&self, s: &StructNode, referrer: &str) -> Result<()> {
        for field in &s.fields {
            match &field.kind {
                FieldKind::Slot(slot) => self.check_type(&slot.ty, referrer)?,
                FieldKind::Group { type_id } => self.expect_struct(*type_id, referrer)?,
            }
            self.check_annotations(field.annotations.iter().map(|a| a.id), referrer)?;
        }
        Ok(())
    }

    fn check_type(&self, ty: &Type, referrer: &str) -> Result<()> {
        match ty {
            Type::List(element) => self.check_type(element, referrer),
            Type::Struct { type_id } => self.expect_struct(*type_id, referrer),
            Type::Enum { type_id } => self.expect_kind(*type_id, referrer, "enum", |k| {
                matches!(k, NodeKind::Enum(_))
            }),
            Type::Interface { type_id } => {
                self.expect_kind(*type_id, referrer, "interface", |k| {
                    matches!(k, NodeKind::Interface(_))
                })
            }
            _ => Ok(()),
        }
    }

    fn check_annotations(
        &self,
        ids: impl Iterator<Item = NodeId>,
        referrer: &str,
    ) -> Result<()> {
        for id in ids {
            self.expect_kind(id, referrer, "annotation", |k| {
                matches!(k, NodeKind::Annotation(_))
            })?;
        }
        Ok(())
    }

    fn expect_struct(&self, id: NodeId, referrer: &str) -> Result<()> {
        self.expect_kind(id, referrer, "struct", |k| matches!(k, NodeKind::Struct(_)))
    }

    fn expect_kind(
        &self,
        id: NodeId,
        referrer: &str,
        expected: &'static str,
        is_kind: impl Fn(&NodeKind) -> bool,
    ) -> Result<()> {
        let node = self.resolve(id, referrer)?;
        if is_kind(&node.kind) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::WrongNodeKind { id, expected }))
        }
    }
}

impl FromIterator<Node> for SchemaGraph {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(|node| (node.id, node)).collect(),
        }
    }
}
