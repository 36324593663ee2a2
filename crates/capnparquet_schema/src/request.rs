//! The compiler plugin request.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId};

/// Everything the schema compiler hands to a code generator plugin.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodeGeneratorRequest {
    /// Every node reachable from the requested files, imports included.
    pub nodes: Vec<Node>,
    /// Files to generate output for, in command-line order.
    pub requested_files: Vec<RequestedFile>,
}

impl CodeGeneratorRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node.
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds several nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Adds a requested file.
    #[must_use]
    pub fn with_requested_file(mut self, file: RequestedFile) -> Self {
        self.requested_files.push(file);
        self
    }
}

/// A file the plugin must generate output for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequestedFile {
    /// Id of the file node.
    pub id: NodeId,
    /// Path as given on the command line.
    pub filename: String,
    /// Files imported by this one.
    pub imports: Vec<Import>,
}

impl RequestedFile {
    /// Creates a requested file with no imports.
    #[must_use]
    pub fn new(id: NodeId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            imports: Vec::new(),
        }
    }

    /// Adds an import.
    #[must_use]
    pub fn with_import(mut self, id: NodeId, name: impl Into<String>) -> Self {
        self.imports.push(Import {
            id,
            name: name.into(),
        });
        self
    }
}

/// An `import` statement of a requested file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Import {
    /// Id of the imported file node.
    pub id: NodeId,
    /// Name as written in the import statement.
    pub name: String,
}
