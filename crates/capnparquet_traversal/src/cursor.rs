//! Per-traversal context.

use capnparquet_schema::{Node, SchemaGraph};

/// One open scope: the declaration whose body is being walked.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'g> {
    /// The declaration node.
    pub node: &'g Node,
}

/// Traversal state threaded through every hook.
///
/// The engine pushes a frame when it starts walking a file, declaration,
/// group, or parameter struct body and pops it when that body is done.
/// Hooks may read the frames and may recurse through the `walk_*`
/// functions, but never push or pop themselves.
#[derive(Debug)]
pub struct Cursor<'g> {
    graph: &'g SchemaGraph,
    frames: Vec<Frame<'g>>,
}

impl<'g> Cursor<'g> {
    /// Creates a cursor with no open scope.
    #[must_use]
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self {
            graph,
            frames: Vec::new(),
        }
    }

    /// The graph being walked.
    #[must_use]
    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    /// The innermost open scope.
    #[must_use]
    pub fn scope(&self) -> Option<&'g Node> {
        self.frames.last().map(|frame| frame.node)
    }

    /// Open scopes, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[Frame<'g>] {
        &self.frames
    }

    /// Number of open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn push(&mut self, node: &'g Node) {
        self.frames.push(Frame { node });
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }
}
