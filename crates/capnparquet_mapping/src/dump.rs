//! Text rendering of an [`AstTree`] for debugging.

use std::fmt::Write;

use crate::ast::{AstId, AstTree};

/// Renders the tree from its root, one node per line, two spaces per level.
///
/// Tombstoned nodes are included and marked `detached`.
#[must_use]
pub fn dump_tree(tree: &AstTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        dump_node(tree, root, 0, &mut out);
    }
    out
}

fn dump_node(tree: &AstTree, id: AstId, depth: usize, out: &mut String) {
    let node = tree.get(id);
    out.extend(std::iter::repeat_n(' ', depth * 2));
    let _ = write!(out, "{} {}", node.kind.name(), node.name);
    if node.declared {
        out.push_str(" decl");
    }
    if let Some(source) = node.source {
        let _ = write!(out, " source={source}");
    }
    if let Some(type_ref) = &node.type_ref {
        let _ = write!(out, " type={}", type_ref.name);
    }
    if let Some(schema) = &node.facts.schema_name {
        let _ = write!(out, " schema={schema}");
    }
    if let Some(target) = node.target() {
        let _ = write!(out, " -> {}", target.name());
    }
    if node.is_detached() {
        out.push_str(" detached");
    }
    out.push('\n');
    for child in tree.all_children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}
