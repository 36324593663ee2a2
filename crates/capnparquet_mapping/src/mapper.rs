//! Bottom-up finalization of AST nodes into Parquet schema nodes.
//!
//! [`finalize`] runs when a node is closed, so every child already has its
//! target. Per node:
//!
//! 1. fold applied annotation children into the node's facts
//! 2. classify (logical, physical, structure)
//! 3. flatten a named struct reference into a fresh group
//! 4. otherwise build a group from the children or a leaf column
//!
//! The file node builds nothing itself. It first inlines struct references
//! whose declaration came later in the file, then forwards the target of
//! its first child that carries a schema name and became a group.

use capnparquet_parquet::{GroupNode, NodeRef, PrimitiveNode, SchemaNode};
use capnparquet_schema::{Result, TypeKind};
use tracing::debug;

use crate::ast::{AstId, AstKind, AstNode, AstTree, Literal, TypeRef};
use crate::classify::{Classification, classify};
use crate::naming::to_snake_case;

/// Finalizes the node at `id`.
///
/// # Errors
///
/// Returns [`ErrorKind::TargetAlreadySet`](capnparquet_schema::ErrorKind::TargetAlreadySet)
/// if the node was already finalized.
pub fn finalize(tree: &mut AstTree, id: AstId) -> Result<()> {
    apply_annotations(tree, id);

    if tree.get(id).kind == AstKind::File {
        resolve_deferred(tree, id);
        match forwarded_root(tree, id) {
            Some(root) => {
                debug!(file = %tree.get(id).name, root = root.name(), "forwarding root");
                tree.set_target(id, root)?;
            }
            None => debug!(file = %tree.get(id).name, "no schema-named group in file"),
        }
        return Ok(());
    }

    let classification = classify_node(tree.get(id));
    tree.get_mut(id).classification = Some(classification);

    let target = if classification.is_composite() {
        match flatten(tree, id, classification) {
            Some(group) => group,
            None => {
                if struct_reference(tree, id).is_some() {
                    tree.get_mut(id).unresolved = true;
                }
                build_group(tree, id, classification)
            }
        }
    } else {
        build_primitive(tree.get(id), classification)
    };

    let node = tree.get(id);
    debug!(
        kind = node.kind.name(),
        name = %node.name,
        target = target.name(),
        composite = classification.is_composite(),
        "finalized"
    );
    tree.set_target(id, target)
}

/// Classifies a node from its source category and gathered facts.
///
/// Calling this again on a finalized node returns its stored classification.
#[must_use]
pub fn classify_node(node: &AstNode) -> Classification {
    classify(node.source, &node.facts)
}

/// The name a node's target gets.
///
/// An enumerant name wins over a referenced type name, which wins over a
/// schema name, which wins over the declared name. The result is snake case.
#[must_use]
pub fn target_name(node: &AstNode) -> String {
    let name = node
        .enumerant_name
        .as_deref()
        .or(node.type_ref.as_ref().map(|r| r.name.as_str()))
        .or(node.facts.schema_name.as_deref())
        .unwrap_or(&node.name);
    to_snake_case(name)
}

// =============================================================================
// Annotations
// =============================================================================

fn apply_annotations(tree: &mut AstTree, id: AstId) {
    let applied: Vec<(String, Option<Literal>)> = tree
        .children(id)
        .filter(|c| tree.get(*c).is_applied_annotation())
        .map(|c| (tree.get(c).name.clone(), annotation_value(tree, c)))
        .collect();
    let facts = &mut tree.get_mut(id).facts;
    for (name, literal) in &applied {
        facts.apply(name, literal.as_ref());
    }
}

fn annotation_value(tree: &AstTree, annotation: AstId) -> Option<Literal> {
    tree.children(annotation)
        .map(|c| tree.get(c))
        .find(|n| n.kind == AstKind::Value)
        .and_then(|n| n.literal.clone())
}

fn forwarded_root(tree: &AstTree, file: AstId) -> Option<NodeRef> {
    tree.children(file)
        .map(|c| tree.get(c))
        .filter(|n| n.kind != AstKind::Annotation && n.facts.schema_name.is_some())
        .find_map(|n| n.target().filter(|t| t.is_group()).cloned())
}

// =============================================================================
// Named-type flattening
// =============================================================================

/// Inlines the fields of a referenced struct declaration.
///
/// Applies to fields whose type is a named struct and to struct element
/// types of lists. The declaration is looked up among the children of the
/// enclosing scopes, innermost first, and tombstoned once used. Each use
/// gets its own group. A declaration that encloses the use, or that still
/// holds unresolved references itself, is not inlined yet.
fn flatten(tree: &mut AstTree, id: AstId, classification: Classification) -> Option<NodeRef> {
    let reference = struct_reference(tree, id)?.clone();
    let Some(decl) = find_declaration(tree, id, &reference) else {
        debug!(
            name = %tree.get(id).name,
            referenced = %reference.name,
            "struct reference not yet declared"
        );
        return None;
    };
    if tree.ancestors(id).any(|a| a == decl) || has_unresolved(tree, decl) {
        debug!(
            name = %tree.get(id).name,
            referenced = %reference.name,
            "struct reference waits on its declaration"
        );
        return None;
    }

    let node = tree.get(id);
    let decl_node = tree.get(decl);
    let decl_group = decl_node.target()?.as_group()?;
    let logical = if node.facts.nested().is_some() {
        classification.logical
    } else {
        decl_group.logical_type
    };
    let repetition = node
        .facts
        .repetition
        .or(decl_node.facts.repetition)
        .unwrap_or_default();
    let group = GroupNode::new(target_name(node), repetition, logical, decl_group.fields.clone());

    debug!(name = %node.name, declaration = %decl_node.name, "flattened struct reference");
    tree.detach(decl);
    Some(SchemaNode::from(group).into_ref())
}

/// Inlines references left open when their node closed, once every
/// declaration of the file is finalized.
///
/// Each pass resolves what it can and rebuilds the enclosing groups; it
/// stops when a pass makes no progress. Self-referencing and mutually
/// recursive structs stay as they are.
fn resolve_deferred(tree: &mut AstTree, file: AstId) {
    loop {
        let pending: Vec<AstId> = tree
            .descendants(file)
            .into_iter()
            .filter(|d| tree.get(*d).unresolved)
            .collect();
        let mut progress = false;
        for id in pending {
            let Some(classification) = tree.get(id).classification else {
                continue;
            };
            if let Some(group) = flatten(tree, id, classification) {
                tree.get_mut(id).unresolved = false;
                tree.replace_target(id, group);
                rebuild_enclosing(tree, id);
                progress = true;
            }
        }
        if !progress {
            break;
        }
    }

    for id in tree.descendants(file) {
        let node = tree.get(id);
        if node.unresolved {
            debug!(name = %node.name, "struct reference left unflattened");
        }
    }
}

/// Rebuilds every group between `id` and the file from its children.
fn rebuild_enclosing(tree: &mut AstTree, id: AstId) {
    let scopes: Vec<AstId> = tree
        .ancestors(id)
        .take_while(|a| tree.get(*a).kind != AstKind::File)
        .collect();
    for scope in scopes {
        let Some(group) = tree.get(scope).target().and_then(|t| t.as_group()) else {
            continue;
        };
        let rebuilt = GroupNode::new(
            group.name.clone(),
            group.repetition,
            group.logical_type,
            child_targets(tree, scope),
        );
        tree.replace_target(scope, SchemaNode::from(rebuilt).into_ref());
    }
}

fn has_unresolved(tree: &AstTree, id: AstId) -> bool {
    tree.get(id).unresolved || tree.descendants(id).into_iter().any(|d| tree.get(d).unresolved)
}

fn struct_reference(tree: &AstTree, id: AstId) -> Option<&TypeRef> {
    let node = tree.get(id);
    let ty = match node.kind {
        AstKind::Field => tree
            .children(id)
            .map(|c| tree.get(c))
            .filter(|n| n.kind == AstKind::Type)
            .last()?,
        AstKind::Type => {
            let parent = tree.get(node.parent()?);
            if parent.kind != AstKind::Type || parent.source != Some(TypeKind::List) {
                return None;
            }
            node
        }
        _ => return None,
    };
    if ty.source == Some(TypeKind::Struct) {
        ty.type_ref.as_ref()
    } else {
        None
    }
}

fn find_declaration(tree: &AstTree, id: AstId, reference: &TypeRef) -> Option<AstId> {
    tree.ancestors(id).find_map(|scope| {
        tree.all_children(scope).find(|c| {
            let n = tree.get(*c);
            n.declared
                && n.source == Some(TypeKind::Struct)
                && n.node_id == Some(reference.id)
                && n.target().is_some_and(|t| t.is_group())
        })
    })
}

// =============================================================================
// Target construction
// =============================================================================

fn child_targets(tree: &AstTree, id: AstId) -> Vec<NodeRef> {
    tree.children(id)
        .map(|c| tree.get(c))
        .filter(|n| !matches!(n.kind, AstKind::Annotation | AstKind::Value))
        .filter_map(|n| n.target().cloned())
        .collect()
}

fn build_group(tree: &AstTree, id: AstId, classification: Classification) -> NodeRef {
    let node = tree.get(id);
    let group = GroupNode::new(
        target_name(node),
        node.facts.repetition.unwrap_or_default(),
        classification.logical,
        child_targets(tree, id),
    );
    SchemaNode::from(group).into_ref()
}

fn build_primitive(node: &AstNode, classification: Classification) -> NodeRef {
    let mut primitive = PrimitiveNode::new(
        target_name(node),
        node.facts.repetition.unwrap_or_default(),
        classification.physical,
        classification.logical,
    );
    if let Some(length) = classification.type_length {
        primitive = primitive.with_length(length);
    }
    if let Some(decimal) = classification.decimal {
        primitive = primitive.with_decimal(decimal.precision, decimal.scale);
    }
    SchemaNode::from(primitive).into_ref()
}
