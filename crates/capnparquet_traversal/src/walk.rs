//! The walk functions.
//!
//! Each `walk_*` function calls the matching entry hook, descends in the
//! documented order when the hook returns [`Visit::Continue`], and then
//! calls the exit hook. They are public so an entry hook can walk a
//! subtree itself and return [`Visit::Handled`].
//!
//! References that do not resolve are skipped. The graph's reference check
//! rules them out for graphs built with `SchemaGraph::from_request`.
//!
//! [`Visit::Continue`]: crate::Visit::Continue
//! [`Visit::Handled`]: crate::Visit::Handled

use capnparquet_schema::{
    Annotation, AnnotationNode, CodeGeneratorRequest, ConstNode, EnumNode, Field, FieldKind,
    Import, InterfaceNode, Method, NestedNode, Node, NodeId, NodeKind, RequestedFile,
    SchemaGraph, StructNode, Type, Value,
};
use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::visitor::{ParamList, SchemaVisitor};

// =============================================================================
// Files and Declarations
// =============================================================================

/// Walks every requested file of a request, each with a fresh cursor.
pub fn walk_request<'g, V>(visitor: &mut V, graph: &'g SchemaGraph, request: &'g CodeGeneratorRequest)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    for file in &request.requested_files {
        let mut cursor = Cursor::new(graph);
        walk_file(visitor, &mut cursor, file);
    }
}

/// Walks one requested file: imports, nested declarations, annotations.
pub fn walk_file<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, file: &'g RequestedFile)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(node) = lookup(cursor, file.id, &file.filename) else {
        return;
    };
    trace!(file = %file.filename, "walking file");

    cursor.push(node);
    if visitor.enter_file(cursor, file, node).descends() {
        walk_imports(visitor, cursor, &file.imports);
        walk_nested_decls(visitor, cursor, node);
        walk_annotations(visitor, cursor, &node.annotations);
        visitor.leave_file(cursor, file, node);
    }
    cursor.pop();
}

/// Walks a file's import list.
pub fn walk_imports<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, imports: &'g [Import])
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_imports(cursor, imports).descends() {
        return;
    }
    for import in imports {
        if visitor.enter_import(cursor, import).descends() {
            visitor.leave_import(cursor, import);
        }
    }
    visitor.leave_imports(cursor, imports);
}

/// Walks the declarations nested in `scope`. Does nothing when there are none.
pub fn walk_nested_decls<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, scope: &'g Node)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if scope.nested_nodes.is_empty() {
        return;
    }
    if !visitor.enter_nested_decls(cursor, scope).descends() {
        return;
    }
    for nested in &scope.nested_nodes {
        walk_decl(visitor, cursor, nested);
    }
    visitor.leave_nested_decls(cursor, scope);
}

/// Walks one nested declaration, dispatching on its category.
///
/// Nested file nodes get `enter_decl`/`leave_decl` but no body walk.
pub fn walk_decl<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, nested: &'g NestedNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(node) = lookup(cursor, nested.id, &nested.name) else {
        return;
    };
    trace!(id = node.id, name = %node.display_name, kind = node.kind.name(), "walking declaration");

    if !visitor.enter_decl(cursor, nested, node).descends() {
        return;
    }
    cursor.push(node);
    match &node.kind {
        NodeKind::File => {}
        NodeKind::Struct(body) => walk_struct_decl(visitor, cursor, node, body),
        NodeKind::Enum(body) => walk_enum_decl(visitor, cursor, node, body),
        NodeKind::Interface(body) => walk_interface_decl(visitor, cursor, node, body),
        NodeKind::Const(body) => walk_const_decl(visitor, cursor, node, body),
        NodeKind::Annotation(body) => walk_annotation_decl(visitor, cursor, node, body),
    }
    cursor.pop();
    visitor.leave_decl(cursor, nested, node);
}

/// Walks a struct: nested declarations, fields, annotations.
pub fn walk_struct_decl<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g StructNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_struct_decl(cursor, node, body).descends() {
        return;
    }
    walk_nested_decls(visitor, cursor, node);
    walk_struct_fields(visitor, cursor, body);
    walk_annotations(visitor, cursor, &node.annotations);
    visitor.leave_struct_decl(cursor, node, body);
}

/// Walks an enum: nested declarations, enumerants, annotations.
pub fn walk_enum_decl<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g EnumNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_enum_decl(cursor, node, body).descends() {
        return;
    }
    walk_nested_decls(visitor, cursor, node);
    walk_enumerants(visitor, cursor, body);
    walk_annotations(visitor, cursor, &node.annotations);
    visitor.leave_enum_decl(cursor, node, body);
}

/// Walks an interface: nested declarations, methods, annotations.
pub fn walk_interface_decl<'g, V>(
    visitor: &mut V,
    cursor: &mut Cursor<'g>,
    node: &'g Node,
    body: &'g InterfaceNode,
) where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_interface_decl(cursor, node, body).descends() {
        return;
    }
    walk_nested_decls(visitor, cursor, node);
    walk_methods(visitor, cursor, body);
    walk_annotations(visitor, cursor, &node.annotations);
    visitor.leave_interface_decl(cursor, node, body);
}

/// Walks a constant: type, value, annotations.
pub fn walk_const_decl<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g ConstNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_const_decl(cursor, node, body).descends() {
        return;
    }
    walk_type(visitor, cursor, &body.ty);
    walk_value(visitor, cursor, &body.ty, &body.value);
    walk_annotations(visitor, cursor, &node.annotations);
    visitor.leave_const_decl(cursor, node, body);
}

/// Walks an annotation declaration: value type, annotations.
pub fn walk_annotation_decl<'g, V>(
    visitor: &mut V,
    cursor: &mut Cursor<'g>,
    node: &'g Node,
    body: &'g AnnotationNode,
) where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_annotation_decl(cursor, node, body).descends() {
        return;
    }
    walk_type(visitor, cursor, &body.ty);
    walk_annotations(visitor, cursor, &node.annotations);
    visitor.leave_annotation_decl(cursor, node, body);
}

// =============================================================================
// Annotations, Types, Values
// =============================================================================

/// Walks applied annotations. Does nothing when there are none.
pub fn walk_annotations<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, annotations: &'g [Annotation])
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if annotations.is_empty() {
        return;
    }
    if !visitor.enter_annotations(cursor, annotations).descends() {
        return;
    }
    for annotation in annotations {
        walk_annotation(visitor, cursor, annotation);
    }
    visitor.leave_annotations(cursor, annotations);
}

/// Walks one applied annotation and its value, typed by the declaration.
pub fn walk_annotation<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, annotation: &'g Annotation)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(decl) = lookup(cursor, annotation.id, "annotation") else {
        return;
    };
    let Some(body) = decl.as_annotation() else {
        warn!(id = annotation.id, "applied annotation does not name an annotation declaration");
        return;
    };
    if !visitor.enter_annotation(cursor, annotation, decl).descends() {
        return;
    }
    walk_value(visitor, cursor, &body.ty, &annotation.value);
    visitor.leave_annotation(cursor, annotation, decl);
}

/// Walks a type. Only a list type descends, into its element type.
pub fn walk_type<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, ty: &'g Type)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_type(cursor, ty).descends() {
        return;
    }
    if let Type::List(element) = ty {
        walk_type(visitor, cursor, element);
    }
    visitor.leave_type(cursor, ty);
}

/// Walks a literal value read against `ty`.
///
/// List elements are walked with the element type. Struct values walk the
/// fields that are set, in the struct's field order, each with its own type.
/// Scalars, interfaces and pointers have no children.
pub fn walk_value<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, ty: &'g Type, value: &'g Value)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if matches!(value, Value::Interface | Value::AnyPointer) {
        return;
    }
    if !visitor.enter_value(cursor, ty, value).descends() {
        return;
    }
    match (ty, value) {
        (Type::List(element), Value::List(items)) => {
            for item in items {
                walk_value(visitor, cursor, element, item);
            }
        }
        (Type::Struct { type_id }, Value::Struct(_)) => {
            walk_struct_value(visitor, cursor, *type_id, value);
        }
        _ => {}
    }
    visitor.leave_value(cursor, ty, value);
}

fn walk_struct_value<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, type_id: NodeId, value: &'g Value)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(body) = lookup(cursor, type_id, "struct value").and_then(Node::as_struct) else {
        return;
    };
    for field in &body.fields {
        let Some(field_value) = value.field(&field.name) else {
            continue;
        };
        match &field.kind {
            FieldKind::Slot(slot) => walk_value(visitor, cursor, &slot.ty, field_value),
            FieldKind::Group { type_id } => {
                if matches!(field_value, Value::Struct(_)) {
                    walk_struct_value(visitor, cursor, *type_id, field_value);
                }
            }
        }
    }
}

// =============================================================================
// Fields
// =============================================================================

/// Walks a struct's fields: union members as one group, then the rest.
pub fn walk_struct_fields<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, body: &'g StructNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_struct_fields(cursor, body).descends() {
        return;
    }
    if body.union_fields().next().is_some()
        && visitor.enter_struct_field_union(cursor, body).descends()
    {
        for field in body.union_fields() {
            walk_struct_field(visitor, cursor, field);
        }
        visitor.leave_struct_field_union(cursor, body);
    }
    for field in body.non_union_fields() {
        walk_struct_field(visitor, cursor, field);
    }
    visitor.leave_struct_fields(cursor, body);
}

/// Walks one field.
///
/// A slot walks its type and its explicit default. A group walks the group
/// node's nested declarations, annotations and fields. Either way the
/// field's own annotations come last.
pub fn walk_struct_field<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, field: &'g Field)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_struct_field(cursor, field).descends() {
        return;
    }
    match &field.kind {
        FieldKind::Slot(slot) => {
            if visitor.enter_field_slot(cursor, field, slot).descends() {
                walk_type(visitor, cursor, &slot.ty);
                if let (true, Some(default)) = (slot.had_explicit_default, &slot.default_value) {
                    if visitor.enter_default_value(cursor, field, default).descends() {
                        walk_value(visitor, cursor, &slot.ty, default);
                        visitor.leave_default_value(cursor, field, default);
                    }
                }
                visitor.leave_field_slot(cursor, field, slot);
            }
        }
        FieldKind::Group { type_id } => {
            if let Some(group) = lookup(cursor, *type_id, &field.name) {
                walk_group(visitor, cursor, field, group);
            }
        }
    }
    walk_annotations(visitor, cursor, &field.annotations);
    visitor.leave_struct_field(cursor, field);
}

fn walk_group<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, field: &'g Field, group: &'g Node)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(body) = group.as_struct() else {
        warn!(field = %field.name, "group field does not name a struct node");
        return;
    };
    if !visitor.enter_field_group(cursor, field, group).descends() {
        return;
    }
    cursor.push(group);
    walk_nested_decls(visitor, cursor, group);
    walk_annotations(visitor, cursor, &group.annotations);
    walk_struct_fields(visitor, cursor, body);
    cursor.pop();
    visitor.leave_field_group(cursor, field, group);
}

// =============================================================================
// Methods and Enumerants
// =============================================================================

/// Walks an interface's methods.
pub fn walk_methods<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, body: &'g InterfaceNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_methods(cursor, body).descends() {
        return;
    }
    for method in &body.methods {
        walk_method(visitor, cursor, method);
    }
    visitor.leave_methods(cursor, body);
}

/// Walks one method.
///
/// A generic method reports its implicit parameters; any other method walks
/// its parameter struct and then its result struct. Annotations come last.
pub fn walk_method<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, method: &'g Method)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_method(cursor, method).descends() {
        return;
    }
    if method.implicit_parameters.is_empty() {
        walk_param_list(visitor, cursor, method, ParamList::Parameters, method.param_struct_type);
        walk_param_list(visitor, cursor, method, ParamList::Results, method.result_struct_type);
    } else {
        let params = method.implicit_parameters.as_slice();
        if visitor.enter_implicit_params(cursor, method, params).descends() {
            visitor.leave_implicit_params(cursor, method, params);
        }
    }
    walk_annotations(visitor, cursor, &method.annotations);
    visitor.leave_method(cursor, method);
}

/// Walks the fields of a method's parameter or result struct.
pub fn walk_param_list<'g, V>(
    visitor: &mut V,
    cursor: &mut Cursor<'g>,
    method: &'g Method,
    list: ParamList,
    struct_id: NodeId,
) where
    V: SchemaVisitor<'g> + ?Sized,
{
    let Some(params) = lookup(cursor, struct_id, list.name()) else {
        return;
    };
    let Some(body) = params.as_struct() else {
        warn!(method = %method.name, list = list.name(), "parameter list is not a struct");
        return;
    };
    if !visitor.enter_param_list(cursor, method, list, params).descends() {
        return;
    }
    cursor.push(params);
    walk_struct_fields(visitor, cursor, body);
    cursor.pop();
    visitor.leave_param_list(cursor, method, list, params);
}

/// Walks an enum's enumerants and each enumerant's annotations.
pub fn walk_enumerants<'g, V>(visitor: &mut V, cursor: &mut Cursor<'g>, body: &'g EnumNode)
where
    V: SchemaVisitor<'g> + ?Sized,
{
    if !visitor.enter_enumerants(cursor, body).descends() {
        return;
    }
    for (index, enumerant) in body.enumerants.iter().enumerate() {
        let ordinal = u16::try_from(index).unwrap_or(u16::MAX);
        if visitor.enter_enumerant(cursor, ordinal, enumerant).descends() {
            walk_annotations(visitor, cursor, &enumerant.annotations);
            visitor.leave_enumerant(cursor, ordinal, enumerant);
        }
    }
    visitor.leave_enumerants(cursor, body);
}

fn lookup<'g>(cursor: &Cursor<'g>, id: NodeId, referrer: &str) -> Option<&'g Node> {
    let node = cursor.graph().get(id);
    if node.is_none() {
        warn!(id, referrer, "skipping unresolved node");
    }
    node
}
