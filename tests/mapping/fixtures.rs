//! Request builders shared by the mapping and end-to-end tests.

#![allow(dead_code)]

use capnparquet_mapping::{ConvertedFile, RECOGNIZED_ANNOTATIONS, convert_file};
use capnparquet_parquet::print_schema;
use capnparquet_schema::{
    Annotation, AnnotationNode, CodeGeneratorRequest, Field, Node, NodeId, NodeKind,
    RequestedFile, SchemaGraph, StructNode, Type, Value,
};

pub const PARQUET_FILE: NodeId = 0x1000;
pub const FIRST_ANNOTATION: NodeId = 0x1100;
pub const USER_FILE: NodeId = 0x2000;
pub const USER_FILENAME: &str = "user.capnp";

/// Id of a declaration in the `parquet.capnp` annotation vocabulary.
pub fn annotation_id(name: &str) -> NodeId {
    let index = RECOGNIZED_ANNOTATIONS
        .iter()
        .position(|n| *n == name)
        .unwrap_or_else(|| panic!("{name} is not a recognized annotation"));
    FIRST_ANNOTATION + index as NodeId
}

/// The `parquet.capnp` file and its annotation declarations.
pub fn parquet_vocabulary() -> Vec<Node> {
    let mut file = Node::file(PARQUET_FILE, "parquet.capnp");
    let mut decls = Vec::new();
    for name in RECOGNIZED_ANNOTATIONS {
        let ty = match name {
            "schema" => Type::Text,
            "length" | "scale" | "precision" => Type::Int32,
            _ => Type::Void,
        };
        let id = annotation_id(name);
        file = file.with_nested(name, id);
        decls.push(
            Node::new(
                id,
                format!("parquet.capnp:{name}"),
                NodeKind::Annotation(AnnotationNode::everywhere(ty)),
            )
            .with_scope(PARQUET_FILE),
        );
    }
    decls.push(file);
    decls
}

pub fn marker(name: &str) -> Annotation {
    Annotation::marker(annotation_id(name))
}

pub fn int_annotation(name: &str, value: i32) -> Annotation {
    Annotation::new(annotation_id(name), Value::Int32(value))
}

pub fn schema_name(name: &str) -> Annotation {
    Annotation::new(annotation_id("schema"), Value::text(name))
}

/// A struct declared at the top level of `user.capnp`.
pub fn struct_node(id: NodeId, name: &str, fields: Vec<Field>) -> Node {
    Node::new(
        id,
        format!("{USER_FILENAME}:{name}"),
        NodeKind::Struct(StructNode::new(fields)),
    )
    .with_scope(USER_FILE)
}

/// A request for `user.capnp` whose top-level declarations are `decls`,
/// nested in the given order.
pub fn graph_with(decls: Vec<Node>) -> CodeGeneratorRequest {
    let mut file = Node::file(USER_FILE, USER_FILENAME);
    for decl in &decls {
        file = file.with_nested(decl.short_display_name(), decl.id);
    }
    CodeGeneratorRequest::new()
        .with_nodes(parquet_vocabulary())
        .with_node(file)
        .with_nodes(decls)
        .with_requested_file(RequestedFile::new(USER_FILE, USER_FILENAME))
}

/// A request with one schema-named struct holding `fields`.
pub fn single_struct(name: &str, fields: Vec<Field>) -> CodeGeneratorRequest {
    graph_with(vec![
        struct_node(USER_FILE + 1, name, fields).with_annotation(schema_name(name)),
    ])
}

pub fn convert(request: &CodeGeneratorRequest) -> ConvertedFile {
    let graph = SchemaGraph::from_request(request).unwrap();
    convert_file(&graph, &request.requested_files[0]).unwrap()
}

pub fn print(request: &CodeGeneratorRequest) -> String {
    print_schema(&convert(request).schema)
}
