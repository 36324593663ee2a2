//! Repeat conversions, reclassification, completeness, and failures.

use capnparquet_mapping::{AstKind, classify_node, convert_file, dump_tree, finalize};
use capnparquet_schema::{CodeGeneratorRequest, ErrorKind, Field, SchemaGraph, Type};

use crate::fixtures::{
    USER_FILE, convert, graph_with, int_annotation, marker, print, single_struct, struct_node,
};

fn sample() -> CodeGeneratorRequest {
    single_struct(
        "Order",
        vec![
            Field::slot("id", Type::Uint64).with_annotation(marker("required")),
            Field::slot("total", Type::Int64)
                .with_annotation(marker("decimal"))
                .with_annotation(int_annotation("precision", 12))
                .with_annotation(int_annotation("scale", 2)),
            Field::slot("notes", Type::list(Type::Text)),
            Field::slot("placedAt", Type::Int64).with_annotation(marker("timestampMillis")),
        ],
    )
}

#[test]
fn conversion_is_deterministic() {
    let request = sample();
    assert_eq!(print(&request), print(&request));
}

#[test]
fn reclassification_matches_stored_classification() {
    let converted = convert(&sample());
    let tree = &converted.tree;
    let mut checked = 0;
    for id in tree.ids() {
        let node = tree.get(id);
        if let Some(stored) = node.classification {
            assert_eq!(classify_node(node), stored, "{}", node.name);
            checked += 1;
        }
    }
    assert!(checked > 4);
}

#[test]
fn finalized_node_cannot_be_finalized_again() {
    let mut converted = convert(&sample());
    let root = converted.root;
    let err = finalize(&mut converted.tree, root).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TargetAlreadySet(_)));
}

#[test]
fn every_field_and_annotation_reaches_the_tree() {
    let converted = convert(&sample());
    let dump = dump_tree(&converted.tree);
    for field in ["id", "total", "notes", "placedAt"] {
        assert!(dump.contains(&format!("field {field}")), "missing {field}:\n{dump}");
    }
    for annotation in ["required", "decimal", "precision", "scale", "timestampMillis", "schema"] {
        assert!(dump.contains(&format!("annotation {annotation}")), "missing {annotation}");
    }
    for value in ["precision", "scale", "schema"] {
        assert!(dump.contains(&format!("value {value} ")), "value not named {value}:\n{dump}");
    }
    assert!(!dump.contains("value Order"));

    let fields = converted
        .tree
        .ids()
        .filter(|id| converted.tree.get(*id).kind == AstKind::Field)
        .count();
    assert_eq!(fields, 4);
}

#[test]
fn every_live_node_has_a_target_except_the_file() {
    let converted = convert(&sample());
    let tree = &converted.tree;
    for id in tree.ids() {
        let node = tree.get(id);
        if node.kind != AstKind::File {
            assert!(node.target().is_some(), "{} {} has no target", node.kind.name(), node.name);
        }
    }
}

#[test]
fn file_without_schema_name_fails() {
    let request = graph_with(vec![struct_node(USER_FILE + 1, "Plain", vec![Field::slot("x", Type::Int32)])]);
    let graph = SchemaGraph::from_request(&request).unwrap();
    let err = convert_file(&graph, &request.requested_files[0]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingRoot(_)));
}
