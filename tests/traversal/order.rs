//! Hook order and completeness.

use capnparquet_traversal::{Cursor, walk_file, walk_request};
use capnparquet_schema::{CodeGeneratorRequest, RequestedFile};

use crate::fixtures::{Recorder, point_file, point_graph, zoo_file, zoo_graph};

fn walk(graph: &capnparquet_schema::SchemaGraph, file: &RequestedFile) -> Recorder {
    let mut recorder = Recorder::new();
    walk_file(&mut recorder, &mut Cursor::new(graph), file);
    recorder
}

// =============================================================================
// Exact Order
// =============================================================================

#[test]
fn struct_file_order() {
    let graph = point_graph();
    let file = point_file();
    let recorder = walk(&graph, &file);

    let expected = [
        "+file p.capnp",
        "+imports",
        "-imports",
        "+nested p.capnp",
        "+decl Point",
        "+struct Point",
        "+fields",
        "+field x",
        "+slot x",
        "+type Int32",
        "-type Int32",
        "-slot x",
        "-field x",
        "+field tags",
        "+slot tags",
        "+type List",
        "+type Text",
        "-type Text",
        "-type List",
        "-slot tags",
        "-field tags",
        "-fields",
        "+annotations",
        "+annotation note",
        "+value text",
        "-value text",
        "-annotation note",
        "-annotations",
        "-struct Point",
        "-decl Point",
        "-nested p.capnp",
        "-file p.capnp",
    ];
    assert_eq!(recorder.events, expected);
}

#[test]
fn file_members_in_order() {
    let graph = zoo_graph();
    let file = zoo_file();
    let r = walk(&graph, &file);

    // imports, then declarations in nesting order, then the file's annotations
    assert!(r.position("+import /capnp/c++.capnp") < r.position("+decl Color"));
    assert!(r.position("-decl Color") < r.position("+decl Shape"));
    assert!(r.position("-decl Shape") < r.position("+decl Service"));
    assert!(r.position("-decl Service") < r.position("+decl pi"));
    assert!(r.position("-decl pi") < r.position("+decl tag"));
    assert!(r.position("-nested zoo.capnp") < r.last_position("+annotations"));
    assert_eq!(r.events.last().map(String::as_str), Some("-file zoo.capnp"));
}

#[test]
fn union_members_come_before_other_fields() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());

    assert!(r.position("+union") < r.position("+field circle"));
    assert!(r.position("-field square") < r.position("-union"));
    assert!(r.position("-union") < r.position("+field name"));
    assert!(r.position("-field name") < r.position("+field meta"));
}

#[test]
fn slot_walks_type_then_default_then_field_annotations() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());

    assert!(r.position("+type Text") < r.position("+default name"));
    assert!(r.position("+default name") < r.position("-slot name"));
    assert!(r.contains("+value text"));

    // field annotations follow the slot
    assert!(r.position("-slot color") < r.position("+annotation note"));
    assert!(r.position("-type Enum") < r.position("-field color"));
}

#[test]
fn field_without_default_has_no_default_hook() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());
    assert!(!r.contains("+default circle"));
    assert!(!r.contains("+default color"));
}

// =============================================================================
// Completeness
// =============================================================================

#[test]
fn every_category_is_visited() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());

    for event in [
        "+enum Color",
        "+enumerant 0 red",
        "+enumerant 1 green",
        "+struct Shape",
        "+group meta",
        "+field version",
        "+interface Service",
        "+method area",
        "+parameters area",
        "+field shape",
        "+results area",
        "+field value",
        "+method generic",
        "+implicit generic T",
        "+const pi",
        "+value float64",
        "+annotation_decl tag",
        "+decl inner",
        "-decl inner",
    ] {
        assert!(r.contains(event), "missing {event}");
    }
}

#[test]
fn generic_method_skips_param_lists() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());
    assert!(!r.contains("+parameters generic"));
    assert!(!r.contains("+results generic"));
}

#[test]
fn nested_file_has_no_body_walk() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());
    let enter = r.position("+decl inner");
    assert_eq!(r.events[enter + 1], "-decl inner");
}

#[test]
fn enter_and_leave_are_balanced() {
    let graph = zoo_graph();
    let r = walk(&graph, &zoo_file());

    let mut open: Vec<&str> = Vec::new();
    for event in &r.events {
        if let Some(label) = event.strip_prefix('+') {
            open.push(label);
        } else if let Some(label) = event.strip_prefix('-') {
            assert_eq!(open.pop(), Some(label), "unbalanced at {event}");
        }
    }
    assert!(open.is_empty(), "left open: {open:?}");
}

#[test]
fn walk_request_visits_each_requested_file() {
    let graph = point_graph();
    let request = CodeGeneratorRequest::new()
        .with_requested_file(point_file())
        .with_requested_file(point_file());
    let mut recorder = Recorder::new();
    walk_request(&mut recorder, &graph, &request);

    let files = recorder.events.iter().filter(|e| *e == "+file p.capnp").count();
    assert_eq!(files, 2);
}

#[test]
fn unknown_file_is_skipped() {
    let graph = point_graph();
    let r = walk(&graph, &RequestedFile::new(0xdead, "missing.capnp"));
    assert!(r.events.is_empty());
}
