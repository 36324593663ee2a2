//! Cursor frames follow the scope being walked.

use capnparquet_traversal::{Cursor, walk_file};

use crate::fixtures::{Recorder, point_file, point_graph, zoo_file, zoo_graph};

#[test]
fn file_frame_is_open_for_its_hooks() {
    let graph = point_graph();
    let mut r = Recorder::new();
    walk_file(&mut r, &mut Cursor::new(&graph), &point_file());

    assert_eq!(r.depth_at("+file p.capnp"), 1);
    assert_eq!(r.depth_at("-file p.capnp"), 1);
    assert_eq!(r.scope_at("+imports"), Some("p.capnp"));
}

#[test]
fn decl_hooks_run_in_the_enclosing_scope() {
    let graph = point_graph();
    let mut r = Recorder::new();
    walk_file(&mut r, &mut Cursor::new(&graph), &point_file());

    assert_eq!(r.depth_at("+decl Point"), 1);
    assert_eq!(r.depth_at("-decl Point"), 1);
    assert_eq!(r.depth_at("+struct Point"), 2);
    assert_eq!(r.scope_at("+field x"), Some("Point"));
}

#[test]
fn group_and_param_frames() {
    let graph = zoo_graph();
    let mut r = Recorder::new();
    walk_file(&mut r, &mut Cursor::new(&graph), &zoo_file());

    assert_eq!(r.depth_at("+group meta"), 2);
    assert_eq!(r.depth_at("+field version"), 3);
    assert_eq!(r.depth_at("+parameters area"), 2);
    assert_eq!(r.depth_at("+field shape"), 3);
    assert_eq!(r.depth_at("-parameters area"), 2);
}

#[test]
fn cursor_is_balanced_after_walk() {
    let graph = zoo_graph();
    let file = zoo_file();
    let mut cursor = Cursor::new(&graph);
    let mut r = Recorder::new();
    walk_file(&mut r, &mut cursor, &file);

    assert_eq!(cursor.depth(), 0);
    assert!(cursor.scope().is_none());
    assert!(cursor.frames().is_empty());
}
