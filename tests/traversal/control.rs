//! Handled and AbortSubtree apply to the returning node only.

use capnparquet_traversal::{Cursor, Visit, walk_file, walk_type};

use crate::fixtures::{Recorder, point_file, point_graph, zoo_file, zoo_graph};

#[test]
fn handled_field_skips_descent_and_exit() {
    let graph = point_graph();
    let mut r = Recorder::new().returning("field x", Visit::Handled);
    walk_file(&mut r, &mut Cursor::new(&graph), &point_file());

    assert!(r.contains("+field x"));
    assert!(!r.contains("+slot x"));
    assert!(!r.contains("-field x"));
    // siblings and ancestors proceed
    assert!(r.contains("-field tags"));
    assert!(r.contains("-struct Point"));
    assert!(r.contains("-file p.capnp"));
}

#[test]
fn abort_subtree_on_decl_skips_only_that_decl() {
    let graph = zoo_graph();
    let mut r = Recorder::new().returning("decl Shape", Visit::AbortSubtree);
    walk_file(&mut r, &mut Cursor::new(&graph), &zoo_file());

    assert!(r.contains("+decl Shape"));
    assert!(!r.contains("+struct Shape"));
    assert!(!r.contains("-decl Shape"));
    assert!(r.contains("+decl Service"));
    assert!(r.contains("-nested zoo.capnp"));
}

#[test]
fn handled_file_stops_everything() {
    let graph = point_graph();
    let mut r = Recorder::new().returning("file p.capnp", Visit::Handled);
    walk_file(&mut r, &mut Cursor::new(&graph), &point_file());
    assert_eq!(r.events, ["+file p.capnp"]);
}

#[test]
fn abort_on_list_type_skips_element() {
    let graph = point_graph();
    let mut r = Recorder::new().returning("type List", Visit::AbortSubtree);
    walk_file(&mut r, &mut Cursor::new(&graph), &point_file());

    assert!(r.contains("+type List"));
    assert!(!r.contains("+type Text"));
    assert!(!r.contains("-type List"));
    assert!(r.contains("-slot tags"));
}

#[test]
fn skipped_union_still_walks_other_fields() {
    let graph = zoo_graph();
    let mut r = Recorder::new().returning("union", Visit::AbortSubtree);
    walk_file(&mut r, &mut Cursor::new(&graph), &zoo_file());

    assert!(!r.contains("+field circle"));
    assert!(!r.contains("-union"));
    assert!(r.contains("+field name"));
    assert!(r.contains("-fields"));
}

#[test]
fn hooks_can_rewalk_manually() {
    // A visitor that walks a list's element itself and reports Handled.
    struct ElementWalker {
        inner: Recorder,
    }

    impl<'g> capnparquet_traversal::SchemaVisitor<'g> for ElementWalker {
        fn enter_type(&mut self, cursor: &mut Cursor<'g>, ty: &'g capnparquet_schema::Type) -> Visit {
            walk_type(&mut self.inner, cursor, ty.element().unwrap_or(ty));
            Visit::Handled
        }
    }

    let graph = point_graph();
    let mut walker = ElementWalker { inner: Recorder::new() };
    walk_file(&mut walker, &mut Cursor::new(&graph), &point_file());
    assert_eq!(
        walker.inner.events,
        ["+type Int32", "-type Int32", "+type Text", "-type Text"]
    );
}
