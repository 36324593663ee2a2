//! Visitor trait for walking the declaration graph.
//!
//! Implement the `enter_*`/`leave_*` pairs for the categories of interest;
//! every default continues the walk and does nothing on exit.
//!
//! # Example
//!
//! ```
//! use capnparquet_schema::{Field, Node, NodeKind, RequestedFile, SchemaGraph, StructNode, Type};
//! use capnparquet_traversal::{Cursor, SchemaVisitor, Visit, walk_file};
//!
//! struct FieldCounter(usize);
//!
//! impl<'g> SchemaVisitor<'g> for FieldCounter {
//!     fn enter_struct_field(&mut self, _: &mut Cursor<'g>, _: &'g Field) -> Visit {
//!         self.0 += 1;
//!         Visit::Continue
//!     }
//! }
//!
//! let graph: SchemaGraph = vec![
//!     Node::file(1, "p.capnp").with_nested("Point", 2),
//!     Node::new(2, "p.capnp:Point", NodeKind::Struct(StructNode::new(vec![
//!         Field::slot("x", Type::Int32),
//!         Field::slot("y", Type::Int32),
//!     ]))),
//! ]
//! .into_iter()
//! .collect();
//!
//! let file = RequestedFile::new(1, "p.capnp");
//! let mut counter = FieldCounter(0);
//! walk_file(&mut counter, &mut Cursor::new(&graph), &file);
//! assert_eq!(counter.0, 2);
//! ```

use capnparquet_schema::{
    Annotation, AnnotationNode, ConstNode, EnumNode, Enumerant, Field, Import, InterfaceNode,
    Method, NestedNode, Node, RequestedFile, Slot, StructNode, Type, Value,
};

use crate::cursor::Cursor;

/// What the engine does after an entry hook returns.
///
/// `Handled` and `AbortSubtree` affect only the node whose hook returned
/// them: its default descent and its exit hook are skipped, while siblings
/// and ancestors are walked as usual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visit {
    /// Descend into children, then call the exit hook.
    #[default]
    Continue,
    /// The hook already walked whatever it needed.
    Handled,
    /// Skip this node's subtree.
    AbortSubtree,
}

impl Visit {
    /// Returns true if the engine should descend.
    #[must_use]
    pub const fn descends(self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Which side of a method a parameter struct describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamList {
    /// The method's parameters.
    Parameters,
    /// The method's results.
    Results,
}

impl ParamList {
    /// Returns `"parameters"` or `"results"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Results => "results",
        }
    }
}

/// Entry/exit hooks for every category the engine visits.
///
/// `'g` is the lifetime of the graph; every schema reference a hook receives
/// lives that long, so visitors may keep them.
#[allow(unused_variables)]
pub trait SchemaVisitor<'g> {
    /// Called before a requested file's imports.
    fn enter_file(&mut self, cursor: &mut Cursor<'g>, file: &'g RequestedFile, node: &'g Node) -> Visit {
        Visit::Continue
    }

    /// Called after a requested file's annotations.
    fn leave_file(&mut self, cursor: &mut Cursor<'g>, file: &'g RequestedFile, node: &'g Node) {}

    /// Called before a file's import list.
    fn enter_imports(&mut self, cursor: &mut Cursor<'g>, imports: &'g [Import]) -> Visit {
        Visit::Continue
    }

    /// Called after a file's import list.
    fn leave_imports(&mut self, cursor: &mut Cursor<'g>, imports: &'g [Import]) {}

    /// Called for each import.
    fn enter_import(&mut self, cursor: &mut Cursor<'g>, import: &'g Import) -> Visit {
        Visit::Continue
    }

    /// Called after each import.
    fn leave_import(&mut self, cursor: &mut Cursor<'g>, import: &'g Import) {}

    /// Called before a non-empty list of nested declarations.
    fn enter_nested_decls(&mut self, cursor: &mut Cursor<'g>, scope: &'g Node) -> Visit {
        Visit::Continue
    }

    /// Called after a non-empty list of nested declarations.
    fn leave_nested_decls(&mut self, cursor: &mut Cursor<'g>, scope: &'g Node) {}

    /// Called before any category-specific hook of a nested declaration.
    fn enter_decl(&mut self, cursor: &mut Cursor<'g>, nested: &'g NestedNode, node: &'g Node) -> Visit {
        Visit::Continue
    }

    /// Called after the category-specific walk of a nested declaration.
    fn leave_decl(&mut self, cursor: &mut Cursor<'g>, nested: &'g NestedNode, node: &'g Node) {}

    /// Called before a struct's nested declarations.
    fn enter_struct_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g StructNode) -> Visit {
        Visit::Continue
    }

    /// Called after a struct's annotations.
    fn leave_struct_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g StructNode) {}

    /// Called before an enum's nested declarations.
    fn enter_enum_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g EnumNode) -> Visit {
        Visit::Continue
    }

    /// Called after an enum's annotations.
    fn leave_enum_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g EnumNode) {}

    /// Called before an interface's nested declarations.
    fn enter_interface_decl(
        &mut self,
        cursor: &mut Cursor<'g>,
        node: &'g Node,
        body: &'g InterfaceNode,
    ) -> Visit {
        Visit::Continue
    }

    /// Called after an interface's annotations.
    fn leave_interface_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g InterfaceNode) {}

    /// Called before a constant's type.
    fn enter_const_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g ConstNode) -> Visit {
        Visit::Continue
    }

    /// Called after a constant's annotations.
    fn leave_const_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g ConstNode) {}

    /// Called before an annotation declaration's value type.
    fn enter_annotation_decl(
        &mut self,
        cursor: &mut Cursor<'g>,
        node: &'g Node,
        body: &'g AnnotationNode,
    ) -> Visit {
        Visit::Continue
    }

    /// Called after an annotation declaration's annotations.
    fn leave_annotation_decl(&mut self, cursor: &mut Cursor<'g>, node: &'g Node, body: &'g AnnotationNode) {}

    /// Called before a non-empty list of applied annotations.
    fn enter_annotations(&mut self, cursor: &mut Cursor<'g>, annotations: &'g [Annotation]) -> Visit {
        Visit::Continue
    }

    /// Called after a non-empty list of applied annotations.
    fn leave_annotations(&mut self, cursor: &mut Cursor<'g>, annotations: &'g [Annotation]) {}

    /// Called for each applied annotation, with its declaration.
    fn enter_annotation(&mut self, cursor: &mut Cursor<'g>, annotation: &'g Annotation, decl: &'g Node) -> Visit {
        Visit::Continue
    }

    /// Called after an applied annotation's value.
    fn leave_annotation(&mut self, cursor: &mut Cursor<'g>, annotation: &'g Annotation, decl: &'g Node) {}

    /// Called for each type position. Only list types have children.
    fn enter_type(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type) -> Visit {
        Visit::Continue
    }

    /// Called after a type's element type.
    fn leave_type(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type) {}

    /// Called for each literal, with the type it is read against.
    fn enter_value(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type, value: &'g Value) -> Visit {
        Visit::Continue
    }

    /// Called after a literal's list elements or struct fields.
    fn leave_value(&mut self, cursor: &mut Cursor<'g>, ty: &'g Type, value: &'g Value) {}

    /// Called before a struct's field list.
    fn enter_struct_fields(&mut self, cursor: &mut Cursor<'g>, body: &'g StructNode) -> Visit {
        Visit::Continue
    }

    /// Called after a struct's field list.
    fn leave_struct_fields(&mut self, cursor: &mut Cursor<'g>, body: &'g StructNode) {}

    /// Called before the union members of a struct that has a union.
    fn enter_struct_field_union(&mut self, cursor: &mut Cursor<'g>, body: &'g StructNode) -> Visit {
        Visit::Continue
    }

    /// Called after the union members.
    fn leave_struct_field_union(&mut self, cursor: &mut Cursor<'g>, body: &'g StructNode) {}

    /// Called for each field.
    fn enter_struct_field(&mut self, cursor: &mut Cursor<'g>, field: &'g Field) -> Visit {
        Visit::Continue
    }

    /// Called after a field's annotations.
    fn leave_struct_field(&mut self, cursor: &mut Cursor<'g>, field: &'g Field) {}

    /// Called before a slot field's type.
    fn enter_field_slot(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, slot: &'g Slot) -> Visit {
        Visit::Continue
    }

    /// Called after a slot field's default value.
    fn leave_field_slot(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, slot: &'g Slot) {}

    /// Called before a group field's body.
    fn enter_field_group(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, group: &'g Node) -> Visit {
        Visit::Continue
    }

    /// Called after a group field's body.
    fn leave_field_group(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, group: &'g Node) {}

    /// Called before an explicit default value.
    fn enter_default_value(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, value: &'g Value) -> Visit {
        Visit::Continue
    }

    /// Called after an explicit default value.
    fn leave_default_value(&mut self, cursor: &mut Cursor<'g>, field: &'g Field, value: &'g Value) {}

    /// Called before an interface's method list.
    fn enter_methods(&mut self, cursor: &mut Cursor<'g>, body: &'g InterfaceNode) -> Visit {
        Visit::Continue
    }

    /// Called after an interface's method list.
    fn leave_methods(&mut self, cursor: &mut Cursor<'g>, body: &'g InterfaceNode) {}

    /// Called for each method.
    fn enter_method(&mut self, cursor: &mut Cursor<'g>, method: &'g Method) -> Visit {
        Visit::Continue
    }

    /// Called after a method's annotations.
    fn leave_method(&mut self, cursor: &mut Cursor<'g>, method: &'g Method) {}

    /// Called for a generic method's type parameters.
    fn enter_implicit_params(&mut self, cursor: &mut Cursor<'g>, method: &'g Method, params: &'g [String]) -> Visit {
        Visit::Continue
    }

    /// Called after a generic method's type parameters.
    fn leave_implicit_params(&mut self, cursor: &mut Cursor<'g>, method: &'g Method, params: &'g [String]) {}

    /// Called before a method's parameter or result struct fields.
    fn enter_param_list(
        &mut self,
        cursor: &mut Cursor<'g>,
        method: &'g Method,
        list: ParamList,
        params: &'g Node,
    ) -> Visit {
        Visit::Continue
    }

    /// Called after a method's parameter or result struct fields.
    fn leave_param_list(&mut self, cursor: &mut Cursor<'g>, method: &'g Method, list: ParamList, params: &'g Node) {}

    /// Called before an enum's enumerant list.
    fn enter_enumerants(&mut self, cursor: &mut Cursor<'g>, body: &'g EnumNode) -> Visit {
        Visit::Continue
    }

    /// Called after an enum's enumerant list.
    fn leave_enumerants(&mut self, cursor: &mut Cursor<'g>, body: &'g EnumNode) {}

    /// Called for each enumerant with its ordinal.
    fn enter_enumerant(&mut self, cursor: &mut Cursor<'g>, ordinal: u16, enumerant: &'g Enumerant) -> Visit {
        Visit::Continue
    }

    /// Called after an enumerant's annotations.
    fn leave_enumerant(&mut self, cursor: &mut Cursor<'g>, ordinal: u16, enumerant: &'g Enumerant) {}
}
