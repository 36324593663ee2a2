//! Depth-first traversal of a Cap'n Proto declaration graph.
//!
//! This crate provides:
//! - [`SchemaVisitor`] - Entry/exit hooks for every node category
//! - [`Visit`] - The outcome an entry hook reports to the engine
//! - [`Cursor`] - Per-traversal context carrying the graph and scope frames
//! - `walk_*` functions - The fixed traversal order
//!
//! # Order
//!
//! ```text
//! file        → imports → nested declarations → annotations
//! struct      → nested declarations → fields → annotations
//! enum        → nested declarations → enumerants → annotations
//! interface   → nested declarations → methods → annotations
//! const       → type → value → annotations
//! annotation  → type → annotations
//! fields      → union members → other fields
//! slot field  → type → explicit default → field annotations
//! group field → group nested declarations → group annotations → group fields → field annotations
//! method      → implicit params | (parameters, results) → annotations
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cursor;
pub mod visitor;
pub mod walk;

pub use cursor::{Cursor, Frame};
pub use visitor::{ParamList, SchemaVisitor, Visit};
pub use walk::{
    walk_annotation, walk_annotation_decl, walk_annotations, walk_const_decl, walk_decl,
    walk_enum_decl, walk_enumerants, walk_file, walk_imports, walk_interface_decl, walk_method,
    walk_methods, walk_nested_decls, walk_param_list, walk_request, walk_struct_decl,
    walk_struct_field, walk_struct_fields, walk_type, walk_value,
};
