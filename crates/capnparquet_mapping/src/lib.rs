//! AST construction and Parquet type mapping for capnparquet.
//!
//! This crate provides:
//! - [`AstBuilder`] - A [`SchemaVisitor`](capnparquet_traversal::SchemaVisitor) that grows an [`AstTree`]
//! - [`finalize`] - The bottom-up mapping run as each AST node closes
//! - [`classify`] - Pure logical/physical/structural classification
//! - [`convert_file`] and [`convert_request`] - One pass per requested file
//! - [`dump_tree`] - Debug rendering of the intermediate tree

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod builder;
pub mod classify;
pub mod convert;
pub mod dump;
pub mod mapper;
pub mod naming;
pub mod semantic;

pub use ast::{AstId, AstKind, AstNode, AstTree, Literal, TypeRef};
pub use builder::AstBuilder;
pub use classify::{Classification, Structure, classify, decimal_physical_type};
pub use convert::{ConvertedFile, convert_file, convert_request};
pub use dump::dump_tree;
pub use mapper::{classify_node, finalize, target_name};
pub use naming::to_snake_case;
pub use semantic::{
    AnnotationFacts, NestedMarker, RECOGNIZED_ANNOTATIONS, Semantic, TemporalUnit, is_recognized,
};
