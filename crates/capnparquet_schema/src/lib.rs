//! Cap'n Proto declaration graph for capnparquet.
//!
//! This crate provides:
//! - [`Node`] - A declaration (file, struct, enum, interface, const, annotation)
//! - [`Type`] and [`Value`] - Field types and literal values
//! - [`CodeGeneratorRequest`] - The compiler plugin request
//! - [`SchemaGraph`] - Id-addressed lookup over a request's nodes
//! - [`Error`] - Rich error types with context, shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod graph;
pub mod node;
pub mod request;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use graph::SchemaGraph;
pub use node::{
    Annotation, AnnotationNode, AnnotationTarget, ConstNode, EnumNode, Enumerant, Field,
    FieldKind, InterfaceNode, Method, NestedNode, Node, NodeId, NodeKind, Ordinal, Slot,
    StructNode,
};
pub use request::{CodeGeneratorRequest, Import, RequestedFile};
pub use types::{Type, TypeKind};
pub use value::{FieldValue, Value};
