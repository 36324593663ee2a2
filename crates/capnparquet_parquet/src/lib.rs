//! Parquet schema model for capnparquet.
//!
//! This crate provides:
//! - [`SchemaNode`] - Primitive and group nodes, shared through [`NodeRef`]
//! - [`Repetition`], [`PhysicalType`], [`LogicalType`] - Column annotations
//! - [`SchemaDescriptor`] - Structural validation and leaf column layout
//! - [`print_schema`] - The textual `message` syntax
//! - Decimal width helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decimal;
pub mod descriptor;
pub mod printer;
pub mod schema;
pub mod types;

pub use decimal::{max_precision_for_bytes, min_bytes_for_precision};
pub use descriptor::{ColumnDescriptor, SchemaDescriptor};
pub use printer::{PrintConfig, print_schema, print_schema_with_config};
pub use schema::{DecimalMetadata, GroupNode, NodeRef, PrimitiveNode, SchemaNode};
pub use types::{LogicalType, PhysicalType, Repetition};
