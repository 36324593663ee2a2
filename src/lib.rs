//! capnparquet - Cap'n Proto schema to Parquet schema conversion
//!
//! This crate re-exports all layers of the converter for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: capnparquet_runtime   - Request loading, emission, logging, CLI
//! Layer 2: capnparquet_mapping   - AST builder and mapping engine
//! Layer 1: capnparquet_traversal - Schema visitor and walk functions
//!          capnparquet_parquet   - Parquet schema nodes, descriptor, printer
//! Layer 0: capnparquet_schema    - Declaration graph and Error
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use capnparquet_mapping as mapping;
pub use capnparquet_parquet as parquet;
pub use capnparquet_runtime as runtime;
pub use capnparquet_schema as schema;
pub use capnparquet_traversal as traversal;
