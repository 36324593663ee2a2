//! Integration tests for AST construction and Parquet mapping
//!
//! Each test builds a request graph, converts it, and inspects the
//! resulting schema or intermediate tree.

mod fixtures;
mod scalars;
mod stability;
