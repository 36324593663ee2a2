//! Integration tests for the Parquet schema model
//!
//! Tests for the message printer, the schema descriptor, and column levels.

mod descriptor;
mod levels;
mod printer;
