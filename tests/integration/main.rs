//! End-to-end tests for capnparquet
//!
//! Encoded requests in, validated Parquet schemas out.

#[path = "../mapping/fixtures.rs"]
mod fixtures;
