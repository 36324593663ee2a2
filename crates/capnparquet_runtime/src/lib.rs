//! Request loading, schema emission, and the `capnpc-parquet` plugin.
//!
//! This crate provides:
//! - [`RuntimeConfig`] - Input, output, and logging settings for a run
//! - [`load`] - Reads and decodes a `CodeGeneratorRequest`
//! - [`emit_request`] - Converts, validates, and renders every requested file
//! - [`run`] - The whole pipeline in one call

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod emit;
pub mod loader;
pub mod logging;

pub use config::{InputFormat, InputSource, RuntimeConfig};
pub use emit::{EmittedSchema, emit_request, render};
pub use loader::{LoadedRequest, decode_request, encode_request, load, load_bytes, read_input};
pub use logging::init_logging;

use capnparquet_schema::Result;

/// Loads the configured request and emits a schema for every requested file.
///
/// # Errors
///
/// Returns the first load, conversion, or validation error.
pub fn run(config: &RuntimeConfig) -> Result<Vec<EmittedSchema>> {
    let loaded = load(config)?;
    emit_request(&loaded, config)
}
