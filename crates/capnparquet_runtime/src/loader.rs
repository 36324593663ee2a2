//! Request decoding and graph construction.
//!
//! Requests are `MessagePack` (named fields) or JSON encodings of
//! [`CodeGeneratorRequest`]. Decoding is followed by the graph's reference
//! check, so everything past this module works on a consistent graph.

use std::fs;
use std::io::{self, Read};

use capnparquet_schema::{CodeGeneratorRequest, Error, ErrorKind, Result, SchemaGraph};
use tracing::{debug, info};

use crate::config::{InputFormat, InputSource, RuntimeConfig};

/// A decoded request and its checked graph.
#[derive(Clone, Debug)]
pub struct LoadedRequest {
    /// The request as decoded.
    pub request: CodeGeneratorRequest,
    /// Id-addressed view of the request's nodes.
    pub graph: SchemaGraph,
}

/// Reads the raw request bytes.
///
/// # Errors
///
/// Returns an I/O error if the source cannot be read.
pub fn read_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(|e| Error::new(ErrorKind::IoError(format!("failed to read stdin: {e}"))))?;
            Ok(bytes)
        }
        InputSource::Path(path) => fs::read(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read '{}': {e}",
                path.display()
            )))
        }),
    }
}

/// Decodes a request.
///
/// # Errors
///
/// Returns a serialization error if the bytes are not a valid request.
pub fn decode_request(bytes: &[u8], format: InputFormat) -> Result<CodeGeneratorRequest> {
    match format {
        InputFormat::MessagePack => rmp_serde::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
        InputFormat::Json => serde_json::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
    }
}

/// Encodes a request. `MessagePack` output keeps field names.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn encode_request(request: &CodeGeneratorRequest, format: InputFormat) -> Result<Vec<u8>> {
    match format {
        InputFormat::MessagePack => rmp_serde::to_vec_named(request)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
        InputFormat::Json => serde_json::to_vec_pretty(request)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
    }
}

/// Decodes a request and builds its graph.
///
/// # Errors
///
/// Returns a serialization error for undecodable bytes, or the graph's
/// error for dangling or mistyped references.
pub fn load_bytes(bytes: &[u8], format: InputFormat) -> Result<LoadedRequest> {
    let request = decode_request(bytes, format)?;
    debug!(
        nodes = request.nodes.len(),
        files = request.requested_files.len(),
        "decoded request"
    );
    let graph = SchemaGraph::from_request(&request)?;
    Ok(LoadedRequest { request, graph })
}

/// Reads, decodes, and checks the request named by `config`.
///
/// # Errors
///
/// See [`read_input`] and [`load_bytes`].
pub fn load(config: &RuntimeConfig) -> Result<LoadedRequest> {
    let bytes = read_input(&config.input)?;
    info!(bytes = bytes.len(), format = ?config.format, "read request");
    load_bytes(&bytes, config.format)
}
