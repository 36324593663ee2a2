//! Conversion, validation, and rendering of every requested file.
//!
//! Emission is all-or-nothing: every file is converted and every root is
//! validated before any text is rendered.

use capnparquet_mapping::{ConvertedFile, convert_file, dump_tree};
use capnparquet_parquet::{SchemaDescriptor, print_schema_with_config};
use capnparquet_schema::{ErrorContext, Result};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::loader::LoadedRequest;

/// A validated schema ready for output.
#[derive(Clone, Debug)]
pub struct EmittedSchema {
    /// File the schema was produced from.
    pub filename: String,
    /// The validated schema and its columns.
    pub descriptor: SchemaDescriptor,
    /// The schema in Parquet message syntax.
    pub text: String,
    /// Rendered intermediate tree, when requested.
    pub ast_dump: Option<String>,
}

/// Converts and validates every requested file, then renders them.
///
/// # Errors
///
/// Returns the first conversion or validation error, tagged with the file
/// it came from. No schema is rendered in that case.
pub fn emit_request(loaded: &LoadedRequest, config: &RuntimeConfig) -> Result<Vec<EmittedSchema>> {
    let mut validated: Vec<(ConvertedFile, SchemaDescriptor)> = Vec::new();

    for file in &loaded.request.requested_files {
        let tag = || ErrorContext::new().with_file(&file.filename);
        let converted = convert_file(&loaded.graph, file).map_err(|e| e.with_context(tag()))?;
        let descriptor =
            SchemaDescriptor::new(converted.schema.clone()).map_err(|e| e.with_context(tag()))?;
        debug!(
            file = %file.filename,
            columns = descriptor.num_columns(),
            "validated schema"
        );
        validated.push((converted, descriptor));
    }

    info!(files = validated.len(), "emitting schemas");
    Ok(validated
        .into_iter()
        .map(|(converted, descriptor)| EmittedSchema {
            text: print_schema_with_config(descriptor.root(), config.print.clone()),
            ast_dump: config.dump_ast.then(|| dump_tree(&converted.tree)),
            filename: converted.filename,
            descriptor,
        })
        .collect())
}

/// Concatenates the rendered schemas in request order.
#[must_use]
pub fn render(schemas: &[EmittedSchema]) -> String {
    schemas.iter().map(|s| s.text.as_str()).collect()
}
