//! One traversal-and-mapping pass per requested file.

use capnparquet_parquet::NodeRef;
use capnparquet_schema::{CodeGeneratorRequest, Error, NodeId, RequestedFile, Result, SchemaGraph};
use capnparquet_traversal::{Cursor, walk_file};
use tracing::{debug, info_span};

use crate::ast::{AstId, AstTree};
use crate::builder::AstBuilder;

/// The result of converting one schema file.
#[derive(Clone, Debug)]
pub struct ConvertedFile {
    /// Id of the file node.
    pub file_id: NodeId,
    /// File name as requested.
    pub filename: String,
    /// The intermediate tree.
    pub tree: AstTree,
    /// The file node in `tree`.
    pub root: AstId,
    /// The emitted schema root.
    pub schema: NodeRef,
}

/// Converts one requested file.
///
/// # Errors
///
/// Returns [`ErrorKind::MissingRoot`](capnparquet_schema::ErrorKind::MissingRoot)
/// if no top-level declaration carries a schema name and maps to a group,
/// or any error raised while building the tree.
pub fn convert_file(graph: &SchemaGraph, file: &RequestedFile) -> Result<ConvertedFile> {
    let _span = info_span!("convert", file = %file.filename).entered();

    let mut builder = AstBuilder::new();
    let mut cursor = Cursor::new(graph);
    walk_file(&mut builder, &mut cursor, file);
    let tree = builder.finish()?;

    let root = tree.root().ok_or_else(|| Error::missing_root(&file.filename))?;
    let schema = tree
        .get(root)
        .target()
        .cloned()
        .ok_or_else(|| Error::missing_root(&file.filename))?;
    debug!(nodes = tree.len(), root = schema.name(), "converted file");

    Ok(ConvertedFile {
        file_id: file.id,
        filename: file.filename.clone(),
        tree,
        root,
        schema,
    })
}

/// Converts every requested file, in request order.
///
/// # Errors
///
/// Stops at the first file that fails to convert.
pub fn convert_request(graph: &SchemaGraph, request: &CodeGeneratorRequest) -> Result<Vec<ConvertedFile>> {
    request
        .requested_files
        .iter()
        .map(|file| convert_file(graph, file))
        .collect()
}
