//! Schema validation and leaf column layout.
//!
//! [`SchemaDescriptor::new`] is the emission gate: a tree that passes it is
//! a structurally valid Parquet message schema. The checks follow the rules
//! Parquet writers apply when building primitive and group nodes.

use capnparquet_schema::{Error, Result};

use crate::decimal::max_precision_for_bytes;
use crate::schema::{DecimalMetadata, GroupNode, NodeRef, PrimitiveNode, SchemaNode};
use crate::types::{LogicalType, PhysicalType, Repetition};

/// One leaf column of a validated schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDescriptor {
    /// Field names from below the root down to the leaf.
    pub path: Vec<String>,
    /// Storage type.
    pub physical_type: PhysicalType,
    /// Logical annotation.
    pub logical_type: LogicalType,
    /// Fixed byte length, when set.
    pub type_length: Option<i32>,
    /// Decimal precision and scale, when set.
    pub decimal: Option<DecimalMetadata>,
    /// Number of optional or repeated fields on the path.
    pub max_definition_level: i16,
    /// Number of repeated fields on the path.
    pub max_repetition_level: i16,
}

impl ColumnDescriptor {
    /// The dotted column path.
    #[must_use]
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// A validated schema together with its leaf columns.
#[derive(Clone, Debug)]
pub struct SchemaDescriptor {
    root: NodeRef,
    columns: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    /// Validates `root` and computes its columns.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSchema`](capnparquet_schema::ErrorKind::InvalidSchema)
    /// naming the first offending node when the root is not a group, a
    /// group carries a non-nested logical type, or a primitive's logical
    /// type, physical type, length, or decimal metadata disagree.
    pub fn new(root: NodeRef) -> Result<Self> {
        let Some(group) = root.as_group() else {
            return Err(Error::invalid_schema(root.name(), "schema root must be a group"));
        };
        let mut path = Vec::new();
        check_group(group, &path)?;

        let mut columns = Vec::new();
        for field in &group.fields {
            collect_columns(field, &mut path, 0, 0, &mut columns)?;
        }
        Ok(Self { root, columns })
    }

    /// The message name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// The root group.
    #[must_use]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Number of leaf columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The leaf column at `index`.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// All leaf columns in schema order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }
}

fn collect_columns(
    node: &SchemaNode,
    path: &mut Vec<String>,
    definition: i16,
    repetition: i16,
    columns: &mut Vec<ColumnDescriptor>,
) -> Result<()> {
    path.push(node.name().to_string());
    let definition = definition + i16::from(node.repetition() != Repetition::Required);
    let repetition = repetition + i16::from(node.repetition() == Repetition::Repeated);

    match node {
        SchemaNode::Primitive(p) => {
            check_primitive(p, path)?;
            columns.push(ColumnDescriptor {
                path: path.clone(),
                physical_type: p.physical_type,
                logical_type: p.logical_type,
                type_length: p.type_length,
                decimal: p.decimal,
                max_definition_level: definition,
                max_repetition_level: repetition,
            });
        }
        SchemaNode::Group(g) => {
            check_group(g, path)?;
            for field in &g.fields {
                collect_columns(field, path, definition, repetition, columns)?;
            }
        }
    }
    path.pop();
    Ok(())
}

fn check_group(group: &GroupNode, path: &[String]) -> Result<()> {
    match group.logical_type {
        LogicalType::None | LogicalType::List | LogicalType::Map | LogicalType::MapKeyValue => {
            Ok(())
        }
        other => Err(invalid(
            path,
            &group.name,
            format!("{other} is not a valid logical type for a group"),
        )),
    }
}

fn check_primitive(node: &PrimitiveNode, path: &[String]) -> Result<()> {
    let fail = |message: String| Err(invalid(path, &node.name, message));
    let physical = node.physical_type;

    if physical == PhysicalType::FixedLenByteArray && node.type_length.is_none_or(|l| l <= 0) {
        return fail("fixed_len_byte_array requires a positive length".to_string());
    }

    let expected = match node.logical_type {
        LogicalType::None => return Ok(()),
        LogicalType::Decimal => return check_decimal(node, path),
        LogicalType::Map | LogicalType::MapKeyValue | LogicalType::List => {
            return fail(format!("{} can only annotate a group", node.logical_type));
        }
        LogicalType::Interval => {
            if physical != PhysicalType::FixedLenByteArray || node.type_length != Some(12) {
                return fail("INTERVAL requires fixed_len_byte_array(12)".to_string());
            }
            return Ok(());
        }
        LogicalType::Utf8 | LogicalType::Enum | LogicalType::Json | LogicalType::Bson => {
            PhysicalType::ByteArray
        }
        LogicalType::Date
        | LogicalType::TimeMillis
        | LogicalType::Uint8
        | LogicalType::Uint16
        | LogicalType::Uint32
        | LogicalType::Int8
        | LogicalType::Int16
        | LogicalType::Int32 => PhysicalType::Int32,
        LogicalType::TimeMicros
        | LogicalType::TimestampMillis
        | LogicalType::TimestampMicros
        | LogicalType::Uint64
        | LogicalType::Int64 => PhysicalType::Int64,
    };
    if physical == expected {
        Ok(())
    } else {
        fail(format!(
            "{} can only annotate {expected} columns, found {physical}",
            node.logical_type
        ))
    }
}

fn check_decimal(node: &PrimitiveNode, path: &[String]) -> Result<()> {
    let fail = |message: String| Err(invalid(path, &node.name, message));
    let Some(DecimalMetadata { precision, scale }) = node.decimal else {
        return fail("DECIMAL requires precision and scale".to_string());
    };
    if precision <= 0 {
        return fail(format!("invalid DECIMAL precision {precision}"));
    }
    if scale < 0 || scale > precision {
        return fail(format!(
            "invalid DECIMAL scale {scale}; must be between 0 and precision {precision}"
        ));
    }
    let max_precision = match node.physical_type {
        PhysicalType::Int32 => 9,
        PhysicalType::Int64 => 18,
        PhysicalType::ByteArray => return Ok(()),
        PhysicalType::FixedLenByteArray => {
            let bytes = node.type_length.and_then(|l| u32::try_from(l).ok()).unwrap_or(0);
            i32::try_from(max_precision_for_bytes(bytes)).unwrap_or(i32::MAX)
        }
        other => return fail(format!("DECIMAL cannot annotate {other} columns")),
    };
    if precision > max_precision {
        return fail(format!(
            "DECIMAL precision {precision} exceeds the maximum {max_precision} for {}",
            node.physical_type
        ));
    }
    Ok(())
}

fn invalid(path: &[String], name: &str, message: String) -> Error {
    let mut full = path.to_vec();
    if full.last().is_none_or(|last| last != name) {
        full.push(name.to_string());
    }
    Error::invalid_schema(full.join("."), message)
}
