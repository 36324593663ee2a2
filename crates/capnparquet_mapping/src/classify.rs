//! Classification of AST nodes into Parquet representations.
//!
//! Every function here is pure: the result depends only on the source
//! category and the annotation facts passed in.

use capnparquet_parquet::{DecimalMetadata, LogicalType, PhysicalType, min_bytes_for_precision};
use capnparquet_schema::TypeKind;

use crate::semantic::{AnnotationFacts, NestedMarker, Semantic, TemporalUnit};

/// Byte length of an `INTERVAL` column.
pub const INTERVAL_LENGTH: i32 = 12;

/// Whether a node becomes a group or a leaf column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
    /// A leaf column.
    Primitive,
    /// A group built from the node's children.
    Composite,
}

/// The full classification of one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Logical annotation.
    pub logical: LogicalType,
    /// Storage type.
    pub physical: PhysicalType,
    /// Leaf or group.
    pub structure: Structure,
    /// Byte length for fixed-length columns.
    pub type_length: Option<i32>,
    /// Precision and scale for decimals.
    pub decimal: Option<DecimalMetadata>,
}

impl Classification {
    /// Returns true for groups.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self.structure, Structure::Composite)
    }
}

/// Classifies a node from its source category and annotation facts.
#[must_use]
pub fn classify(source: Option<TypeKind>, facts: &AnnotationFacts) -> Classification {
    let semantic = facts.semantic();
    let nested = facts.nested();
    let (physical, type_length) = physical_type(source, semantic);
    Classification {
        logical: logical_type(source, semantic, nested),
        physical,
        structure: structure(source, semantic),
        type_length,
        decimal: match semantic {
            Some(Semantic::Decimal { precision, scale }) => Some(DecimalMetadata { precision, scale }),
            _ => None,
        },
    }
}

/// Derives the logical annotation. A semantic wins over the source table.
#[must_use]
pub fn logical_type(
    source: Option<TypeKind>,
    semantic: Option<Semantic>,
    nested: Option<NestedMarker>,
) -> LogicalType {
    if let Some(semantic) = semantic {
        return match semantic {
            Semantic::Decimal { .. } => LogicalType::Decimal,
            Semantic::Temporal(TemporalUnit::Date) => LogicalType::Date,
            Semantic::Temporal(TemporalUnit::TimeMillis) => LogicalType::TimeMillis,
            Semantic::Temporal(TemporalUnit::TimeMicros) => LogicalType::TimeMicros,
            Semantic::Temporal(TemporalUnit::TimestampMillis) => LogicalType::TimestampMillis,
            Semantic::Temporal(TemporalUnit::TimestampMicros) => LogicalType::TimestampMicros,
            Semantic::Bson => LogicalType::Bson,
            Semantic::Json => LogicalType::Json,
            Semantic::Interval => LogicalType::Interval,
            Semantic::FixedBinary { .. } => LogicalType::None,
        };
    }
    let Some(source) = source else {
        return LogicalType::None;
    };
    match source {
        TypeKind::Int8 => LogicalType::Int8,
        TypeKind::Int16 => LogicalType::Int16,
        TypeKind::Int32 => LogicalType::Int32,
        TypeKind::Int64 => LogicalType::Int64,
        TypeKind::Uint8 => LogicalType::Uint8,
        TypeKind::Uint16 => LogicalType::Uint16,
        TypeKind::Uint32 => LogicalType::Uint32,
        TypeKind::Uint64 => LogicalType::Uint64,
        TypeKind::Text => LogicalType::Utf8,
        TypeKind::List => LogicalType::List,
        TypeKind::Enum => LogicalType::Enum,
        TypeKind::Struct => match nested {
            Some(NestedMarker::Map) => LogicalType::Map,
            Some(NestedMarker::MapKeyValue) => LogicalType::MapKeyValue,
            Some(NestedMarker::List) => LogicalType::List,
            None => LogicalType::None,
        },
        TypeKind::Void
        | TypeKind::Bool
        | TypeKind::Float32
        | TypeKind::Float64
        | TypeKind::Data
        | TypeKind::Interface
        | TypeKind::AnyPointer => LogicalType::None,
    }
}

/// Derives the storage type and, for fixed-length columns, the byte length.
#[must_use]
pub fn physical_type(source: Option<TypeKind>, semantic: Option<Semantic>) -> (PhysicalType, Option<i32>) {
    if let Some(semantic) = semantic {
        return match semantic {
            Semantic::Decimal { precision, .. } => decimal_physical_type(precision),
            Semantic::Temporal(
                TemporalUnit::Date | TemporalUnit::TimeMillis | TemporalUnit::TimeMicros,
            ) => (PhysicalType::Int32, None),
            Semantic::Temporal(TemporalUnit::TimestampMillis | TemporalUnit::TimestampMicros) => {
                (PhysicalType::Int64, None)
            }
            Semantic::Bson | Semantic::Json => (PhysicalType::ByteArray, None),
            Semantic::Interval => (PhysicalType::FixedLenByteArray, Some(INTERVAL_LENGTH)),
            Semantic::FixedBinary { length } => (PhysicalType::FixedLenByteArray, Some(length)),
        };
    }
    let physical = match source {
        Some(TypeKind::Bool) => PhysicalType::Boolean,
        Some(
            TypeKind::Int8
            | TypeKind::Int16
            | TypeKind::Int32
            | TypeKind::Uint8
            | TypeKind::Uint16
            | TypeKind::Uint32,
        ) => PhysicalType::Int32,
        Some(TypeKind::Int64 | TypeKind::Uint64) => PhysicalType::Int64,
        Some(TypeKind::Float32) => PhysicalType::Float,
        Some(TypeKind::Float64) => PhysicalType::Double,
        _ => PhysicalType::ByteArray,
    };
    (physical, None)
}

/// Storage for a decimal of the given precision.
///
/// Up to 9 digits fit an `INT32`, up to 18 an `INT64`. Wider decimals use
/// the narrowest fixed-length array that holds them.
#[must_use]
pub fn decimal_physical_type(precision: i32) -> (PhysicalType, Option<i32>) {
    match precision {
        ..=9 => (PhysicalType::Int32, None),
        10..=18 => (PhysicalType::Int64, None),
        _ => {
            let digits = u32::try_from(precision).unwrap_or(u32::MAX);
            let bytes = i32::try_from(min_bytes_for_precision(digits)).unwrap_or(i32::MAX);
            (PhysicalType::FixedLenByteArray, Some(bytes))
        }
    }
}

/// Lists and structs are groups unless a semantic turns them into a leaf.
#[must_use]
pub fn structure(source: Option<TypeKind>, semantic: Option<Semantic>) -> Structure {
    match (source, semantic) {
        (Some(TypeKind::List | TypeKind::Struct), None) => Structure::Composite,
        _ => Structure::Primitive,
    }
}
