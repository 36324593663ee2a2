//! Descriptor validation and column layout.

use capnparquet_parquet::{
    GroupNode, LogicalType, NodeRef, PhysicalType, PrimitiveNode, Repetition, SchemaDescriptor,
    SchemaNode,
};
use capnparquet_schema::ErrorKind;

fn leaf(name: &str, rep: Repetition, physical: PhysicalType, logical: LogicalType) -> NodeRef {
    SchemaNode::from(PrimitiveNode::new(name, rep, physical, logical)).into_ref()
}

fn group(name: &str, rep: Repetition, logical: LogicalType, fields: Vec<NodeRef>) -> NodeRef {
    SchemaNode::from(GroupNode::new(name, rep, logical, fields)).into_ref()
}

fn message(fields: Vec<NodeRef>) -> NodeRef {
    group("msg", Repetition::Required, LogicalType::None, fields)
}

fn rejected_path(root: NodeRef) -> String {
    match SchemaDescriptor::new(root).unwrap_err().kind {
        ErrorKind::InvalidSchema { path, .. } => path,
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn columns_in_depth_first_order() {
    let point = group(
        "origin",
        Repetition::Optional,
        LogicalType::None,
        vec![
            leaf("x", Repetition::Required, PhysicalType::Int32, LogicalType::Int32),
            leaf("y", Repetition::Required, PhysicalType::Int32, LogicalType::Int32),
        ],
    );
    let root = message(vec![
        leaf("name", Repetition::Optional, PhysicalType::ByteArray, LogicalType::Utf8),
        point,
        leaf("weight", Repetition::Optional, PhysicalType::Float, LogicalType::None),
    ]);

    let descriptor = SchemaDescriptor::new(root).unwrap();
    assert_eq!(descriptor.name(), "msg");
    let paths: Vec<String> = descriptor.columns().iter().map(|c| c.path_string()).collect();
    assert_eq!(paths, ["name", "origin.x", "origin.y", "weight"]);
    assert_eq!(descriptor.num_columns(), 4);
    assert!(descriptor.column(4).is_none());
}

#[test]
fn levels_accumulate_through_groups() {
    let inner = group(
        "points",
        Repetition::Repeated,
        LogicalType::None,
        vec![leaf("x", Repetition::Optional, PhysicalType::Int32, LogicalType::None)],
    );
    let outer = group("track", Repetition::Optional, LogicalType::List, vec![inner]);
    let descriptor = SchemaDescriptor::new(message(vec![outer])).unwrap();

    let column = descriptor.column(0).unwrap();
    assert_eq!(column.path_string(), "track.points.x");
    assert_eq!(column.max_definition_level, 3);
    assert_eq!(column.max_repetition_level, 1);
}

#[test]
fn column_carries_length_and_decimal() {
    let root = message(vec![
        SchemaNode::from(
            PrimitiveNode::new(
                "amount",
                Repetition::Required,
                PhysicalType::FixedLenByteArray,
                LogicalType::Decimal,
            )
            .with_length(16)
            .with_decimal(38, 10),
        )
        .into_ref(),
    ]);
    let descriptor = SchemaDescriptor::new(root).unwrap();
    let column = descriptor.column(0).unwrap();
    assert_eq!(column.type_length, Some(16));
    let decimal = column.decimal.unwrap();
    assert_eq!((decimal.precision, decimal.scale), (38, 10));
    assert_eq!(column.max_definition_level, 0);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn rejection_names_the_nested_path() {
    let bad = group(
        "inner",
        Repetition::Optional,
        LogicalType::None,
        vec![leaf("when", Repetition::Optional, PhysicalType::Int32, LogicalType::TimeMicros)],
    );
    assert_eq!(rejected_path(message(vec![bad])), "inner.when");
}

#[test]
fn decimal_too_wide_for_int64() {
    let root = message(vec![
        SchemaNode::from(
            PrimitiveNode::new("d", Repetition::Optional, PhysicalType::Int64, LogicalType::Decimal)
                .with_decimal(19, 0),
        )
        .into_ref(),
    ]);
    assert_eq!(rejected_path(root), "d");
}

#[test]
fn decimal_without_metadata() {
    let root = message(vec![leaf("d", Repetition::Optional, PhysicalType::Int32, LogicalType::Decimal)]);
    assert_eq!(rejected_path(root), "d");
}

#[test]
fn enum_on_int32_rejected() {
    let root = message(vec![leaf("e", Repetition::Optional, PhysicalType::Int32, LogicalType::Enum)]);
    assert_eq!(rejected_path(root), "e");
}

#[test]
fn primitive_root_rejected() {
    let root = leaf("lonely", Repetition::Required, PhysicalType::Int32, LogicalType::None);
    assert!(matches!(
        SchemaDescriptor::new(root).unwrap_err().kind,
        ErrorKind::InvalidSchema { .. }
    ));
}

#[test]
fn valid_temporal_columns() {
    let root = message(vec![
        leaf("d", Repetition::Optional, PhysicalType::Int32, LogicalType::Date),
        leaf("t", Repetition::Optional, PhysicalType::Int32, LogicalType::TimeMillis),
        leaf("ts", Repetition::Optional, PhysicalType::Int64, LogicalType::TimestampMicros),
        leaf("j", Repetition::Optional, PhysicalType::ByteArray, LogicalType::Json),
    ]);
    assert_eq!(SchemaDescriptor::new(root).unwrap().num_columns(), 4);
}
