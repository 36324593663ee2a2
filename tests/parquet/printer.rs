//! Printer tests against whole message schemas.

use capnparquet_parquet::{
    GroupNode, LogicalType, NodeRef, PhysicalType, PrimitiveNode, PrintConfig, Repetition,
    SchemaNode, print_schema, print_schema_with_config,
};

fn leaf(name: &str, rep: Repetition, physical: PhysicalType, logical: LogicalType) -> NodeRef {
    SchemaNode::from(PrimitiveNode::new(name, rep, physical, logical)).into_ref()
}

fn group(name: &str, rep: Repetition, logical: LogicalType, fields: Vec<NodeRef>) -> NodeRef {
    SchemaNode::from(GroupNode::new(name, rep, logical, fields)).into_ref()
}

/// A map of tag names to a list of readings, next to a few scalars.
fn sensor() -> NodeRef {
    let entry = group(
        "key_value",
        Repetition::Repeated,
        LogicalType::MapKeyValue,
        vec![
            leaf("key", Repetition::Required, PhysicalType::ByteArray, LogicalType::Utf8),
            leaf("value", Repetition::Optional, PhysicalType::Double, LogicalType::None),
        ],
    );
    group(
        "sensor",
        Repetition::Required,
        LogicalType::None,
        vec![
            leaf("id", Repetition::Required, PhysicalType::Int64, LogicalType::Uint64),
            leaf("taken_at", Repetition::Optional, PhysicalType::Int64, LogicalType::TimestampMillis),
            leaf("status", Repetition::Optional, PhysicalType::ByteArray, LogicalType::Enum),
            group("readings", Repetition::Optional, LogicalType::Map, vec![entry]),
            leaf("raw", Repetition::Repeated, PhysicalType::ByteArray, LogicalType::None),
        ],
    )
}

#[test]
fn prints_full_message() {
    let expected = "\
message sensor {
  required int64 id (UINT_64);
  optional int64 taken_at (TIMESTAMP_MILLIS);
  optional binary status (ENUM);
  optional group readings (MAP) {
    repeated group key_value (MAP_KEY_VALUE) {
      required binary key (UTF8);
      optional double value;
    }
  }
  repeated binary raw;
}
";
    assert_eq!(print_schema(&sensor()), expected);
}

#[test]
fn indent_width_scales_every_level() {
    let text = print_schema_with_config(&sensor(), PrintConfig { indent_width: 4 });
    assert!(text.contains("\n    optional group readings (MAP) {\n"));
    assert!(text.contains("\n        repeated group key_value (MAP_KEY_VALUE) {\n"));
    assert!(text.contains("\n            required binary key (UTF8);\n"));
    assert!(text.ends_with("    repeated binary raw;\n}\n"));
}

#[test]
fn zero_indent_is_flat() {
    let text = print_schema_with_config(&sensor(), PrintConfig { indent_width: 0 });
    assert!(text.lines().all(|line| !line.starts_with(' ')));
}

#[test]
fn empty_message() {
    let root = group("nothing", Repetition::Required, LogicalType::None, Vec::new());
    assert_eq!(print_schema(&root), "message nothing {\n}\n");
}

#[test]
fn interval_and_wide_decimal() {
    let root = group(
        "span",
        Repetition::Required,
        LogicalType::None,
        vec![
            SchemaNode::from(
                PrimitiveNode::new(
                    "length",
                    Repetition::Optional,
                    PhysicalType::FixedLenByteArray,
                    LogicalType::Interval,
                )
                .with_length(12),
            )
            .into_ref(),
            SchemaNode::from(
                PrimitiveNode::new(
                    "amount",
                    Repetition::Optional,
                    PhysicalType::FixedLenByteArray,
                    LogicalType::Decimal,
                )
                .with_length(9)
                .with_decimal(20, 4),
            )
            .into_ref(),
        ],
    );
    let text = print_schema(&root);
    assert!(text.contains("  optional fixed_len_byte_array(12) length (INTERVAL);\n"));
    assert!(text.contains("  optional fixed_len_byte_array(9) amount (DECIMAL(20,4));\n"));
}
