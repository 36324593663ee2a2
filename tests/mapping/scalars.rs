//! Leaf column mapping: scalar kinds, semantic markers, repetition.

use capnparquet_parquet::{PhysicalType, SchemaDescriptor};
use capnparquet_schema::{ErrorKind, Field, Type};

use crate::fixtures::{convert, int_annotation, marker, print, single_struct};

fn field_line(field: Field) -> String {
    let text = print(&single_struct("Row", vec![field]));
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("message row {"));
    lines.next().unwrap().trim().to_owned()
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn unsigned_byte() {
    assert_eq!(field_line(Field::slot("age", Type::Uint8)), "optional int32 age (UINT_8);");
}

#[test]
fn every_scalar_kind() {
    let fields = vec![
        Field::slot("flag", Type::Bool),
        Field::slot("tiny", Type::Int8),
        Field::slot("small", Type::Int16),
        Field::slot("medium", Type::Int32),
        Field::slot("large", Type::Int64),
        Field::slot("ubyte", Type::Uint8),
        Field::slot("ushort", Type::Uint16),
        Field::slot("uint", Type::Uint32),
        Field::slot("ulong", Type::Uint64),
        Field::slot("ratio", Type::Float32),
        Field::slot("score", Type::Float64),
        Field::slot("label", Type::Text),
        Field::slot("payload", Type::Data),
    ];
    let expected = "\
message row {
  optional boolean flag;
  optional int32 tiny (INT_8);
  optional int32 small (INT_16);
  optional int32 medium (INT_32);
  optional int64 large (INT_64);
  optional int32 ubyte (UINT_8);
  optional int32 ushort (UINT_16);
  optional int32 uint (UINT_32);
  optional int64 ulong (UINT_64);
  optional float ratio;
  optional double score;
  optional binary label (UTF8);
  optional binary payload;
}
";
    assert_eq!(print(&single_struct("Row", fields)), expected);
}

#[test]
fn field_names_become_snake_case() {
    assert_eq!(
        field_line(Field::slot("createdAtUtc", Type::Int64)),
        "optional int64 created_at_utc (INT_64);"
    );
}

#[test]
fn enum_field_is_an_enum_column() {
    use capnparquet_schema::{EnumNode, Node, NodeKind};

    use crate::fixtures::{USER_FILE, graph_with, schema_name, struct_node};

    let color = Node::new(
        USER_FILE + 2,
        "user.capnp:Color",
        NodeKind::Enum(EnumNode::from_names(["red", "green"])),
    )
    .with_scope(USER_FILE);
    let row = struct_node(
        USER_FILE + 1,
        "Row",
        vec![Field::slot("color", Type::enumeration(USER_FILE + 2))],
    )
    .with_annotation(schema_name("Row"));

    let text = print(&graph_with(vec![color, row]));
    assert!(text.contains("  optional binary color (ENUM);\n"));
}

// =============================================================================
// Semantic markers
// =============================================================================

#[test]
fn decimal_in_int64() {
    let price = Field::slot("price", Type::Int64)
        .with_annotation(int_annotation("precision", 10))
        .with_annotation(int_annotation("scale", 2))
        .with_annotation(marker("decimal"));
    assert_eq!(field_line(price), "optional int64 price (DECIMAL(10,2));");
}

#[test]
fn narrow_decimal_in_int32() {
    let price = Field::slot("price", Type::Int32)
        .with_annotation(marker("decimal"))
        .with_annotation(int_annotation("precision", 5));
    assert_eq!(field_line(price), "optional int32 price (DECIMAL(5,0));");
}

#[test]
fn wide_decimal_in_fixed_bytes() {
    let amount = Field::slot("amount", Type::Data)
        .with_annotation(marker("decimal"))
        .with_annotation(int_annotation("precision", 20))
        .with_annotation(int_annotation("scale", 4));
    assert_eq!(
        field_line(amount),
        "optional fixed_len_byte_array(9) amount (DECIMAL(20,4));"
    );
}

#[test]
fn huge_decimal_precision_gets_a_wide_fixed_array() {
    let amount = Field::slot("amount", Type::Data)
        .with_annotation(marker("decimal"))
        .with_annotation(int_annotation("precision", 2_000_000_000));
    assert_eq!(
        field_line(amount),
        "optional fixed_len_byte_array(830482024) amount (DECIMAL(2000000000,0));"
    );
}

#[test]
fn non_positive_decimal_precision_is_rejected() {
    for precision in [0, -3] {
        let price = Field::slot("price", Type::Int64)
            .with_annotation(marker("decimal"))
            .with_annotation(int_annotation("precision", precision));
        let converted = convert(&single_struct("Row", vec![price]));

        let leaf = converted.schema.as_group().unwrap().fields[0].clone();
        assert_eq!(leaf.as_primitive().unwrap().physical_type, PhysicalType::Int32);
        let err = SchemaDescriptor::new(converted.schema.clone()).unwrap_err();
        match err.kind {
            ErrorKind::InvalidSchema { path, .. } => assert_eq!(path, "price"),
            other => panic!("unexpected error for precision {precision}: {other}"),
        }
    }
}

#[test]
fn fixed_binary() {
    let blob = Field::slot("blob", Type::Data)
        .with_annotation(marker("fixed"))
        .with_annotation(int_annotation("length", 16));
    assert_eq!(field_line(blob), "optional fixed_len_byte_array(16) blob;");
}

#[test]
fn fixed_without_length_stays_binary() {
    let blob = Field::slot("blob", Type::Data).with_annotation(marker("fixed"));
    assert_eq!(field_line(blob), "optional binary blob;");
}

#[test]
fn temporal_markers() {
    let cases = [
        (Type::Int32, "date", "optional int32 at (DATE);"),
        (Type::Int32, "timeMillis", "optional int32 at (TIME_MILLIS);"),
        (Type::Int64, "timestampMillis", "optional int64 at (TIMESTAMP_MILLIS);"),
        (Type::Int64, "timestampMicros", "optional int64 at (TIMESTAMP_MICROS);"),
    ];
    for (ty, name, expected) in cases {
        let field = Field::slot("at", ty).with_annotation(marker(name));
        assert_eq!(field_line(field), expected, "{name}");
    }
}

#[test]
fn text_encodings_and_interval() {
    let doc = Field::slot("doc", Type::Text).with_annotation(marker("json"));
    assert_eq!(field_line(doc), "optional binary doc (JSON);");

    let raw = Field::slot("raw", Type::Data).with_annotation(marker("bson"));
    assert_eq!(field_line(raw), "optional binary raw (BSON);");

    let span = Field::slot("span", Type::Data).with_annotation(marker("interval"));
    assert_eq!(
        field_line(span),
        "optional fixed_len_byte_array(12) span (INTERVAL);"
    );
}

#[test]
fn decimal_outranks_other_markers() {
    let field = Field::slot("v", Type::Int64)
        .with_annotation(marker("json"))
        .with_annotation(marker("decimal"))
        .with_annotation(int_annotation("precision", 12));
    assert_eq!(field_line(field), "optional int64 v (DECIMAL(12,0));");
}

// =============================================================================
// Repetition
// =============================================================================

#[test]
fn repetition_markers() {
    let required = Field::slot("id", Type::Uint64).with_annotation(marker("required"));
    assert_eq!(field_line(required), "required int64 id (UINT_64);");

    let repeated = Field::slot("ids", Type::Int32).with_annotation(marker("repeated"));
    assert_eq!(field_line(repeated), "repeated int32 ids (INT_32);");
}

#[test]
fn last_repetition_marker_wins() {
    let field = Field::slot("id", Type::Int32)
        .with_annotation(marker("required"))
        .with_annotation(marker("optional"));
    assert_eq!(field_line(field), "optional int32 id (INT_32);");
}
