//! Repetition, physical, and logical column types.

use std::fmt;

/// How many values a field holds per record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Repetition {
    /// Exactly one.
    Required,
    /// Zero or one.
    #[default]
    Optional,
    /// Zero or more.
    Repeated,
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Repeated => "repeated",
        })
    }
}

/// Storage representation of a primitive column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// 1-bit boolean.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 96-bit signed integer (legacy timestamps).
    Int96,
    /// IEEE 32-bit float.
    Float,
    /// IEEE 64-bit float.
    Double,
    /// Variable-length bytes.
    ByteArray,
    /// Fixed-length bytes; the length lives on the node.
    FixedLenByteArray,
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Int96 => "int96",
            Self::Float => "float",
            Self::Double => "double",
            Self::ByteArray => "binary",
            Self::FixedLenByteArray => "fixed_len_byte_array",
        })
    }
}

/// Semantic annotation on a column or group (the converted type).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LogicalType {
    /// No annotation.
    #[default]
    None,
    /// UTF-8 string.
    Utf8,
    /// Map group.
    Map,
    /// Key/value pair group inside a map.
    MapKeyValue,
    /// List group.
    List,
    /// Enum stored as a string.
    Enum,
    /// Fixed-point decimal; precision and scale live on the node.
    Decimal,
    /// Days since the epoch.
    Date,
    /// Milliseconds since midnight.
    TimeMillis,
    /// Microseconds since midnight.
    TimeMicros,
    /// Milliseconds since the epoch.
    TimestampMillis,
    /// Microseconds since the epoch.
    TimestampMicros,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// JSON document.
    Json,
    /// BSON document.
    Bson,
    /// Months, days, milliseconds.
    Interval,
}

impl LogicalType {
    /// Returns true for the annotations that belong on groups.
    #[must_use]
    pub const fn is_nested(self) -> bool {
        matches!(self, Self::Map | Self::MapKeyValue | Self::List)
    }

    /// Returns the upper-case name used in schema text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Utf8 => "UTF8",
            Self::Map => "MAP",
            Self::MapKeyValue => "MAP_KEY_VALUE",
            Self::List => "LIST",
            Self::Enum => "ENUM",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::TimeMillis => "TIME_MILLIS",
            Self::TimeMicros => "TIME_MICROS",
            Self::TimestampMillis => "TIMESTAMP_MILLIS",
            Self::TimestampMicros => "TIMESTAMP_MICROS",
            Self::Uint8 => "UINT_8",
            Self::Uint16 => "UINT_16",
            Self::Uint32 => "UINT_32",
            Self::Uint64 => "UINT_64",
            Self::Int8 => "INT_8",
            Self::Int16 => "INT_16",
            Self::Int32 => "INT_32",
            Self::Int64 => "INT_64",
            Self::Json => "JSON",
            Self::Bson => "BSON",
            Self::Interval => "INTERVAL",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
