//! Recognized annotations and the semantics they resolve to.
//!
//! Applied annotations are folded into [`AnnotationFacts`] by name. The
//! facts resolve to at most one [`Semantic`], chosen by a fixed priority,
//! plus at most one [`NestedMarker`] for groups.

use std::collections::BTreeSet;

use capnparquet_parquet::Repetition;
use tracing::warn;

use crate::ast::Literal;

/// Annotation names the mapping understands. Anything else is ignored.
pub const RECOGNIZED_ANNOTATIONS: [&str; 20] = [
    "schema",
    "required",
    "optional",
    "repeated",
    "length",
    "scale",
    "precision",
    "decimal",
    "date",
    "timeMillis",
    "timeMicros",
    "timestampMillis",
    "timestampMicros",
    "bson",
    "json",
    "interval",
    "fixed",
    "map",
    "mapKeyValue",
    "list",
];

/// Valueless markers, in semantic priority order followed by nested markers.
const MARKERS: [&str; 13] = [
    "decimal",
    "date",
    "timeMillis",
    "timeMicros",
    "timestampMillis",
    "timestampMicros",
    "bson",
    "json",
    "interval",
    "fixed",
    "map",
    "mapKeyValue",
    "list",
];

/// Returns true if `name` is a recognized annotation.
#[must_use]
pub fn is_recognized(name: &str) -> bool {
    RECOGNIZED_ANNOTATIONS.contains(&name)
}

/// Resolution unit of a temporal semantic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemporalUnit {
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
}

/// The semantic category a node's annotations select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Fixed-point decimal.
    Decimal {
        /// Total digits.
        precision: i32,
        /// Fractional digits.
        scale: i32,
    },
    /// Date or time.
    Temporal(TemporalUnit),
    /// BSON document.
    Bson,
    /// JSON document.
    Json,
    /// Month/day/millisecond interval.
    Interval,
    /// Fixed-length binary.
    FixedBinary {
        /// Byte length.
        length: i32,
    },
}

/// Group-level markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NestedMarker {
    /// A map.
    Map,
    /// The key/value group of a map.
    MapKeyValue,
    /// A list.
    List,
}

/// Facts gathered from the applied annotations of one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationFacts {
    /// Explicit repetition. The last one applied wins.
    pub repetition: Option<Repetition>,
    /// Explicit byte length.
    pub length: Option<i32>,
    /// Decimal scale.
    pub scale: Option<i32>,
    /// Decimal precision.
    pub precision: Option<i32>,
    /// Override name for the emitted root.
    pub schema_name: Option<String>,
    /// Valueless markers that were applied.
    pub markers: BTreeSet<&'static str>,
}

impl AnnotationFacts {
    /// Records one applied annotation.
    ///
    /// Returns false if `name` is not recognized. Integer annotations
    /// without an integer value and `schema` without text are ignored.
    pub fn apply(&mut self, name: &str, literal: Option<&Literal>) -> bool {
        match name {
            "schema" => {
                if let Some(text) = literal.and_then(Literal::as_str) {
                    self.schema_name = Some(text.to_owned());
                }
            }
            "required" => self.repetition = Some(Repetition::Required),
            "optional" => self.repetition = Some(Repetition::Optional),
            "repeated" => self.repetition = Some(Repetition::Repeated),
            "length" => self.length = literal.and_then(Literal::as_i32).or(self.length),
            "scale" => self.scale = literal.and_then(Literal::as_i32).or(self.scale),
            "precision" => self.precision = literal.and_then(Literal::as_i32).or(self.precision),
            other => match MARKERS.iter().find(|m| **m == other) {
                Some(marker) => {
                    self.markers.insert(*marker);
                }
                None => return false,
            },
        }
        true
    }

    /// Returns true if `marker` was applied.
    #[must_use]
    pub fn has(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    /// Resolves the highest-priority semantic.
    ///
    /// A `decimal` without `precision` or a `fixed` without `length` is
    /// dropped and the next marker in priority order is considered.
    #[must_use]
    pub fn semantic(&self) -> Option<Semantic> {
        if self.has("decimal") {
            match self.precision {
                Some(precision) => {
                    return Some(Semantic::Decimal {
                        precision,
                        scale: self.scale.unwrap_or(0),
                    });
                }
                None => warn!("decimal annotation without precision ignored"),
            }
        }
        let temporal = [
            ("date", TemporalUnit::Date),
            ("timeMillis", TemporalUnit::TimeMillis),
            ("timeMicros", TemporalUnit::TimeMicros),
            ("timestampMillis", TemporalUnit::TimestampMillis),
            ("timestampMicros", TemporalUnit::TimestampMicros),
        ];
        if let Some((_, unit)) = temporal.iter().find(|(m, _)| self.has(m)) {
            return Some(Semantic::Temporal(*unit));
        }
        if self.has("bson") {
            return Some(Semantic::Bson);
        }
        if self.has("json") {
            return Some(Semantic::Json);
        }
        if self.has("interval") {
            return Some(Semantic::Interval);
        }
        if self.has("fixed") {
            match self.length {
                Some(length) => return Some(Semantic::FixedBinary { length }),
                None => warn!("fixed annotation without length ignored"),
            }
        }
        None
    }

    /// Resolves the group-level marker, `map` first.
    #[must_use]
    pub fn nested(&self) -> Option<NestedMarker> {
        if self.has("map") {
            Some(NestedMarker::Map)
        } else if self.has("mapKeyValue") {
            Some(NestedMarker::MapKeyValue)
        } else if self.has("list") {
            Some(NestedMarker::List)
        } else {
            None
        }
    }
}
