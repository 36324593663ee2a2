//! Printer for the textual Parquet message syntax.
//!
//! # Example
//!
//! ```
//! use capnparquet_parquet::{
//!     GroupNode, LogicalType, PhysicalType, PrimitiveNode, Repetition, SchemaNode, print_schema,
//! };
//!
//! let age = PrimitiveNode::new("age", Repetition::Optional, PhysicalType::Int32, LogicalType::Uint8);
//! let root = SchemaNode::from(GroupNode::new(
//!     "person",
//!     Repetition::Required,
//!     LogicalType::None,
//!     vec![SchemaNode::from(age).into_ref()],
//! ));
//! assert_eq!(
//!     print_schema(&root),
//!     "message person {\n  optional int32 age (UINT_8);\n}\n"
//! );
//! ```

use std::fmt::Write;

use crate::schema::{GroupNode, PrimitiveNode, SchemaNode};
use crate::types::{LogicalType, PhysicalType};

/// Configuration for schema printing.
#[derive(Debug, Clone)]
pub struct PrintConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Print a schema rooted at `root` as a `message`.
#[must_use]
pub fn print_schema(root: &SchemaNode) -> String {
    print_schema_with_config(root, PrintConfig::default())
}

/// Print a schema with custom configuration.
#[must_use]
pub fn print_schema_with_config(root: &SchemaNode, config: PrintConfig) -> String {
    let mut printer = SchemaPrinter::new(config);
    printer.print_root(root);
    printer.output
}

/// Schema printer state.
struct SchemaPrinter {
    config: PrintConfig,
    output: String,
    indent_level: usize,
}

impl SchemaPrinter {
    fn new(config: PrintConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn print_root(&mut self, root: &SchemaNode) {
        match root {
            SchemaNode::Group(group) => {
                let _ = writeln!(self.output, "message {} {{", group.name);
                self.print_fields(group);
                self.output.push_str("}\n");
            }
            SchemaNode::Primitive(primitive) => self.print_primitive(primitive),
        }
    }

    fn print_fields(&mut self, group: &GroupNode) {
        self.indent_level += 1;
        for field in &group.fields {
            match field.as_ref() {
                SchemaNode::Group(g) => self.print_group(g),
                SchemaNode::Primitive(p) => self.print_primitive(p),
            }
        }
        self.indent_level -= 1;
    }

    fn print_group(&mut self, group: &GroupNode) {
        self.write_indent();
        let _ = write!(self.output, "{} group {}", group.repetition, group.name);
        if group.logical_type != LogicalType::None {
            let _ = write!(self.output, " ({})", group.logical_type);
        }
        self.output.push_str(" {\n");
        self.print_fields(group);
        self.write_indent();
        self.output.push_str("}\n");
    }

    fn print_primitive(&mut self, node: &PrimitiveNode) {
        self.write_indent();
        let _ = write!(self.output, "{} {}", node.repetition, node.physical_type);
        if node.physical_type == PhysicalType::FixedLenByteArray {
            let _ = write!(self.output, "({})", node.type_length.unwrap_or(0));
        }
        let _ = write!(self.output, " {}", node.name);
        match (node.logical_type, node.decimal) {
            (LogicalType::Decimal, Some(decimal)) => {
                let _ = write!(self.output, " (DECIMAL({},{}))", decimal.precision, decimal.scale);
            }
            (LogicalType::None, _) => {}
            (logical, _) => {
                let _ = write!(self.output, " ({logical})");
            }
        }
        self.output.push_str(";\n");
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.config.indent_width;
        self.output.extend(std::iter::repeat_n(' ', width));
    }
}
