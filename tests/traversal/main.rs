//! Integration tests for the traversal engine
//!
//! Tests hook order, completeness, visit control, and cursor frames.

mod control;
mod cursor;
mod order;
