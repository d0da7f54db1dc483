//! Declarative input shapes for tools and prompts.
//!
//! A capability declares its arguments as a list of [`FieldSchema`]s. The
//! same declaration renders the JSON Schema advertised to clients and drives
//! the generic validation that runs before any handler sees the arguments.

pub mod field;
pub mod input;

pub use field::{Constraint, FieldSchema, FieldType};
pub use input::{parse_arguments, InputSchema};
