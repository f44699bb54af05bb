//! Dynamic statement fragments for the generic record path.
//!
//! Identifiers entering SQL text are validated against the schema registry
//! first; caller-supplied values are always bound as parameters. This split
//! is the injection defense: the identifier channel is closed by the
//! registry, the value channel never touches the query text.

mod binder;
mod builder;
mod value;

pub use binder::SqlBinder;
pub use builder::{build_query_parts, QueryParts};
pub use value::{field_input_value, parse_typed_value};
