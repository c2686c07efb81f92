//! Response testing infrastructure.
//!
//! This module provides the test runner that executes assertions against
//! HTTP responses, and the JSON Schema validator it uses.

mod runner;
mod schema;

pub use runner::TestRunner;
pub use schema::{JsonSchema, SchemaCatalog, SchemaError, SchemaViolation};
