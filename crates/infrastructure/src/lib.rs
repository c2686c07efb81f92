//! Restcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the YAML configuration loader and
//! the assertion runner.

pub mod adapters;
pub mod config;
pub mod serialization;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigLoadError, load_config_file, load_config_str};
pub use serialization::{SerializationError, to_json_stable};
pub use testing::{JsonSchema, SchemaCatalog, SchemaError, SchemaViolation, TestRunner};
