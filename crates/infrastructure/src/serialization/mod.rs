//! Deterministic JSON output for suite reports.
//!
//! Reports are printed with 2-space indentation and a trailing newline, with
//! fields in declaration order, so two runs with the same outcomes produce the
//! same text apart from timings.

mod json;

pub use json::{SerializationError, to_json_stable};
