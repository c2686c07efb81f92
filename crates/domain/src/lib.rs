//! Restcheck Domain - Core verification types
//!
//! This crate defines the resources of the services under test, the request
//! and response value types, and the assertion and report model.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod model;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use model::{CharacterHeight, Comment, Film, FilmSummary, Page, Person, Post};
pub use request::{
    Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec, expand_path,
    resolve_url,
};
pub use response::ResponseSpec;
pub use testing::{
    Assertion, AssertionResult, FailureDetail, FailureKind, ScenarioGroup, ScenarioOutcome,
    SuiteReport,
};
