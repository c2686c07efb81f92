//! Restcheck Application - Client wrapper, configuration and fixtures
//!
//! This crate holds everything the verification scenarios need that does not
//! touch the network directly: the configuration model, the REST client
//! wrapper over the [`ports::HttpClient`] port, the fixture rows and the
//! client-side aggregation of film data.

pub mod aggregation;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod ports;
pub mod verify;

pub use client::{PathArg, RequestBuilder, RestClient};
pub use config::{Config, ConfigValue, ConnectionSettings, SuiteSettings};
pub use error::{ApplicationError, ApplicationResult, AssertionFailure};
pub use fixtures::FixtureRow;
pub use ports::{Clock, HttpClient, HttpClientError};
pub use verify::{ensure, ensure_eq, ensure_passed};
