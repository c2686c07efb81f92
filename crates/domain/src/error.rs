//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A path template references more placeholders than values were supplied.
    #[error("path template '{template}' has no value for placeholder '{{{placeholder}}}'")]
    MissingPathParameter {
        /// The template being expanded.
        template: String,
        /// Name of the placeholder left without a value.
        placeholder: String,
    },

    /// More positional values were supplied than the template has placeholders.
    #[error("path template '{template}' takes {expected} parameter(s), got {actual}")]
    UnusedPathParameter {
        /// The template being expanded.
        template: String,
        /// Number of placeholders in the template.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A path template is malformed (e.g. an unterminated `{`).
    #[error("invalid path template '{0}'")]
    InvalidPathTemplate(String),

    /// A scenario group name is not one of `posts`, `comments` or `films`.
    #[error("unknown scenario group: {0}")]
    UnknownScenarioGroup(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
