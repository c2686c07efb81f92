//! Application error types

use std::fmt;

use restcheck_domain::{DomainError, FailureDetail, FailureKind};
use thiserror::Error;

use crate::ports::HttpClientError;

/// A comparison that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// What was being checked.
    pub message: String,
    /// Expected value in display form.
    pub expected: Option<String>,
    /// Actual value in display form.
    pub actual: Option<String>,
}

impl AssertionFailure {
    /// Creates a failure without expected/actual values.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Creates a failure carrying both sides of the comparison.
    #[must_use]
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(expected) = &self.expected {
            write!(f, "; expected: {expected}")?;
        }
        if let Some(actual) = &self.actual {
            write!(f, "; actual: {actual}")?;
        }
        Ok(())
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A configuration key is absent.
    #[error("missing configuration key '{key}'")]
    ConfigKeyMissing {
        /// The key that was looked up.
        key: String,
    },

    /// A configuration value has the wrong type.
    #[error("configuration key '{key}' should be {expected}, found {actual}")]
    ConfigType {
        /// The key that was looked up.
        key: String,
        /// Expected value type.
        expected: &'static str,
        /// The value found.
        actual: String,
    },

    /// A configuration value has the right type but is out of range.
    #[error("configuration key '{key}' is invalid: {message}")]
    ConfigInvalid {
        /// The key that was looked up.
        key: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The response body does not have the requested shape.
    #[error("cannot decode response as {target}: {message}")]
    Deserialization {
        /// Name of the requested type.
        target: &'static str,
        /// Decoder message.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// A request payload could not be encoded.
    #[error("cannot encode request body: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A verification did not hold.
    #[error("assertion failed: {0}")]
    Assertion(AssertionFailure),

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<AssertionFailure> for ApplicationError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Assertion(failure)
    }
}

impl ApplicationError {
    /// Converts the error into the reportable failure form.
    #[must_use]
    pub fn to_failure_detail(&self) -> FailureDetail {
        match self {
            Self::Assertion(failure) => FailureDetail {
                kind: FailureKind::Assertion,
                message: failure.message.clone(),
                expected: failure.expected.clone(),
                actual: failure.actual.clone(),
            },
            Self::Deserialization { body, .. } => FailureDetail {
                kind: FailureKind::Deserialization,
                message: self.to_string(),
                expected: None,
                actual: Some(body.clone()),
            },
            Self::ConfigKeyMissing { .. } | Self::ConfigType { .. } | Self::ConfigInvalid { .. } => {
                self.detail(FailureKind::Config)
            }
            Self::Transport(_) => self.detail(FailureKind::Transport),
            Self::Domain(_) | Self::Encoding(_) => self.detail(FailureKind::Request),
        }
    }

    fn detail(&self, kind: FailureKind) -> FailureDetail {
        FailureDetail {
            kind,
            message: self.to_string(),
            expected: None,
            actual: None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
