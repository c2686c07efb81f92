//! Response assertions and scenario reporting.
//!
//! This module provides types for describing checks on HTTP responses and
//! for reporting the outcome of verification scenarios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check response time is strictly below a limit.
    ResponseTime {
        /// Exclusive upper bound in milliseconds.
        max_ms: u64,
    },
    /// Check header exists and optionally its exact value.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        value: Option<String>,
    },
    /// Check a header carries an HTTP-date in the current UTC minute.
    HeaderDate {
        /// Header name, usually `Date`.
        name: String,
    },
    /// Check body contains text.
    BodyContains {
        /// Text to search for.
        text: String,
    },
    /// Check body equals expected value.
    BodyEquals {
        /// Expected body content.
        expected: String,
        /// Drop all whitespace from the body before comparing.
        #[serde(default)]
        ignore_whitespace: bool,
    },
    /// Check JSON path exists and optionally its value.
    JsonPath {
        /// JSONPath expression (e.g., "$.data.id").
        path: String,
        /// Expected value (as JSON).
        expected: Option<serde_json::Value>,
    },
    /// Check content type.
    ContentType {
        /// Expected content type (partial match).
        expected: String,
    },
    /// Check body conforms to a bundled JSON Schema document.
    MatchesSchema {
        /// Schema file name, e.g. `posts-schema.json`.
        schema: String,
    },
}

impl Assertion {
    /// Exact status code check.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode { expected: code }
    }

    /// Latency check.
    #[must_use]
    pub const fn faster_than(max_ms: u64) -> Self {
        Self::ResponseTime { max_ms }
    }

    /// Exact header value check.
    #[must_use]
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::HeaderExists {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// `Date` header in the current minute.
    #[must_use]
    pub fn current_date() -> Self {
        Self::HeaderDate {
            name: "Date".to_string(),
        }
    }

    /// Schema conformance check.
    #[must_use]
    pub fn schema(schema: impl Into<String>) -> Self {
        Self::MatchesSchema {
            schema: schema.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::ResponseTime { max_ms } => format!("Response time < {max_ms}ms"),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' exists"),
            Self::HeaderDate { name } => format!("Header '{name}' is in the current minute"),
            Self::BodyContains { text } => format!("Body contains '{text}'"),
            Self::BodyEquals { .. } => "Body equals expected".to_string(),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::ContentType { expected } => format!("Content-Type contains '{expected}'"),
            Self::MatchesSchema { schema } => format!("Body matches schema '{schema}'"),
        }
    }

    /// The expected value in display form, for failure reports.
    #[must_use]
    pub fn expected_display(&self) -> Option<String> {
        match self {
            Self::StatusCode { expected } => Some(format!("= {expected}")),
            Self::ResponseTime { max_ms } => Some(format!("< {max_ms}ms")),
            Self::HeaderExists { value, .. } => value.clone(),
            Self::HeaderDate { .. } => Some("current UTC minute".to_string()),
            Self::BodyContains { text } => Some(text.clone()),
            Self::BodyEquals { expected, .. } => Some(expected.clone()),
            Self::JsonPath { expected, .. } => expected.as_ref().map(ToString::to_string),
            Self::ContentType { expected } => Some(expected.clone()),
            Self::MatchesSchema { schema } => Some(schema.clone()),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// Service area a scenario belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioGroup {
    /// Posts endpoints of the blog API.
    Posts,
    /// Comments endpoints of the blog API.
    Comments,
    /// Films and people endpoints of the film API.
    Films,
}

impl ScenarioGroup {
    /// Returns the group name as used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Films => "films",
        }
    }
}

impl fmt::Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posts" => Ok(Self::Posts),
            "comments" => Ok(Self::Comments),
            "films" => Ok(Self::Films),
            other => Err(DomainError::UnknownScenarioGroup(other.to_string())),
        }
    }
}

/// Category of a scenario failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Configuration was missing or malformed.
    Config,
    /// The request never produced a response.
    Transport,
    /// The response body did not have the expected shape.
    Deserialization,
    /// Expected and actual values differ.
    Assertion,
    /// A request could not be built.
    Request,
    /// The scenario panicked.
    Panic,
}

/// Why a scenario failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
    /// Expected value, when the failure is a comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value, when the failure is a comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Scenario group.
    pub group: ScenarioGroup,
    /// Whether every check passed.
    pub passed: bool,
    /// Wall-clock time spent in the scenario.
    pub duration_ms: u64,
    /// Failure details when `passed` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDetail>,
}

impl ScenarioOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn pass(name: impl Into<String>, group: ScenarioGroup, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            group,
            passed: true,
            duration_ms,
            failure: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(
        name: impl Into<String>,
        group: ScenarioGroup,
        duration_ms: u64,
        failure: FailureDetail,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            passed: false,
            duration_ms,
            failure: Some(failure),
        }
    }
}

/// Results from running a set of scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Individual scenario outcomes, in catalog order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Total number of scenarios run.
    pub total: usize,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create a report from outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<ScenarioOutcome>, duration_ms: u64) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed = total - passed;

        Self {
            outcomes,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all scenarios passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Iterates over failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}
