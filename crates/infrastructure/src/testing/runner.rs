//! Test runner implementation.
//!
//! Executes assertions against HTTP responses. Every assertion in a batch is
//! evaluated, so a response with several bad headers reports all of them.

use std::sync::Arc;

use chrono::DateTime;
use restcheck_application::ports::Clock;
use restcheck_domain::{Assertion, AssertionResult, ResponseSpec};
use serde_json::Value;

use super::schema::SchemaCatalog;

const PREVIEW_CHARS: usize = 100;

/// Test runner that executes assertions against responses.
#[derive(Clone)]
pub struct TestRunner {
    schemas: SchemaCatalog,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestRunner")
            .field("schemas", &self.schemas.names())
            .finish_non_exhaustive()
    }
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(schemas: SchemaCatalog, clock: Arc<dyn Clock>) -> Self {
        Self { schemas, clock }
    }

    /// Run every assertion against a response, in order.
    #[must_use]
    pub fn run_all(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => check_status_code(assertion, response, *expected),
            Assertion::ResponseTime { max_ms } => {
                check_response_time(assertion, response, *max_ms)
            }
            Assertion::HeaderExists { name, value } => {
                check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::HeaderDate { name } => self.check_header_date(assertion, response, name),
            Assertion::BodyContains { text } => check_body_contains(assertion, response, text),
            Assertion::BodyEquals {
                expected,
                ignore_whitespace,
            } => check_body_equals(assertion, response, expected, *ignore_whitespace),
            Assertion::JsonPath { path, expected } => {
                check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::ContentType { expected } => {
                check_content_type(assertion, response, expected)
            }
            Assertion::MatchesSchema { schema } => self.check_schema(assertion, response, schema),
        }
    }

    /// Both the header and the clock are truncated to the minute.
    fn check_header_date(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
    ) -> AssertionResult {
        let Some(raw) = response.get_header(name) else {
            return AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found"));
        };
        let Ok(date) = DateTime::parse_from_rfc2822(raw) else {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                raw.clone(),
                format!("Header '{name}' is not an HTTP date"),
            );
        };

        let now = self.clock.now();
        if date.timestamp().div_euclid(60) == now.timestamp().div_euclid(60) {
            AssertionResult::pass_with_value(assertion.clone(), raw.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                raw.clone(),
                format!(
                    "Header '{name}' is outside the current minute ({})",
                    now.format("%Y-%m-%d %H:%M UTC")
                ),
            )
        }
    }

    fn check_schema(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
    ) -> AssertionResult {
        let Some(schema) = self.schemas.get(name) else {
            return AssertionResult::fail(assertion.clone(), format!("Unknown schema '{name}'"));
        };
        let json = match serde_json::from_str::<Value>(&response.body) {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail_with_value(
                    assertion.clone(),
                    response.body_preview(PREVIEW_CHARS),
                    format!("Failed to parse body as JSON: {e}"),
                );
            }
        };

        let violations = schema.validate(&json);
        if violations.is_empty() {
            AssertionResult::pass(assertion.clone())
        } else {
            let listed: Vec<String> = violations.iter().map(ToString::to_string).collect();
            AssertionResult::fail_with_value(
                assertion.clone(),
                listed.join("; "),
                format!(
                    "Body does not match schema '{name}' ({} violation(s))",
                    violations.len()
                ),
            )
        }
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: u16,
) -> AssertionResult {
    let actual = response.status;
    if actual == expected {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("Expected status = {expected}, got {actual}"),
        )
    }
}

fn check_response_time(
    assertion: &Assertion,
    response: &ResponseSpec,
    max_ms: u64,
) -> AssertionResult {
    let actual_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX);
    if actual_ms < max_ms {
        AssertionResult::pass_with_value(assertion.clone(), format!("{actual_ms}ms"))
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            format!("{actual_ms}ms"),
            format!("Response took {actual_ms}ms, expected < {max_ms}ms"),
        )
    }
}

fn check_header_exists(
    assertion: &Assertion,
    response: &ResponseSpec,
    name: &str,
    expected_value: Option<&str>,
) -> AssertionResult {
    match (response.get_header(name), expected_value) {
        (Some(actual), Some(expected)) if actual != expected => AssertionResult::fail_with_value(
            assertion.clone(),
            actual.clone(),
            format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
        ),
        (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
        (None, _) => AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found")),
    }
}

fn check_body_contains(
    assertion: &Assertion,
    response: &ResponseSpec,
    text: &str,
) -> AssertionResult {
    if response.body.contains(text) {
        AssertionResult::pass(assertion.clone())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            response.body_preview(PREVIEW_CHARS),
            format!("Body does not contain '{text}'"),
        )
    }
}

fn check_body_equals(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &str,
    ignore_whitespace: bool,
) -> AssertionResult {
    let actual = if ignore_whitespace {
        response.body_without_whitespace()
    } else {
        response.body.clone()
    };

    if actual == expected {
        AssertionResult::pass_with_value(assertion.clone(), actual)
    } else {
        let preview = if actual.chars().count() > PREVIEW_CHARS {
            format!("{}...", actual.chars().take(PREVIEW_CHARS).collect::<String>())
        } else {
            actual
        };
        AssertionResult::fail_with_value(
            assertion.clone(),
            preview,
            "Body does not match expected value",
        )
    }
}

fn parse_body(assertion: &Assertion, response: &ResponseSpec) -> Result<Value, AssertionResult> {
    serde_json::from_str::<Value>(&response.body).map_err(|e| {
        AssertionResult::fail(
            assertion.clone(),
            format!("Failed to parse body as JSON: {e}"),
        )
    })
}

fn check_json_path(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    expected: Option<&Value>,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(result) => return result,
    };

    match query_json_path(&json, path) {
        Ok(Some(value)) => match expected {
            Some(expected_value) if &value != expected_value => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' value mismatch: expected {expected_value}, got {value}"
                ),
            ),
            _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
        },
        Ok(None) => {
            AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
        }
        Err(e) => AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}")),
    }
}

fn check_content_type(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &str,
) -> AssertionResult {
    match &response.content_type {
        Some(actual) if actual.contains(expected) => {
            AssertionResult::pass_with_value(assertion.clone(), actual.clone())
        }
        Some(actual) => AssertionResult::fail_with_value(
            assertion.clone(),
            actual.clone(),
            format!("Content-Type '{actual}' does not contain '{expected}'"),
        ),
        None => AssertionResult::fail(assertion.clone(), "No Content-Type header present"),
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0], $[0].field, $.array[*]
fn query_json_path(json: &Value, path: &str) -> Result<Option<Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    if rest.is_empty() {
        return Ok(Some(json.clone()));
    }

    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let mut current = json;

    for segment in split_path_segments(rest) {
        if let Some((name, index)) = parse_array_access(&segment) {
            if !name.is_empty() {
                match current.get(name) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            if index == "*" {
                return Ok(Some(current.clone()));
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment.as_str()) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment.strip_suffix(']')?;
    Some((&segment[..bracket_start], &inner[bracket_start + 1..]))
}
