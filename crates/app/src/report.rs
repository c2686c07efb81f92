//! Report rendering.

use std::fmt::Write as _;

use restcheck_domain::SuiteReport;
use restcheck_infrastructure::{SerializationError, to_json_stable};

/// Renders a human-readable summary, one line per scenario.
#[must_use]
pub fn render_text(report: &SuiteReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{status} {:<9}{} ({} ms)",
            outcome.group.as_str(),
            outcome.name,
            outcome.duration_ms
        );

        if let Some(failure) = &outcome.failure {
            for line in failure.message.lines() {
                let _ = writeln!(out, "     {line}");
            }
            if let Some(expected) = &failure.expected {
                let _ = writeln!(out, "     expected: {expected}");
            }
            if let Some(actual) = &failure.actual {
                let _ = writeln!(out, "     actual:   {actual}");
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} scenarios: {} passed, {} failed ({:.1}%) in {} ms",
        report.total,
        report.passed,
        report.failed,
        report.pass_rate(),
        report.duration_ms
    );
    out
}

/// Renders the report as deterministic JSON.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn render_json(report: &SuiteReport) -> Result<String, SerializationError> {
    to_json_stable(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restcheck_domain::{FailureDetail, FailureKind, ScenarioGroup, ScenarioOutcome};

    fn sample() -> SuiteReport {
        SuiteReport::new(
            vec![
                ScenarioOutcome::pass("posts_schema", ScenarioGroup::Posts, 12),
                ScenarioOutcome::fail(
                    "post_delete",
                    ScenarioGroup::Posts,
                    8,
                    FailureDetail {
                        kind: FailureKind::Assertion,
                        message: "Wrong status".to_string(),
                        expected: Some("= 200".to_string()),
                        actual: Some("404".to_string()),
                    },
                ),
            ],
            20,
        )
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&sample()),
            "PASS posts    posts_schema (12 ms)\n\
             FAIL posts    post_delete (8 ms)\n     \
             Wrong status\n     \
             expected: = 200\n     \
             actual:   404\n\
             \n2 scenarios: 1 passed, 1 failed (50.0%) in 20 ms\n"
        );
    }

    #[test]
    fn test_render_json_is_parseable() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["failed"], 1);
        assert_eq!(value["outcomes"][1]["failure"]["kind"], "assertion");
    }
}
