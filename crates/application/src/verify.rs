//! Checks that turn mismatches into [`ApplicationError::Assertion`].

use std::fmt::Debug;

use restcheck_domain::AssertionResult;

use crate::error::{ApplicationError, ApplicationResult, AssertionFailure};

/// Fails with `message` unless `condition` holds.
///
/// # Errors
///
/// Returns [`ApplicationError::Assertion`] when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> ApplicationResult<()> {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure::new(message).into())
    }
}

/// Fails with both values when `expected != actual`.
///
/// # Errors
///
/// Returns [`ApplicationError::Assertion`] carrying the `Debug` form of both sides.
pub fn ensure_eq<T>(message: impl Into<String>, expected: &T, actual: &T) -> ApplicationResult<()>
where
    T: PartialEq + Debug + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::mismatch(message, format!("{expected:?}"), format!("{actual:?}")).into())
    }
}

/// Fails if any result did not pass, reporting every failure at once.
///
/// # Errors
///
/// Returns [`ApplicationError::Assertion`]. With a single failure its
/// expected and actual values are kept; with several, the messages are
/// joined and each line carries its own values.
pub fn ensure_passed(results: &[AssertionResult]) -> ApplicationResult<()> {
    let failed: Vec<&AssertionResult> = results.iter().filter(|r| !r.passed).collect();
    match failed.as_slice() {
        [] => Ok(()),
        [single] => Err(ApplicationError::Assertion(to_failure(single))),
        many => {
            let message = many
                .iter()
                .map(|r| to_failure(r).to_string())
                .collect::<Vec<_>>()
                .join("\n");
            Err(AssertionFailure::new(format!("{} checks failed:\n{message}", many.len())).into())
        }
    }
}

fn to_failure(result: &AssertionResult) -> AssertionFailure {
    AssertionFailure {
        message: result
            .error
            .clone()
            .unwrap_or_else(|| result.assertion.description()),
        expected: result.assertion.expected_display(),
        actual: result.actual.clone(),
    }
}
