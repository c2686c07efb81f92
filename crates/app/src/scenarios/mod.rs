//! Scenario catalog.
//!
//! A scenario is an async function taking the [`SuiteContext`] and returning
//! `Ok(())` when every check holds. Scenarios share nothing mutable, so any of
//! them can run alone or alongside the others.

mod comments;
mod films;
mod posts;

use std::future::Future;
use std::pin::Pin;

use restcheck_application::{ApplicationResult, ensure_passed};
use restcheck_domain::{Assertion, ResponseSpec, ScenarioGroup};

use crate::context::SuiteContext;

/// Future returned by a scenario.
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = ApplicationResult<()>> + Send + 'a>>;

/// A named, independently runnable scenario.
#[derive(Clone, Copy)]
pub struct ScenarioDef {
    /// Unique name.
    pub name: &'static str,
    /// API area the scenario covers.
    pub group: ScenarioGroup,
    /// Entry point.
    pub run: fn(&SuiteContext) -> ScenarioFuture<'_>,
}

impl std::fmt::Debug for ScenarioDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioDef")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

macro_rules! scenario {
    ($group:expr, $func:path, $name:literal) => {
        ScenarioDef {
            name: $name,
            group: $group,
            run: |ctx| Box::pin($func(ctx)),
        }
    };
}
pub(crate) use scenario;

/// Every scenario, in execution order.
#[must_use]
pub fn catalog() -> Vec<ScenarioDef> {
    let mut all = posts::scenarios();
    all.extend(comments::scenarios());
    all.extend(films::scenarios());
    all
}

/// `Cache-Control` value that asks every cache to step aside.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Response headers the blog API sends with every JSON response.
fn blog_header_assertions() -> Vec<Assertion> {
    vec![
        Assertion::status(200),
        Assertion::header("Content-Type", "application/json; charset=utf-8"),
        Assertion::header("Connection", "keep-alive"),
        Assertion::header("Cache-Control", "max-age=43200"),
        Assertion::header("Expires", "-1"),
        Assertion::current_date(),
    ]
}

/// Evaluates every assertion, then fails with all failures at once.
fn check(ctx: &SuiteContext, response: &ResponseSpec, assertions: &[Assertion]) -> ApplicationResult<()> {
    ensure_passed(&ctx.runner.run_all(assertions, response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let all = catalog();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(all.len(), 23);
    }

    #[test]
    fn test_catalog_is_grouped_in_order() {
        let groups: Vec<_> = catalog().iter().map(|s| s.group).collect();
        let first_comment = groups.iter().position(|g| *g == ScenarioGroup::Comments);
        let first_film = groups.iter().position(|g| *g == ScenarioGroup::Films);
        assert_eq!(first_comment, Some(12));
        assert_eq!(first_film, Some(19));
        assert!(groups[..12].iter().all(|g| *g == ScenarioGroup::Posts));
    }
}
