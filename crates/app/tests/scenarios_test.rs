//! Runs the scenario catalog against the in-process mock services.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use common::{Flavor, MockServer};
use pretty_assertions::assert_eq;
use restcheck::{ScenarioDef, SuiteOptions, SuiteRunner, catalog, render_json, run_one};
use restcheck_domain::ScenarioGroup;

fn scenario(name: &str) -> ScenarioDef {
    catalog()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no scenario named {name}"))
}

fn failures(report: &restcheck_domain::SuiteReport) -> Vec<String> {
    report
        .failures()
        .map(|o| format!("{}: {:?}", o.name, o.failure))
        .collect()
}

#[tokio::test]
async fn test_full_catalog_passes_sequentially() {
    let server = MockServer::start(Flavor::Faithful).await;
    let runner = SuiteRunner::new(Arc::new(server.context()), SuiteOptions::default());

    let report = runner.run(catalog()).await;

    assert_eq!(failures(&report), Vec::<String>::new());
    assert_eq!(report.total, 23);
    assert!(report.all_passed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_run_keeps_catalog_order() {
    let server = MockServer::start(Flavor::Faithful).await;
    let options = SuiteOptions {
        jobs: 4,
        stop_on_failure: false,
    };
    let runner = SuiteRunner::new(Arc::new(server.context()), options);

    let report = runner.run(catalog()).await;

    assert_eq!(failures(&report), Vec::<String>::new());
    let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
    let expected: Vec<_> = catalog().iter().map(|s| s.name).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_single_scenarios_run_in_isolation() {
    let server = MockServer::start(Flavor::Faithful).await;
    let context = server.context();

    for name in ["post_update", "comments_equivalent_paths", "films_tallest_overall"] {
        let outcome = run_one(&context, scenario(name)).await;
        assert!(outcome.passed, "{name}: {:?}", outcome.failure);
    }
}

#[tokio::test]
async fn test_group_selection() {
    let server = MockServer::start(Flavor::Faithful).await;
    let runner = SuiteRunner::new(Arc::new(server.context()), SuiteOptions::default());
    let films: Vec<_> = catalog()
        .into_iter()
        .filter(|s| s.group == ScenarioGroup::Films)
        .collect();

    let report = runner.run(films).await;

    assert_eq!(report.total, 4);
    assert!(report.outcomes.iter().all(|o| o.group == ScenarioGroup::Films));
    assert!(report.all_passed(), "{:?}", failures(&report));
}

#[tokio::test]
async fn test_json_report_lists_every_outcome() {
    let server = MockServer::start(Flavor::Faithful).await;
    let runner = SuiteRunner::new(Arc::new(server.context()), SuiteOptions::default());
    let posts: Vec<_> = catalog()
        .into_iter()
        .filter(|s| s.name.starts_with("posts_"))
        .collect();

    let report = runner.run(posts).await;
    let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

    assert_eq!(json["total"], 3);
    assert_eq!(json["failed"], 0);
    assert_eq!(json["outcomes"][0]["name"], "posts_schema");
    assert!(json["outcomes"][0].get("failure").is_none());
}
