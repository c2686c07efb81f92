//! Suite runner: executes scenarios and collects their outcomes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use restcheck_domain::{FailureDetail, FailureKind, ScenarioOutcome, SuiteReport};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, warn};

use crate::context::SuiteContext;
use crate::scenarios::ScenarioDef;

/// How the suite is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteOptions {
    /// Maximum number of scenarios in flight.
    pub jobs: usize,
    /// Skip the remaining scenarios after the first failure.
    pub stop_on_failure: bool,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            stop_on_failure: false,
        }
    }
}

/// Runs scenarios against one shared context.
pub struct SuiteRunner {
    context: Arc<SuiteContext>,
    options: SuiteOptions,
}

impl SuiteRunner {
    /// Creates a runner.
    #[must_use]
    pub const fn new(context: Arc<SuiteContext>, options: SuiteOptions) -> Self {
        Self { context, options }
    }

    /// Runs `scenarios` and returns the report, outcomes in catalog order.
    ///
    /// Scenarios skipped by `stop_on_failure` do not appear in the report.
    pub async fn run(&self, scenarios: Vec<ScenarioDef>) -> SuiteReport {
        let start = Instant::now();
        info!(
            scenarios = scenarios.len(),
            jobs = self.options.jobs,
            "running suite"
        );

        let outcomes = if self.options.jobs <= 1 {
            self.run_sequential(scenarios).await
        } else {
            self.run_concurrent(scenarios).await
        };

        let report = SuiteReport::new(outcomes, millis(start.elapsed()));
        info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        report
    }

    async fn run_sequential(&self, scenarios: Vec<ScenarioDef>) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let context = Arc::clone(&self.context);
            let task = tokio::spawn(async move { run_one(&context, scenario).await });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(join_error) => panicked(scenario, &join_error),
            };
            let failed = !outcome.passed;
            outcomes.push(outcome);
            if failed && self.options.stop_on_failure {
                warn!("stopping after first failure");
                break;
            }
        }
        outcomes
    }

    async fn run_concurrent(&self, scenarios: Vec<ScenarioDef>) -> Vec<ScenarioOutcome> {
        let permits = Arc::new(Semaphore::new(self.options.jobs));
        let stop = Arc::new(AtomicBool::new(false));
        let stop_on_failure = self.options.stop_on_failure;

        let mut tasks = JoinSet::new();
        let mut spawned = HashMap::new();

        for (index, scenario) in scenarios.iter().copied().enumerate() {
            let context = Arc::clone(&self.context);
            let permits = Arc::clone(&permits);
            let stop = Arc::clone(&stop);

            let handle = tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (index, None);
                };
                if stop.load(Ordering::Acquire) {
                    return (index, None);
                }
                let outcome = run_one(&context, scenario).await;
                if !outcome.passed && stop_on_failure {
                    stop.store(true, Ordering::Release);
                }
                (index, Some(outcome))
            });
            spawned.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<ScenarioOutcome>> = vec![None; scenarios.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = outcome,
                Err(join_error) => {
                    let Some(&index) = spawned.get(&join_error.id()) else {
                        continue;
                    };
                    slots[index] = Some(panicked(scenarios[index], &join_error));
                }
            }
        }

        if stop.load(Ordering::Acquire) {
            warn!("remaining scenarios skipped after a failure");
        }
        slots.into_iter().flatten().collect()
    }
}

/// Runs one scenario and turns its result into an outcome.
pub async fn run_one(context: &SuiteContext, scenario: ScenarioDef) -> ScenarioOutcome {
    let start = Instant::now();
    let result = (scenario.run)(context).await;
    let duration_ms = millis(start.elapsed());

    match result {
        Ok(()) => {
            info!(scenario = scenario.name, group = %scenario.group, duration_ms, "passed");
            ScenarioOutcome::pass(scenario.name, scenario.group, duration_ms)
        }
        Err(err) => {
            warn!(scenario = scenario.name, group = %scenario.group, duration_ms, "failed: {err}");
            ScenarioOutcome::fail(
                scenario.name,
                scenario.group,
                duration_ms,
                err.to_failure_detail(),
            )
        }
    }
}

/// Outcome of a scenario whose task died before producing one.
fn panicked(scenario: ScenarioDef, join_error: &JoinError) -> ScenarioOutcome {
    error!(scenario = scenario.name, "scenario task failed: {join_error}");
    ScenarioOutcome::fail(
        scenario.name,
        scenario.group,
        0,
        FailureDetail {
            kind: FailureKind::Panic,
            message: join_error.to_string(),
            expected: None,
            actual: None,
        },
    )
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
