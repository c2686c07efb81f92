//! Command-line interface.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use restcheck_domain::ScenarioGroup;

use crate::scenarios::ScenarioDef;
use crate::suite::SuiteOptions;

/// Verification suite for the blog and film REST APIs.
#[derive(Debug, Clone, Parser)]
#[command(name = "restcheck", version, about)]
pub struct Cli {
    /// YAML configuration file; the bundled configuration is used when absent.
    #[arg(long, env = "RESTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only run scenarios whose name contains this text.
    #[arg(long)]
    pub filter: Option<String>,

    /// Only run scenarios of this group: posts, comments or films.
    #[arg(long)]
    pub group: Option<ScenarioGroup>,

    /// Number of scenarios run concurrently.
    #[arg(long, default_value = "1")]
    pub jobs: NonZeroUsize,

    /// Skip the remaining scenarios after the first failure.
    #[arg(long)]
    pub stop_on_failure: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List the selected scenarios without running them.
    #[arg(long)]
    pub list: bool,

    /// Log filter, e.g. `info` or `restcheck=debug`.
    #[arg(long, env = "RESTCHECK_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per scenario and a summary.
    Text,
    /// The full report as JSON.
    Json,
}

impl Cli {
    /// Keeps the scenarios matching `--group` and `--filter`, in order.
    #[must_use]
    pub fn select(&self, scenarios: Vec<ScenarioDef>) -> Vec<ScenarioDef> {
        scenarios
            .into_iter()
            .filter(|s| self.group.is_none_or(|g| s.group == g))
            .filter(|s| self.filter.as_deref().is_none_or(|f| s.name.contains(f)))
            .collect()
    }

    /// Runner options derived from the flags.
    #[must_use]
    pub const fn suite_options(&self) -> SuiteOptions {
        SuiteOptions {
            jobs: self.jobs.get(),
            stop_on_failure: self.stop_on_failure,
        }
    }
}
