//! restcheck - verification suite for the blog and film REST APIs
//!
//! The binary loads the YAML configuration, builds one [`SuiteContext`],
//! runs the selected scenarios and prints a report.

pub mod cli;
pub mod context;
pub mod report;
pub mod scenarios;
pub mod suite;

pub use cli::{Cli, OutputFormat};
pub use context::{BUNDLED_CONFIG, ContextError, SuiteContext, load_config};
pub use report::{render_json, render_text};
pub use scenarios::{ScenarioDef, ScenarioFuture, catalog};
pub use suite::{SuiteOptions, SuiteRunner, run_one};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber, writing to stderr.
///
/// `level` is an `EnvFilter` directive; an invalid one falls back to `warn`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
