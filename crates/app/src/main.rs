//! restcheck binary.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use restcheck::{
    Cli, OutputFormat, SuiteContext, SuiteRunner, catalog, init_logging, load_config, render_json,
    render_text,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let scenarios = cli.select(catalog());
    if cli.list {
        for scenario in &scenarios {
            println!("{:<9}{}", scenario.group.as_str(), scenario.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let context = SuiteContext::new(&config).context("failed to set up the suite")?;

    tracing::info!("restcheck v{}", env!("CARGO_PKG_VERSION"));

    let report = SuiteRunner::new(Arc::new(context), cli.suite_options())
        .run(scenarios)
        .await;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => print!("{}", render_json(&report).context("failed to render report")?),
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
