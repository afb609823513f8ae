// src/main.rs
//! AgentNet Lab demo runner
//!
//! Runs one of the built-in scenarios and prints the run report.
//!
//! ```text
//! agentnet-lab [greeting|relay|faulty]
//! ```

use agentnet_lab::observability::init_tracing;
use agentnet_lab::{LabConfig, Scenario};
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> Result<ExitCode> {
    // Load configuration
    let config = LabConfig::load().context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    info!("Starting AgentNet Lab v{}", env!("CARGO_PKG_VERSION"));

    let name = std::env::args().nth(1).unwrap_or_else(|| config.scenario.clone());
    let scenario: Scenario = name.parse()?;

    info!("Running scenario '{}'", scenario);
    let env = scenario.build(&config)?;
    let report = env.start();

    print!("{}", report.summary());

    if report.all_completed() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{} agent(s) did not complete", report.failures().len());
        Ok(ExitCode::FAILURE)
    }
}
