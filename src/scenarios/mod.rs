// src/scenarios/mod.rs
//! Ready-made demo networks
//!
//! - **greeting**: three agents, all directly connected
//! - **relay**: two agents and a man in the middle rewriting their traffic
//! - **faulty**: one agent failing while another completes

pub mod faulty;
pub mod greeting;
pub mod relay;

use crate::runtime::Environment;
use crate::utils::config::LabConfig;
use crate::utils::errors::{LabError, Result};
use std::fmt;
use std::str::FromStr;

/// Built-in scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Greeting,
    Relay,
    Faulty,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Greeting, Scenario::Relay, Scenario::Faulty];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Greeting => "greeting",
            Scenario::Relay => "relay",
            Scenario::Faulty => "faulty",
        }
    }

    /// Add this scenario's agents and links to `env`
    pub fn install(&self, env: &mut Environment) -> Result<()> {
        match self {
            Scenario::Greeting => greeting::install(env),
            Scenario::Relay => relay::install(env),
            Scenario::Faulty => faulty::install(env),
        }
    }

    /// Fresh environment configured from `config` with this scenario installed
    pub fn build(&self, config: &LabConfig) -> Result<Environment> {
        let mut env = Environment::with_config(config);
        self.install(&mut env)?;
        Ok(env)
    }
}

impl FromStr for Scenario {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LabError::UnknownScenario(s.to_string()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
